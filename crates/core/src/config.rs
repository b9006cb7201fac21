use crate::persona::PersonaStyle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MASTER_VOLUME: f32 = 0.6;
pub const ENV_PERSONA: &str = "EASYVIZ_PERSONA";
pub const ENV_ENVIRONMENT: &str = "EASYVIZ_ENVIRONMENT";
pub const ENV_MASTER_VOLUME: &str = "EASYVIZ_VOLUME";

/// Coarse day-part/context setting scaling output volume: night→low,
/// work→medium, day→normal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Day,
    Night,
    Work,
}

impl EnvironmentMode {
    pub const ALL: [EnvironmentMode; 3] = [
        EnvironmentMode::Day,
        EnvironmentMode::Night,
        EnvironmentMode::Work,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentMode::Day => "day",
            EnvironmentMode::Night => "night",
            EnvironmentMode::Work => "work",
        }
    }

    pub fn volume_scale(&self) -> f32 {
        match self {
            EnvironmentMode::Day => 1.0,
            EnvironmentMode::Work => 2.0 / 3.0,
            EnvironmentMode::Night => 1.0 / 3.0,
        }
    }

    /// Auto-detect from the local hour: late and early hours are night,
    /// office hours are work, the rest is day.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=7 | 23 => EnvironmentMode::Night,
            9..=17 => EnvironmentMode::Work,
            _ => EnvironmentMode::Day,
        }
    }
}

impl Default for EnvironmentMode {
    fn default() -> Self {
        EnvironmentMode::Day
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        EnvironmentMode::ALL
            .into_iter()
            .find(|m| m.as_str() == norm)
            .ok_or_else(|| ConfigError::UnknownEnvironmentMode(s.to_owned()))
    }
}

/// Output volume multiplier, silently clamped to `[0, 1]`; malformed values
/// are corrected, not rejected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct MasterVolume(f32);

impl MasterVolume {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for MasterVolume {
    fn default() -> Self {
        Self(DEFAULT_MASTER_VOLUME)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub persona: PersonaStyle,
    pub environment: EnvironmentMode,
    pub master_volume: MasterVolume,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown environment mode: {0}")]
    UnknownEnvironmentMode(String),
    #[error("unknown persona style: {0}")]
    UnknownPersonaStyle(String),
    #[error("volume is not a number: {0}")]
    VolumeNotANumber(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_persona(
    cli_value: Option<PersonaStyle>,
    env: &impl Env,
) -> Result<PersonaStyle, ConfigError> {
    match cli_value {
        Some(p) => Ok(p),
        None => match env.var(ENV_PERSONA) {
            Some(v) => PersonaStyle::from_str(&v)
                .map_err(|_| ConfigError::UnknownPersonaStyle(v)),
            None => Ok(PersonaStyle::default()),
        },
    }
}

pub fn resolve_environment(
    cli_value: Option<EnvironmentMode>,
    env: &impl Env,
    fallback: EnvironmentMode,
) -> Result<EnvironmentMode, ConfigError> {
    match cli_value {
        Some(m) => Ok(m),
        None => match env.var(ENV_ENVIRONMENT) {
            Some(v) => v.parse(),
            None => Ok(fallback),
        },
    }
}

pub fn resolve_master_volume(
    cli_value: Option<f32>,
    env: &impl Env,
) -> Result<MasterVolume, ConfigError> {
    match cli_value {
        Some(v) => Ok(MasterVolume::new(v)),
        None => match env.var(ENV_MASTER_VOLUME) {
            Some(v) => v
                .trim()
                .parse::<f32>()
                .map(MasterVolume::new)
                .map_err(|_| ConfigError::VolumeNotANumber(v)),
            None => Ok(MasterVolume::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_volume_clamps_silently() {
        assert_eq!(MasterVolume::new(1.8).value(), 1.0);
        assert_eq!(MasterVolume::new(-0.5).value(), 0.0);
        assert_eq!(MasterVolume::default().value(), DEFAULT_MASTER_VOLUME);
    }

    #[test]
    fn environment_scales_are_ordered() {
        assert!(
            EnvironmentMode::Night.volume_scale() < EnvironmentMode::Work.volume_scale()
        );
        assert!(EnvironmentMode::Work.volume_scale() < EnvironmentMode::Day.volume_scale());
    }

    #[test]
    fn environment_from_hour() {
        assert_eq!(EnvironmentMode::from_hour(3), EnvironmentMode::Night);
        assert_eq!(EnvironmentMode::from_hour(23), EnvironmentMode::Night);
        assert_eq!(EnvironmentMode::from_hour(10), EnvironmentMode::Work);
        assert_eq!(EnvironmentMode::from_hour(20), EnvironmentMode::Day);
    }

    #[test]
    fn persona_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_PERSONA, "humor");
        let p = resolve_persona(Some(PersonaStyle::Encourage), &env).expect("resolves");
        assert_eq!(p, PersonaStyle::Encourage);
    }

    #[test]
    fn persona_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_PERSONA, "humor");
        let p = resolve_persona(None, &env).expect("resolves");
        assert_eq!(p, PersonaStyle::Humor);
    }

    #[test]
    fn persona_default_when_both_missing() {
        let p = resolve_persona(None, &MapEnv::default()).expect("resolves");
        assert_eq!(p, PersonaStyle::Warm);
    }

    #[test]
    fn bad_persona_env_is_an_error() {
        let env = MapEnv::default().with_var(ENV_PERSONA, "snarky");
        assert!(resolve_persona(None, &env).is_err());
    }

    #[test]
    fn environment_env_parse_and_fallback() {
        let env = MapEnv::default().with_var(ENV_ENVIRONMENT, "night");
        let m = resolve_environment(None, &env, EnvironmentMode::Day).expect("resolves");
        assert_eq!(m, EnvironmentMode::Night);

        let m = resolve_environment(None, &MapEnv::default(), EnvironmentMode::Work)
            .expect("resolves");
        assert_eq!(m, EnvironmentMode::Work);
    }

    #[test]
    fn volume_env_is_clamped_not_rejected() {
        let env = MapEnv::default().with_var(ENV_MASTER_VOLUME, "2.5");
        let v = resolve_master_volume(None, &env).expect("resolves");
        assert_eq!(v.value(), 1.0);

        let env = MapEnv::default().with_var(ENV_MASTER_VOLUME, "loud");
        assert!(resolve_master_volume(None, &env).is_err());
    }
}
