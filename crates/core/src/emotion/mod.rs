mod classifier;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

pub use classifier::{classify_time_of_day, EmotionClassifier, Lexicon};

/// Canonical emotion set. Every table in the engine is total over this enum;
/// free-form strings collapse to [`Emotion::Neutral`] at the parse boundary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Calm,
    Anxious,
    Confused,
    Motivated,
    Neutral,
    Frustrated,
    Excited,
    Focused,
    Creative,
}

impl Emotion {
    pub const ALL: [Emotion; 10] = [
        Emotion::Happy,
        Emotion::Calm,
        Emotion::Anxious,
        Emotion::Confused,
        Emotion::Motivated,
        Emotion::Neutral,
        Emotion::Frustrated,
        Emotion::Excited,
        Emotion::Focused,
        Emotion::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Calm => "calm",
            Emotion::Anxious => "anxious",
            Emotion::Confused => "confused",
            Emotion::Motivated => "motivated",
            Emotion::Neutral => "neutral",
            Emotion::Frustrated => "frustrated",
            Emotion::Excited => "excited",
            Emotion::Focused => "focused",
            Emotion::Creative => "creative",
        }
    }

    /// Total parse: unknown or garbage input falls back to `Neutral` instead
    /// of erroring, so downstream table lookups never have to handle a miss.
    pub fn parse_lenient(s: &str) -> Emotion {
        Emotion::from_str(s).unwrap_or(Emotion::Neutral)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == norm)
            .ok_or_else(|| UnknownEmotion(s.to_owned()))
    }
}

/// Normalized confidence in `[0, 1]`. Out-of-range values are clamped on
/// construction and on arithmetic, never rejected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Intensity(f32);

impl Intensity {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn raised_by(&self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(0.5)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionState {
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub timestamp: SystemTime,
}

impl EmotionState {
    pub fn now(emotion: Emotion, intensity: Intensity) -> Self {
        Self {
            emotion,
            intensity,
            timestamp: SystemTime::now(),
        }
    }
}

/// Coarse interaction pattern reported by the input surface.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    QuickClick,
    Hover,
    RepeatedClicks,
    Other,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::QuickClick => "quick_click",
            InteractionKind::Hover => "hover",
            InteractionKind::RepeatedClicks => "repeated_clicks",
            InteractionKind::Other => "other",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown interaction kind: {0}")]
pub struct UnknownInteraction(String);

impl FromStr for InteractionKind {
    type Err = UnknownInteraction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        [
            InteractionKind::QuickClick,
            InteractionKind::Hover,
            InteractionKind::RepeatedClicks,
            InteractionKind::Other,
        ]
        .into_iter()
        .find(|k| k.as_str() == norm)
        .ok_or_else(|| UnknownInteraction(s.to_owned()))
    }
}

/// Behavioral signal accompanying (or replacing) free-text input.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BehaviorSignal {
    pub completion_rate: Option<f32>,
    pub duration: Option<Duration>,
    pub interaction: Option<InteractionKind>,
}

impl BehaviorSignal {
    pub fn with_completion_rate(mut self, rate: f32) -> Self {
        self.completion_rate = Some(rate);
        self
    }

    pub fn with_interaction(mut self, kind: InteractionKind, duration: Duration) -> Self {
        self.interaction = Some(kind);
        self.duration = Some(duration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_clamps_on_construction() {
        assert_eq!(Intensity::new(1.5).value(), 1.0);
        assert_eq!(Intensity::new(-0.3).value(), 0.0);
        assert_eq!(Intensity::new(0.42).value(), 0.42);
    }

    #[test]
    fn intensity_raise_caps_at_one() {
        let i = Intensity::new(0.9).raised_by(0.2);
        assert_eq!(i.value(), 1.0);
    }

    #[test]
    fn emotion_round_trips_through_str() {
        for e in Emotion::ALL {
            assert_eq!(Emotion::from_str(e.as_str()).expect("parses"), e);
        }
    }

    #[test]
    fn lenient_parse_falls_back_to_neutral() {
        assert_eq!(Emotion::parse_lenient("garbage"), Emotion::Neutral);
        assert_eq!(Emotion::parse_lenient(""), Emotion::Neutral);
        assert_eq!(Emotion::parse_lenient("  Happy "), Emotion::Happy);
    }
}
