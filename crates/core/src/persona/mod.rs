mod selector;
pub(crate) mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use selector::FeedbackSelector;
pub use tables::suggestions;

/// Tone-of-voice preset applied uniformly to text and emoji selection.
/// Fixed set, defined at process start; selected by user action.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonaStyle {
    Warm,
    Humor,
    Encourage,
}

impl PersonaStyle {
    pub const ALL: [PersonaStyle; 3] =
        [PersonaStyle::Warm, PersonaStyle::Humor, PersonaStyle::Encourage];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaStyle::Warm => "warm",
            PersonaStyle::Humor => "humor",
            PersonaStyle::Encourage => "encourage",
        }
    }

    pub fn profile(&self) -> &'static PersonaProfile {
        match self {
            PersonaStyle::Warm => &PersonaProfile {
                name: "温柔关怀型",
                color_tags: &["墨青色", "云蓝色"],
                signature_emoji: "🤗",
                description: "温暖陪伴，细心关怀",
            },
            PersonaStyle::Humor => &PersonaProfile {
                name: "幽默陪伴型",
                color_tags: &["琥珀色", "玉白色"],
                signature_emoji: "😄",
                description: "轻松愉快，化解压力",
            },
            PersonaStyle::Encourage => &PersonaProfile {
                name: "积极鼓励型",
                color_tags: &["竹绿色", "玉白色"],
                signature_emoji: "💪",
                description: "积极向上，激发潜能",
            },
        }
    }
}

impl Default for PersonaStyle {
    fn default() -> Self {
        PersonaStyle::Warm
    }
}

impl fmt::Display for PersonaStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown persona style: {0}")]
pub struct UnknownPersona(String);

impl FromStr for PersonaStyle {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        PersonaStyle::ALL
            .into_iter()
            .find(|p| p.as_str() == norm)
            .ok_or_else(|| UnknownPersona(s.to_owned()))
    }
}

/// Static descriptor for a persona: display name, brand color tags, signature
/// glyph. Immutable; never created or destroyed at runtime.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct PersonaProfile {
    pub name: &'static str,
    pub color_tags: &'static [&'static str],
    pub signature_emoji: &'static str,
    pub description: &'static str,
}

/// Visual styling descriptor resolved per emotion (independent of persona).
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct VisualTheme {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_gradient: &'static str,
}

/// One multimodal feedback unit. Created fresh per classification event and
/// owned by the caller; the engine keeps no history.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FeedbackPayload {
    pub text: String,
    pub emojis: Vec<&'static str>,
    pub sound_tag: String,
    pub animation_tag: &'static str,
    pub visual_theme: VisualTheme,
}
