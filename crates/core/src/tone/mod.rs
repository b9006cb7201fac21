mod renderer;
pub mod synth;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use renderer::{RenderOptions, ToneRenderer};

/// Oscillator shape, mapped 1:1 onto an oscillator/gain-node style backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// Modifier applied to an emotion's base tone configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoundEffect {
    Success,
    Progress,
    Encouragement,
    Notification,
    Error,
    Achievement,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Success,
        SoundEffect::Progress,
        SoundEffect::Encouragement,
        SoundEffect::Notification,
        SoundEffect::Error,
        SoundEffect::Achievement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Success => "success",
            SoundEffect::Progress => "progress",
            SoundEffect::Encouragement => "encouragement",
            SoundEffect::Notification => "notification",
            SoundEffect::Error => "error",
            SoundEffect::Achievement => "achievement",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sound effect: {0}")]
pub struct UnknownSoundEffect(String);

impl FromStr for SoundEffect {
    type Err = UnknownSoundEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        SoundEffect::ALL
            .into_iter()
            .find(|e| e.as_str() == norm)
            .ok_or_else(|| UnknownSoundEffect(s.to_owned()))
    }
}

/// One scheduled oscillator event. Offsets are relative to sequence start;
/// the playback adapter decides how offsets become actual dispatch.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToneCommand {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub gain_peak: f32,
    pub attack_seconds: f32,
    pub sustain_seconds: f32,
    pub release_seconds: f32,
    pub start_offset_seconds: f32,
}

impl ToneCommand {
    pub fn duration_seconds(&self) -> f32 {
        self.attack_seconds + self.sustain_seconds + self.release_seconds
    }

    pub fn end_offset_seconds(&self) -> f32 {
        self.start_offset_seconds + self.duration_seconds()
    }
}

/// An ordered batch of tone commands representing one feedback sound.
/// Generated once per render request; never retried or replayed by the
/// engine itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ToneSequence {
    commands: Vec<ToneCommand>,
}

impl ToneSequence {
    /// Builds a sequence, restoring the non-decreasing offset invariant by a
    /// stable sort (merged presets interleave segment offsets).
    pub fn from_commands(mut commands: Vec<ToneCommand>) -> Self {
        commands.sort_by(|a, b| {
            a.start_offset_seconds
                .partial_cmp(&b.start_offset_seconds)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { commands }
    }

    pub fn commands(&self) -> &[ToneCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Offset at which the last tone fades out.
    pub fn total_seconds(&self) -> f32 {
        self.commands
            .iter()
            .map(ToneCommand::end_offset_seconds)
            .fold(0.0, f32::max)
    }
}

impl IntoIterator for ToneSequence {
    type Item = ToneCommand;
    type IntoIter = std::vec::IntoIter<ToneCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(offset: f32) -> ToneCommand {
        ToneCommand {
            frequency_hz: 440.0,
            waveform: Waveform::Sine,
            gain_peak: 0.5,
            attack_seconds: 0.1,
            sustain_seconds: 0.2,
            release_seconds: 0.1,
            start_offset_seconds: offset,
        }
    }

    #[test]
    fn from_commands_restores_offset_order() {
        let seq = ToneSequence::from_commands(vec![cmd(0.3), cmd(0.0), cmd(0.15)]);
        let offsets: Vec<f32> = seq
            .commands()
            .iter()
            .map(|c| c.start_offset_seconds)
            .collect();
        assert_eq!(offsets, vec![0.0, 0.15, 0.3]);
    }

    #[test]
    fn total_seconds_covers_last_tone() {
        let seq = ToneSequence::from_commands(vec![cmd(0.0), cmd(0.3)]);
        assert!((seq.total_seconds() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn sound_effect_parses() {
        assert_eq!(
            SoundEffect::from_str("Achievement").expect("parses"),
            SoundEffect::Achievement
        );
        assert!(SoundEffect::from_str("fanfare").is_err());
    }
}
