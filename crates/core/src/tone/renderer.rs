use crate::config::{EnvironmentMode, MasterVolume};
use crate::emotion::{Emotion, Intensity};
use crate::tone::{SoundEffect, ToneCommand, ToneSequence, Waveform};

/// Stagger between tones of one chord, so they play as a fast arpeggio.
const TONE_STAGGER_SECONDS: f32 = 0.1;
/// Stagger between the segments of the celebration preset.
const CELEBRATION_STAGGER_SECONDS: f32 = 0.3;
const PROGRESS_DURATION_SECONDS: f32 = 0.2;
const AMBIENT_ATTACK_SECONDS: f32 = 1.0;
const AMBIENT_GAIN_FACTOR: f32 = 0.1;

struct EmotionToneConfig {
    frequencies: &'static [f32],
    duration: f32,
    attack: f32,
    release: f32,
    waveform: Waveform,
    volume_factor: f32,
}

/// Fixed emotion→tone table. Frequencies are rough note values; the table is
/// total over the enum, so an unmapped emotion cannot reach it (garbage
/// strings collapse to `Neutral` at the parse boundary).
fn tone_config(emotion: Emotion) -> &'static EmotionToneConfig {
    match emotion {
        Emotion::Neutral => &EmotionToneConfig {
            frequencies: &[440.0],
            duration: 0.5,
            attack: 0.2,
            release: 0.3,
            waveform: Waveform::Sine,
            volume_factor: 0.4,
        },
        Emotion::Calm => &EmotionToneConfig {
            frequencies: &[220.0, 330.0, 440.0],
            duration: 0.8,
            attack: 0.3,
            release: 0.5,
            waveform: Waveform::Sine,
            volume_factor: 0.3,
        },
        Emotion::Happy => &EmotionToneConfig {
            frequencies: &[523.25, 659.25, 783.99],
            duration: 0.6,
            attack: 0.1,
            release: 0.3,
            waveform: Waveform::Sine,
            volume_factor: 0.5,
        },
        Emotion::Motivated => &EmotionToneConfig {
            frequencies: &[440.0, 554.37, 659.25, 880.0],
            duration: 1.0,
            attack: 0.2,
            release: 0.4,
            waveform: Waveform::Sine,
            volume_factor: 0.6,
        },
        Emotion::Anxious => &EmotionToneConfig {
            frequencies: &[174.0, 285.0, 396.0],
            duration: 1.2,
            attack: 0.5,
            release: 0.7,
            waveform: Waveform::Sine,
            volume_factor: 0.25,
        },
        Emotion::Excited => &EmotionToneConfig {
            frequencies: &[659.25, 783.99, 987.77, 1174.66],
            duration: 0.4,
            attack: 0.05,
            release: 0.2,
            waveform: Waveform::Square,
            volume_factor: 0.7,
        },
        Emotion::Focused => &EmotionToneConfig {
            frequencies: &[349.23],
            duration: 0.4,
            attack: 0.1,
            release: 0.2,
            waveform: Waveform::Triangle,
            volume_factor: 0.5,
        },
        Emotion::Creative => &EmotionToneConfig {
            frequencies: &[440.0],
            duration: 0.8,
            attack: 0.15,
            release: 0.35,
            waveform: Waveform::Sawtooth,
            volume_factor: 0.5,
        },
        Emotion::Confused => &EmotionToneConfig {
            frequencies: &[293.66],
            duration: 0.5,
            attack: 0.15,
            release: 0.25,
            waveform: Waveform::Triangle,
            volume_factor: 0.45,
        },
        Emotion::Frustrated => &EmotionToneConfig {
            frequencies: &[196.0],
            duration: 1.0,
            attack: 0.4,
            release: 0.5,
            waveform: Waveform::Sine,
            volume_factor: 0.3,
        },
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub effect: Option<SoundEffect>,
    pub intensity: Option<Intensity>,
}

impl RenderOptions {
    pub fn with_effect(mut self, effect: SoundEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

/// Caller-owned tone renderer: master volume and environment travel with the
/// value instead of hiding in a module singleton. Rendering never touches an
/// audio device and always returns a valid sequence.
#[derive(Clone, Copy, Debug)]
pub struct ToneRenderer {
    master_volume: MasterVolume,
    environment: EnvironmentMode,
}

impl ToneRenderer {
    pub fn new(master_volume: MasterVolume, environment: EnvironmentMode) -> Self {
        Self {
            master_volume,
            environment,
        }
    }

    pub fn environment(&self) -> EnvironmentMode {
        self.environment
    }

    pub fn set_environment(&mut self, environment: EnvironmentMode) {
        self.environment = environment;
    }

    pub fn set_master_volume(&mut self, volume: MasterVolume) {
        self.master_volume = volume;
    }

    fn effective_volume(&self) -> f32 {
        self.master_volume.value() * self.environment.volume_scale()
    }

    pub fn render(&self, emotion: Emotion, options: &RenderOptions) -> ToneSequence {
        self.render_offset(emotion, options, 0.0)
    }

    fn render_offset(
        &self,
        emotion: Emotion,
        options: &RenderOptions,
        base_offset: f32,
    ) -> ToneSequence {
        let config = tone_config(emotion);

        let mut frequencies: Vec<f32> = config.frequencies.to_vec();
        let mut duration = config.duration;
        match options.effect {
            Some(SoundEffect::Success) => {
                for f in &mut frequencies {
                    *f *= 1.2;
                }
            }
            Some(SoundEffect::Achievement) => {
                let raised: Vec<f32> = frequencies.iter().map(|f| f * 1.5).collect();
                frequencies.extend(raised);
                duration *= 1.5;
            }
            Some(SoundEffect::Error) => {
                for f in &mut frequencies {
                    *f *= 0.8;
                }
            }
            Some(SoundEffect::Progress) => {
                frequencies.truncate(1);
                duration = PROGRESS_DURATION_SECONDS;
            }
            Some(SoundEffect::Encouragement) | Some(SoundEffect::Notification) | None => {}
        }

        let intensity = options.intensity.map(|i| i.value()).unwrap_or(1.0);
        let gain = (self.effective_volume() * config.volume_factor * intensity).clamp(0.0, 1.0);

        let attack = config.attack.min(duration);
        let release = config.release.min(duration - attack);
        let sustain = (duration - attack - release).max(0.0);

        let commands = frequencies
            .iter()
            .enumerate()
            .map(|(index, &frequency_hz)| ToneCommand {
                frequency_hz,
                waveform: config.waveform,
                gain_peak: gain,
                attack_seconds: attack,
                sustain_seconds: sustain,
                release_seconds: release,
                start_offset_seconds: base_offset + index as f32 * TONE_STAGGER_SECONDS,
            })
            .collect();

        ToneSequence::from_commands(commands)
    }

    /// Named preset: achievement/excited, success/happy, achievement/motivated
    /// staggered by a fixed 300 ms. Not a general composition API.
    pub fn celebration(&self) -> ToneSequence {
        let segments = [
            (Emotion::Excited, SoundEffect::Achievement),
            (Emotion::Happy, SoundEffect::Success),
            (Emotion::Motivated, SoundEffect::Achievement),
        ];

        let mut commands = Vec::new();
        for (index, (emotion, effect)) in segments.into_iter().enumerate() {
            let options = RenderOptions::default().with_effect(effect);
            let offset = index as f32 * CELEBRATION_STAGGER_SECONDS;
            commands.extend(self.render_offset(emotion, &options, offset));
        }
        ToneSequence::from_commands(commands)
    }

    /// Single long low-amplitude tone for background atmosphere: half the
    /// base frequency, slow attack, linear fade over the caller's duration.
    pub fn ambient(&self, emotion: Emotion, duration_seconds: f32) -> ToneSequence {
        let config = tone_config(emotion);
        let duration = duration_seconds.max(AMBIENT_ATTACK_SECONDS);
        let gain = (self.effective_volume() * AMBIENT_GAIN_FACTOR).clamp(0.0, 1.0);

        ToneSequence::from_commands(vec![ToneCommand {
            frequency_hz: config.frequencies[0] * 0.5,
            waveform: Waveform::Triangle,
            gain_peak: gain,
            attack_seconds: AMBIENT_ATTACK_SECONDS,
            sustain_seconds: 0.0,
            release_seconds: duration - AMBIENT_ATTACK_SECONDS,
            start_offset_seconds: 0.0,
        }])
    }

    /// Greeting preset played on first entry: calm, then happy shortly after.
    pub fn welcome(&self) -> ToneSequence {
        let mut commands: Vec<ToneCommand> = self
            .render_offset(
                Emotion::Calm,
                &RenderOptions::default().with_intensity(Intensity::new(0.4)),
                0.0,
            )
            .into_iter()
            .collect();
        commands.extend(self.render_offset(
            Emotion::Happy,
            &RenderOptions::default().with_intensity(Intensity::new(0.3)),
            CELEBRATION_STAGGER_SECONDS,
        ));
        ToneSequence::from_commands(commands)
    }

    /// Short focus cue played when a session starts.
    pub fn enter(&self) -> ToneSequence {
        self.render(
            Emotion::Focused,
            &RenderOptions::default().with_intensity(Intensity::new(0.5)),
        )
    }
}
