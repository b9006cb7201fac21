//! Offline synthesis of tone commands into PCM, so the oscillator math stays
//! unit-testable without an output device or fake timers.

use crate::tone::{ToneCommand, Waveform};
use std::f32::consts::PI;

pub const SAMPLE_RATE_HZ: u32 = 44_100;

/// Renders one command into mono f32 PCM at the given sample rate. The
/// command's start offset is ignored here; scheduling belongs to the
/// playback adapter.
pub fn command_pcm(command: &ToneCommand, sample_rate_hz: u32) -> Vec<f32> {
    let duration = command.duration_seconds().max(0.0);
    let total = (duration * sample_rate_hz as f32) as usize;

    let mut pcm = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / sample_rate_hz as f32;
        let sample = oscillate(command.waveform, command.frequency_hz, t);
        pcm.push(sample * envelope(command, t) * command.gain_peak.clamp(0.0, 1.0));
    }
    pcm
}

fn oscillate(waveform: Waveform, frequency_hz: f32, t: f32) -> f32 {
    let cycle = (t * frequency_hz).fract();
    match waveform {
        Waveform::Sine => (2.0 * PI * frequency_hz * t).sin(),
        Waveform::Square => {
            if cycle < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * cycle - 1.0,
        Waveform::Triangle => {
            if cycle < 0.5 {
                4.0 * cycle - 1.0
            } else {
                3.0 - 4.0 * cycle
            }
        }
    }
}

/// Linear attack, flat sustain, linear release; unit peak.
fn envelope(command: &ToneCommand, t: f32) -> f32 {
    let attack = command.attack_seconds;
    let sustain_end = attack + command.sustain_seconds;
    let duration = command.duration_seconds();

    if t < attack && attack > 0.0 {
        t / attack
    } else if t <= sustain_end {
        1.0
    } else if t < duration && command.release_seconds > 0.0 {
        (duration - t) / command.release_seconds
    } else {
        0.0
    }
}
