use crate::playback::{PlaybackError, PlaybackSink};
use crate::tone::{synth, ToneSequence};
use crate::util::RetryCooldown;
use futures::future::BoxFuture;
use futures::FutureExt;
use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::source::Source;
use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

const OPEN_COOLDOWN_INITIAL: Duration = Duration::from_secs(2);
const OPEN_COOLDOWN_MAX: Duration = Duration::from_secs(60);
const EMPTY_SEQUENCE_WARN_INTERVAL: Duration = Duration::from_secs(5);

/// A minimal, poison-tolerant, lazy initializer for a single value.
///
/// [`rodio::OutputStream`] must stay alive for the duration of playback;
/// opening a fresh stream per sequence drops the previous one mid-tone and
/// truncates output, so one stream is cached for the session.
struct LazyInit<T> {
    value: Mutex<Option<T>>,
}

impl<T> LazyInit<T> {
    fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    fn get_or_try_init_with<R, E>(
        &self,
        init: impl FnOnce() -> Result<T, E>,
        f: impl FnOnce(&T) -> R,
        invariant_err: impl FnOnce() -> E,
    ) -> Result<R, E> {
        let mut guard = match self.value.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("output stream cache lock was poisoned; recovering");
                poisoned.into_inner()
            }
        };

        // `init` runs at most once, only when the cache is empty.
        if guard.is_none() {
            *guard = Some(init()?);
        }

        match guard.as_ref() {
            Some(v) => Ok(f(v)),
            None => Err(invariant_err()),
        }
    }
}

struct RateLimitedWarn {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimitedWarn {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    fn should_log(&self) -> bool {
        let mut guard = match self.last.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        let now = Instant::now();
        match *guard {
            None => {
                *guard = Some(now);
                true
            }
            Some(prev) if now.duration_since(prev) >= self.interval => {
                *guard = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

/// Rodio-backed sink. Each command is synthesized to PCM and appended to its
/// own detached [`Sink`] on the shared mixer, so chord tones overlap as an
/// arpeggio and concurrent sequences overlap freely. Offsets are turned into
/// timer waits here, not in the renderer.
///
/// Missing audio hardware degrades to silence: a `NoDevice` open failure is
/// memoized and later plays become no-ops; other open failures are gated by
/// a growing cooldown instead of being retried on every call.
#[derive(Clone)]
pub struct AudioPlaybackSink {
    output_device_name: Option<String>,
    disabled: Arc<AtomicBool>,
    disabled_details: Arc<OnceLock<String>>,

    // One OutputStream for the whole session; clones share it.
    output_stream: Arc<LazyInit<OutputStream>>,
    open_cooldown: Arc<RetryCooldown>,

    empty_sequence_warn: Arc<RateLimitedWarn>,
}

impl AudioPlaybackSink {
    pub fn new() -> Self {
        Self {
            output_device_name: None,
            disabled: Arc::new(AtomicBool::new(false)),
            disabled_details: Arc::new(OnceLock::new()),
            output_stream: Arc::new(LazyInit::new()),
            open_cooldown: Arc::new(RetryCooldown::new(
                OPEN_COOLDOWN_INITIAL,
                OPEN_COOLDOWN_MAX,
            )),
            empty_sequence_warn: Arc::new(RateLimitedWarn::new(EMPTY_SEQUENCE_WARN_INTERVAL)),
        }
    }

    pub fn with_output_device_name<S: Into<String>>(mut self, name: S) -> Self {
        self.output_device_name = Some(name.into());
        self
    }

    fn open_output_stream(&self) -> Result<OutputStream, PlaybackError> {
        tracing::debug!(
            configured_output_device = %self.output_device_name.as_deref().unwrap_or("<default>"),
            "opening audio output stream"
        );

        match self.output_device_name.as_deref() {
            Some(wanted) => match open_named_output_stream(wanted) {
                Ok(stream) => Ok(stream),
                Err(e) => {
                    tracing::warn!(
                        wanted_device = %wanted,
                        error = %e,
                        "configured output device unusable; falling back to default"
                    );
                    OutputStreamBuilder::open_default_stream().map_err(|err| {
                        PlaybackError::AudioOutputUnavailable {
                            details: format!(
                                "default-device fallback after named device failed: {err}"
                            ),
                        }
                    })
                }
            },
            None => OutputStreamBuilder::open_default_stream().map_err(|err| {
                PlaybackError::AudioOutputUnavailable {
                    details: format!("open default output stream: {err}"),
                }
            }),
        }
    }

    fn connect_sink(&self) -> Result<Sink, PlaybackError> {
        self.output_stream.get_or_try_init_with(
            || self.open_output_stream(),
            |stream| {
                let mixer = stream.mixer();
                Sink::connect_new(&mixer)
            },
            || PlaybackError::AudioOutputUnavailable {
                details: "internal error: output stream cache invariant violated".to_owned(),
            },
        )
    }

    fn note_open_failure(&self, error: &PlaybackError) {
        self.open_cooldown.record_failure();
        let PlaybackError::AudioOutputUnavailable { details } = error;
        if details.contains("NoDevice") {
            self.disabled.store(true, Ordering::Relaxed);
            let _ = self.disabled_details.set(details.clone());
        }
    }
}

impl Default for AudioPlaybackSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSink for AudioPlaybackSink {
    fn play(&self, sequence: ToneSequence) -> BoxFuture<'_, Result<(), PlaybackError>> {
        async move {
            if self.disabled.load(Ordering::Relaxed) {
                return Ok(());
            }

            if sequence.is_empty() {
                if self.empty_sequence_warn.should_log() {
                    tracing::warn!("skipping playback of empty tone sequence (rate-limited)");
                } else {
                    tracing::debug!("skipping playback of empty tone sequence");
                }
                return Ok(());
            }

            if !self.open_cooldown.ready() {
                tracing::debug!("audio output recently failed to open; skipping playback");
                return Ok(());
            }

            let total = sequence.total_seconds();
            let mut elapsed = 0.0f32;
            for command in sequence {
                let wait = command.start_offset_seconds - elapsed;
                if wait > 0.0 {
                    tokio::time::sleep(Duration::from_secs_f32(wait)).await;
                    elapsed = command.start_offset_seconds;
                }

                let sink = match self.connect_sink() {
                    Ok(s) => {
                        self.open_cooldown.record_success();
                        s
                    }
                    Err(e) => {
                        self.note_open_failure(&e);
                        return Err(e);
                    }
                };

                let pcm = synth::command_pcm(&command, synth::SAMPLE_RATE_HZ);
                sink.append(TonePcmSource::new(pcm));
                sink.detach();
            }

            // Detached sinks keep sounding; hold until the tail fades so a
            // caller that exits right after play does not truncate it.
            let tail = total - elapsed;
            if tail > 0.0 {
                tokio::time::sleep(Duration::from_secs_f32(tail)).await;
            }

            Ok(())
        }
        .boxed()
    }
}

fn normalize_device_name(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

#[derive(thiserror::Error, Debug)]
enum NamedDeviceStreamError {
    #[error("output device not found: {wanted}")]
    DeviceNotFound { wanted: String },
    #[error("failed to open output device {wanted}: {error}")]
    OpenFailed { wanted: String, error: StreamError },
}

fn open_named_output_stream(wanted: &str) -> Result<OutputStream, NamedDeviceStreamError> {
    let wanted_norm = normalize_device_name(wanted);

    let host = rodio::cpal::default_host();
    let selected = host.output_devices().ok().and_then(|mut devices| {
        devices.find(|d| {
            d.name()
                .map(|n| normalize_device_name(&n) == wanted_norm)
                .unwrap_or(false)
        })
    });

    let Some(device) = selected else {
        return Err(NamedDeviceStreamError::DeviceNotFound {
            wanted: wanted.to_owned(),
        });
    };

    OutputStreamBuilder::from_device(device)
        .and_then(|b| b.open_stream_or_fallback())
        .map_err(|error| NamedDeviceStreamError::OpenFailed {
            wanted: wanted.to_owned(),
            error,
        })
}

struct TonePcmSource {
    samples: std::vec::IntoIter<f32>,
}

impl TonePcmSource {
    fn new(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }
}

impl Iterator for TonePcmSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.samples.next()
    }
}

impl Source for TonePcmSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        synth::SAMPLE_RATE_HZ
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_device_name_trims_and_is_case_insensitive() {
        assert_eq!(normalize_device_name("  Speakers  "), "speakers");
        assert_eq!(normalize_device_name("HeAdPhOnEs"), "headphones");
    }

    #[test]
    fn empty_sequence_warning_is_rate_limited() {
        let limiter = RateLimitedWarn::new(Duration::from_secs(5));
        assert!(limiter.should_log());
        assert!(!limiter.should_log());
    }

    #[test]
    fn lazy_init_runs_init_only_once() {
        use std::sync::atomic::AtomicUsize;

        let cell: LazyInit<u32> = LazyInit::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let v1 = cell
            .get_or_try_init_with(
                {
                    let calls = Arc::clone(&calls);
                    move || {
                        calls.fetch_add(1, Ordering::Relaxed);
                        Ok::<_, ()>(42)
                    }
                },
                |v| *v,
                || (),
            )
            .unwrap();
        let v2 = cell
            .get_or_try_init_with(
                {
                    let calls = Arc::clone(&calls);
                    move || {
                        calls.fetch_add(1, Ordering::Relaxed);
                        Ok::<_, ()>(99)
                    }
                },
                |v| *v,
                || (),
            )
            .unwrap();

        assert_eq!(v1, 42);
        assert_eq!(v2, 42);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn tone_pcm_source_is_mono_at_synth_rate() {
        let source = TonePcmSource::new(vec![0.0, 0.5, -0.5]);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), synth::SAMPLE_RATE_HZ);
        assert_eq!(source.count(), 3);
    }
}
