mod audio;
mod dummy;

use crate::tone::ToneSequence;
use futures::future::BoxFuture;

pub use audio::AudioPlaybackSink;
pub use dummy::DummyPlaybackSink;

#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    #[error("audio output unavailable: {details}")]
    AudioOutputUnavailable { details: String },
}

/// Turns a rendered tone sequence into actual scheduled playback. Dispatch is
/// fire-and-forget: an in-flight sequence cannot be cancelled, and starting a
/// new one does not stop a previous one. Overlap is expected behavior.
pub trait PlaybackSink: Send + Sync {
    fn play(&self, sequence: ToneSequence) -> BoxFuture<'_, Result<(), PlaybackError>>;
}
