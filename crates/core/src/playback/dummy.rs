use crate::playback::{PlaybackError, PlaybackSink};
use crate::tone::ToneSequence;
use futures::future::BoxFuture;
use futures::FutureExt;

/// Discards every sequence. Used by tests and by muted sessions, where
/// "rendered but not played" is a normal outcome.
#[derive(Clone)]
pub struct DummyPlaybackSink;

impl DummyPlaybackSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyPlaybackSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSink for DummyPlaybackSink {
    fn play(&self, _sequence: ToneSequence) -> BoxFuture<'_, Result<(), PlaybackError>> {
        async move { Ok(()) }.boxed()
    }
}
