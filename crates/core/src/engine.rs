use crate::config::{EngineConfig, EnvironmentMode};
use crate::emotion::{BehaviorSignal, EmotionClassifier, EmotionState};
use crate::persona::{FeedbackPayload, FeedbackSelector, PersonaStyle};
use crate::playback::PlaybackSink;
use crate::tone::{RenderOptions, SoundEffect, ToneRenderer, ToneSequence};
use rand::Rng;
use serde::Serialize;

/// Everything one classification event produces: the emotion, the
/// display-facing payload, and the tones to hand to the audio backend.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EngineResponse {
    pub emotion: EmotionState,
    pub payload: FeedbackPayload,
    pub tones: ToneSequence,
}

/// Composition layer over the classifier, selector and renderer, generic
/// over the playback sink so tests can run without an audio device. All
/// lookup tables are read-only; concurrent calls do not interfere.
pub struct FeedbackEngine<P> {
    classifier: EmotionClassifier,
    selector: FeedbackSelector,
    renderer: ToneRenderer,
    persona: PersonaStyle,
    playback: P,
}

impl<P: PlaybackSink> FeedbackEngine<P> {
    pub fn new(config: EngineConfig, playback: P) -> Self {
        Self {
            classifier: EmotionClassifier::default(),
            selector: FeedbackSelector::new(),
            renderer: ToneRenderer::new(config.master_volume, config.environment),
            persona: config.persona,
            playback,
        }
    }

    pub fn persona(&self) -> PersonaStyle {
        self.persona
    }

    pub fn set_persona(&mut self, persona: PersonaStyle) {
        self.persona = persona;
    }

    pub fn set_environment(&mut self, environment: EnvironmentMode) {
        self.renderer.set_environment(environment);
    }

    pub fn renderer(&self) -> &ToneRenderer {
        &self.renderer
    }

    pub fn classify(&self, input: Option<&str>, behavior: &BehaviorSignal) -> EmotionState {
        self.classifier.classify(input, behavior)
    }

    /// Selects display feedback for an already-classified state using the
    /// active persona.
    pub fn feedback<R: Rng + ?Sized>(
        &self,
        state: &EmotionState,
        rng: &mut R,
    ) -> FeedbackPayload {
        self.selector.select(state.emotion, self.persona, rng)
    }

    /// Builds a full response for an already-known state, e.g. a day-part
    /// mood supplied by the caller instead of a classification.
    pub fn respond_to_state<R: Rng + ?Sized>(
        &self,
        state: EmotionState,
        effect: Option<SoundEffect>,
        rng: &mut R,
    ) -> EngineResponse {
        let payload = self.feedback(&state, rng);

        let mut options = RenderOptions::default().with_intensity(state.intensity);
        if let Some(effect) = effect {
            options = options.with_effect(effect);
        }
        let tones = self.renderer.render(state.emotion, &options);

        EngineResponse {
            emotion: state,
            payload,
            tones,
        }
    }

    pub fn respond_with_rng<R: Rng + ?Sized>(
        &self,
        input: Option<&str>,
        behavior: &BehaviorSignal,
        effect: Option<SoundEffect>,
        rng: &mut R,
    ) -> EngineResponse {
        let state = self.classify(input, behavior);
        self.respond_to_state(state, effect, rng)
    }

    pub fn respond(
        &self,
        input: Option<&str>,
        behavior: &BehaviorSignal,
        effect: Option<SoundEffect>,
    ) -> EngineResponse {
        self.respond_with_rng(input, behavior, effect, &mut rand::rng())
    }

    /// Plays a rendered sequence. An unavailable audio backend is degraded
    /// functionality, not a failure: the error is logged and swallowed.
    pub async fn play(&self, tones: ToneSequence) {
        if let Err(e) = self.playback.play(tones).await {
            tracing::warn!(error = %e, "tone playback skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MasterVolume;
    use crate::emotion::{Emotion, Intensity};
    use crate::playback::{DummyPlaybackSink, PlaybackError};
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> FeedbackEngine<DummyPlaybackSink> {
        FeedbackEngine::new(EngineConfig::default(), DummyPlaybackSink::new())
    }

    #[test]
    fn respond_ties_payload_and_tones_to_the_classified_emotion() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(5);
        let response = engine.respond_with_rng(
            Some("我完成了这个任务，感觉很棒！"),
            &BehaviorSignal::default(),
            None,
            &mut rng,
        );

        assert_eq!(response.emotion.emotion, Emotion::Happy);
        assert_eq!(response.payload.sound_tag, "happy");
        assert_eq!(response.tones.len(), 3);
    }

    #[test]
    fn intensity_flows_into_tone_gain() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(5);

        let strong = engine.respond_with_rng(
            Some("感觉很棒"),
            &BehaviorSignal::default(),
            None,
            &mut rng,
        );
        let flat = engine.respond_with_rng(None, &BehaviorSignal::default(), None, &mut rng);

        // happy at 0.8 intensity vs neutral at 0.5: factors 0.5 and 0.4.
        assert!(strong.tones.commands()[0].gain_peak > flat.tones.commands()[0].gain_peak);
    }

    #[test]
    fn respond_to_state_skips_classification() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(8);
        let state = EmotionState::now(Emotion::Creative, Intensity::new(0.9));
        let response = engine.respond_to_state(state, None, &mut rng);
        assert_eq!(response.emotion.emotion, Emotion::Creative);
        assert_eq!(response.payload.sound_tag, "creative");
    }

    #[test]
    fn persona_switch_changes_selection_source() {
        let mut engine = engine();
        engine.set_persona(PersonaStyle::Humor);
        assert_eq!(engine.persona(), PersonaStyle::Humor);

        let mut rng = StdRng::seed_from_u64(1);
        let state = EmotionState::now(Emotion::Happy, Default::default());
        let payload = engine.feedback(&state, &mut rng);
        let pool = crate::persona::tables::phrases(Emotion::Happy).resolve(PersonaStyle::Humor);
        assert!(pool.contains(&payload.text.as_str()));
    }

    #[test]
    fn environment_change_rescales_output() {
        let mut engine = FeedbackEngine::new(
            EngineConfig {
                master_volume: MasterVolume::new(1.0),
                ..Default::default()
            },
            DummyPlaybackSink::new(),
        );
        let mut rng = StdRng::seed_from_u64(2);

        let day = engine.respond_with_rng(None, &BehaviorSignal::default(), None, &mut rng);
        engine.set_environment(EnvironmentMode::Night);
        let night = engine.respond_with_rng(None, &BehaviorSignal::default(), None, &mut rng);

        assert!(night.tones.commands()[0].gain_peak < day.tones.commands()[0].gain_peak);
    }

    struct FailingSink;

    impl PlaybackSink for FailingSink {
        fn play(&self, _sequence: ToneSequence) -> BoxFuture<'_, Result<(), PlaybackError>> {
            async move {
                Err(PlaybackError::AudioOutputUnavailable {
                    details: "no device in test".to_owned(),
                })
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn playback_failure_is_swallowed() {
        let engine = FeedbackEngine::new(EngineConfig::default(), FailingSink);
        let response = engine.respond(None, &BehaviorSignal::default(), None);
        // Must not panic or surface the error.
        engine.play(response.tones).await;
    }
}
