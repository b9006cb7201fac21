use crate::emotion::Emotion;
use crate::persona::{tables, FeedbackPayload, PersonaStyle};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

const EMOJI_SUBSET_MIN: usize = 2;
const EMOJI_SUBSET_MAX: usize = 4;

/// Deterministic table lookup plus uniform random choice. Each call is
/// independent; repetition of phrases across calls is allowed and expected.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeedbackSelector;

impl FeedbackSelector {
    pub fn new() -> Self {
        Self
    }

    /// Compose a feedback payload for one classification event. Pure apart
    /// from the supplied RNG; plays no audio and triggers no animation.
    pub fn select<R: Rng + ?Sized>(
        &self,
        emotion: Emotion,
        persona: PersonaStyle,
        rng: &mut R,
    ) -> FeedbackPayload {
        let phrase = tables::phrases(emotion)
            .resolve(persona)
            .choose(rng)
            .copied()
            .unwrap_or_default();

        FeedbackPayload {
            text: phrase.to_owned(),
            emojis: self.pick_emojis(emotion, persona, rng),
            sound_tag: emotion.as_str().to_owned(),
            animation_tag: tables::animation_tag(emotion),
            visual_theme: tables::visual_theme(emotion),
        }
    }

    /// Shuffle the registered pool and take a uniform 2..=4 prefix. Pools are
    /// duplicate-free, so the subset never repeats a glyph within one call.
    fn pick_emojis<R: Rng + ?Sized>(
        &self,
        emotion: Emotion,
        persona: PersonaStyle,
        rng: &mut R,
    ) -> Vec<&'static str> {
        let pool = tables::emoji_pool(emotion).resolve(persona);
        let mut shuffled: Vec<&'static str> = pool.to_vec();
        shuffled.shuffle(rng);
        let take = rng
            .random_range(EMOJI_SUBSET_MIN..=EMOJI_SUBSET_MAX)
            .min(shuffled.len());
        shuffled.truncate(take);
        shuffled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::tables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn select_is_pool_valid_for_every_combination() {
        let selector = FeedbackSelector::new();
        let mut rng = StdRng::seed_from_u64(7);

        for emotion in Emotion::ALL {
            for persona in PersonaStyle::ALL {
                let payload = selector.select(emotion, persona, &mut rng);
                assert!(!payload.text.is_empty(), "{emotion}/{persona}");
                assert!(
                    (EMOJI_SUBSET_MIN..=EMOJI_SUBSET_MAX).contains(&payload.emojis.len()),
                    "{emotion}/{persona}: {} emojis",
                    payload.emojis.len()
                );

                let pool = tables::emoji_pool(emotion).resolve(persona);
                for glyph in &payload.emojis {
                    assert!(pool.contains(glyph), "{glyph} not in {emotion}/{persona} pool");
                }

                let phrases = tables::phrases(emotion).resolve(persona);
                assert!(phrases.contains(&payload.text.as_str()));
            }
        }
    }

    #[test]
    fn emoji_subset_has_no_duplicates() {
        let selector = FeedbackSelector::new();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let payload = selector.select(Emotion::Happy, PersonaStyle::Humor, &mut rng);
            let mut seen = std::collections::HashSet::new();
            for glyph in &payload.emojis {
                assert!(seen.insert(glyph));
            }
        }
    }

    #[test]
    fn repeated_calls_stay_valid_but_may_differ() {
        let selector = FeedbackSelector::new();
        let mut rng = StdRng::seed_from_u64(3);

        let a = selector.select(Emotion::Excited, PersonaStyle::Encourage, &mut rng);
        let b = selector.select(Emotion::Excited, PersonaStyle::Encourage, &mut rng);
        // Valid under repetition, not identical under repetition.
        assert!(!a.text.is_empty() && !b.text.is_empty());
        assert_eq!(a.sound_tag, b.sound_tag);
        assert_eq!(a.visual_theme, b.visual_theme);
    }

    #[test]
    fn sound_and_animation_tags_follow_emotion() {
        let selector = FeedbackSelector::new();
        let mut rng = StdRng::seed_from_u64(11);
        let payload = selector.select(Emotion::Focused, PersonaStyle::Warm, &mut rng);
        assert_eq!(payload.sound_tag, "focused");
        assert_eq!(payload.animation_tag, "pulse");
    }
}
