use crate::emotion::{BehaviorSignal, Emotion, EmotionState, Intensity, InteractionKind};
use std::time::Duration;

const COMPLETION_OVERRIDE_THRESHOLD: f32 = 0.7;
const COMPLETION_INTENSITY_BOOST: f32 = 0.2;
const QUICK_CLICK_MAX: Duration = Duration::from_millis(1000);
const LONG_HOVER_MIN: Duration = Duration::from_millis(3000);

/// Three disjoint keyword sets checked in priority order
/// (positive > negative > confused). Matching is case-folded substring
/// containment, so multi-byte CJK keywords work without tokenization.
#[derive(Clone, Debug)]
pub struct Lexicon {
    positive: Vec<&'static str>,
    negative: Vec<&'static str>,
    confused: Vec<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: vec![
                "很好", "棒", "喜欢", "开心", "满意", "成功", "完成", "awesome", "great", "love",
                "happy",
            ],
            negative: vec![
                "难", "困难", "不懂", "错误", "失败", "焦虑", "担心", "difficult", "worried",
                "anxious", "terrible",
            ],
            confused: vec![
                "不明白",
                "疑问",
                "怎么",
                "为什么",
                "如何",
                "confused",
                "don't understand",
                "puzzled",
            ],
        }
    }
}

impl Lexicon {
    fn matches(words: &[&'static str], input: &str) -> bool {
        words.iter().any(|w| input.contains(w))
    }

    /// First-match-wins text classification. `None` when no set matches.
    fn classify_text(&self, input: &str) -> Option<(Emotion, Intensity)> {
        let folded = input.to_lowercase();
        if Self::matches(&self.positive, &folded) {
            Some((Emotion::Happy, Intensity::new(0.8)))
        } else if Self::matches(&self.negative, &folded) {
            Some((Emotion::Anxious, Intensity::new(0.7)))
        } else if Self::matches(&self.confused, &folded) {
            Some((Emotion::Confused, Intensity::new(0.6)))
        } else {
            None
        }
    }
}

/// Keyword/rule-based classifier. Deterministic given its inputs and lexicon;
/// never errors, unparseable input is treated as "no match".
#[derive(Clone, Debug, Default)]
pub struct EmotionClassifier {
    lexicon: Lexicon,
}

impl EmotionClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, input: Option<&str>, behavior: &BehaviorSignal) -> EmotionState {
        let text_hit = input.and_then(|s| self.lexicon.classify_text(s));
        let (mut emotion, mut intensity) =
            text_hit.unwrap_or((Emotion::Neutral, Intensity::default()));

        // Behavioral signal takes precedence over textual signal once the
        // completion threshold is crossed. Rate is clamped before comparison.
        let completion = behavior.completion_rate.map(|r| r.clamp(0.0, 1.0));
        let overridden = match completion {
            Some(rate) if rate > COMPLETION_OVERRIDE_THRESHOLD => {
                emotion = Emotion::Motivated;
                intensity = intensity.raised_by(COMPLETION_INTENSITY_BOOST);
                true
            }
            _ => false,
        };

        if text_hit.is_none() && !overridden {
            if let Some(kind) = behavior.interaction {
                let (e, i) = Self::classify_interaction(kind, behavior.duration);
                emotion = e;
                intensity = i;
            }
        }

        EmotionState::now(emotion, intensity)
    }

    fn classify_interaction(
        kind: InteractionKind,
        duration: Option<Duration>,
    ) -> (Emotion, Intensity) {
        let duration = duration.unwrap_or(Duration::ZERO);
        match kind {
            InteractionKind::QuickClick if duration < QUICK_CLICK_MAX => {
                (Emotion::Excited, Intensity::new(0.7))
            }
            InteractionKind::Hover if duration > LONG_HOVER_MIN => {
                (Emotion::Focused, Intensity::new(0.6))
            }
            InteractionKind::RepeatedClicks => (Emotion::Anxious, Intensity::new(0.6)),
            _ => (Emotion::Calm, Intensity::default()),
        }
    }
}

/// Day-part default mood: morning focus, afternoon creativity, evening calm.
pub fn classify_time_of_day(hour: u32) -> Emotion {
    match hour {
        6..=11 => Emotion::Focused,
        12..=17 => Emotion::Creative,
        _ => Emotion::Calm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> EmotionClassifier {
        EmotionClassifier::default()
    }

    #[test]
    fn positive_keyword_maps_to_happy() {
        let state = classifier().classify(
            Some("我完成了这个任务，感觉很棒！"),
            &BehaviorSignal::default(),
        );
        assert_eq!(state.emotion, Emotion::Happy);
        assert_eq!(state.intensity.value(), 0.8);
    }

    #[test]
    fn negative_keyword_maps_to_anxious() {
        let state = classifier().classify(
            Some("这个问题好难，我有点焦虑"),
            &BehaviorSignal::default(),
        );
        assert_eq!(state.emotion, Emotion::Anxious);
        assert_eq!(state.intensity.value(), 0.7);
    }

    #[test]
    fn confused_keyword_maps_to_confused() {
        let state = classifier().classify(Some("为什么会这样？"), &BehaviorSignal::default());
        assert_eq!(state.emotion, Emotion::Confused);
        assert_eq!(state.intensity.value(), 0.6);
    }

    #[test]
    fn no_match_is_neutral() {
        let state = classifier().classify(Some("今天天气一般"), &BehaviorSignal::default());
        assert_eq!(state.emotion, Emotion::Neutral);
        assert_eq!(state.intensity.value(), 0.5);

        let state = classifier().classify(None, &BehaviorSignal::default());
        assert_eq!(state.emotion, Emotion::Neutral);
        assert_eq!(state.intensity.value(), 0.5);
    }

    #[test]
    fn completion_rate_overrides_text() {
        let behavior = BehaviorSignal::default().with_completion_rate(0.9);
        let state = classifier().classify(Some("感觉很棒"), &behavior);
        assert_eq!(state.emotion, Emotion::Motivated);
        assert_eq!(state.intensity.value(), 1.0);
    }

    #[test]
    fn completion_rate_without_text_raises_neutral_base() {
        let behavior = BehaviorSignal::default().with_completion_rate(0.9);
        let state = classifier().classify(None, &behavior);
        assert_eq!(state.emotion, Emotion::Motivated);
        assert_eq!(state.intensity.value(), 0.7);
    }

    #[test]
    fn completion_rate_is_clamped_before_comparison() {
        let over = classifier().classify(None, &BehaviorSignal::default().with_completion_rate(1.5));
        let exact =
            classifier().classify(None, &BehaviorSignal::default().with_completion_rate(1.0));
        assert_eq!(over.emotion, exact.emotion);
        assert_eq!(over.intensity, exact.intensity);
    }

    #[test]
    fn below_threshold_completion_does_not_override() {
        let behavior = BehaviorSignal::default().with_completion_rate(0.5);
        let state = classifier().classify(Some("感觉很棒"), &behavior);
        assert_eq!(state.emotion, Emotion::Happy);
    }

    #[test]
    fn interaction_mapping() {
        let c = classifier();
        let quick = BehaviorSignal::default()
            .with_interaction(InteractionKind::QuickClick, Duration::from_millis(400));
        assert_eq!(c.classify(None, &quick).emotion, Emotion::Excited);

        let hover = BehaviorSignal::default()
            .with_interaction(InteractionKind::Hover, Duration::from_millis(5000));
        assert_eq!(c.classify(None, &hover).emotion, Emotion::Focused);

        let bursts = BehaviorSignal::default()
            .with_interaction(InteractionKind::RepeatedClicks, Duration::from_millis(2000));
        assert_eq!(c.classify(None, &bursts).emotion, Emotion::Anxious);

        let idle = BehaviorSignal::default()
            .with_interaction(InteractionKind::Other, Duration::from_millis(2000));
        assert_eq!(c.classify(None, &idle).emotion, Emotion::Calm);
    }

    #[test]
    fn text_match_wins_over_interaction() {
        let behavior = BehaviorSignal::default()
            .with_interaction(InteractionKind::QuickClick, Duration::from_millis(100));
        let state = classifier().classify(Some("这太难了"), &behavior);
        assert_eq!(state.emotion, Emotion::Anxious);
    }

    #[test]
    fn time_of_day_defaults() {
        assert_eq!(classify_time_of_day(8), Emotion::Focused);
        assert_eq!(classify_time_of_day(14), Emotion::Creative);
        assert_eq!(classify_time_of_day(20), Emotion::Calm);
        assert_eq!(classify_time_of_day(2), Emotion::Calm);
    }
}
