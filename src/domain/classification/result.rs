//! Provider-independent classification result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entities::{Entity, EntityIndex};
use super::text::split_lines;

/// Confidence assigned to reply segments the provider sent no intent for.
pub const UNMATCHED_CONFIDENCE: f64 = 1.0;

/// An intent as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedIntent {
    pub intent: String,
    pub confidence: f64,
}

impl RecognizedIntent {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self {
            intent: intent.into(),
            confidence,
        }
    }
}

/// One reply segment paired with the intent at the same position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub intent: Option<String>,
    pub confidence: f64,
}

/// Uniform view over a v1 or v2 assistant response.
///
/// Only the first segment drives `intent`, `confidence` and `text`.
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    segments: Vec<Segment>,
    entities: EntityIndex,
    raw: Value,
}

impl ClassificationResult {
    /// Pairs reply texts with intents by position.
    ///
    /// The intent list may be shorter than the text list; unmatched texts get
    /// no intent and [`UNMATCHED_CONFIDENCE`]. Surplus intents are dropped.
    pub fn normalize(
        texts: Vec<String>,
        intents: Vec<RecognizedIntent>,
        entities: Vec<Entity>,
        raw: Value,
    ) -> Self {
        let mut intents = intents.into_iter();
        let segments = texts
            .into_iter()
            .map(|text| match intents.next() {
                Some(found) => Segment {
                    text,
                    intent: Some(found.intent),
                    confidence: found.confidence,
                },
                None => Segment {
                    text,
                    intent: None,
                    confidence: UNMATCHED_CONFIDENCE,
                },
            })
            .collect();

        Self {
            segments,
            entities: entities.into_iter().collect(),
            raw,
        }
    }

    /// A result with no output segments.
    pub fn empty(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Top intent, if the first segment carried one.
    pub fn intent(&self) -> Option<&str> {
        self.segments.first().and_then(|s| s.intent.as_deref())
    }

    pub fn confidence(&self) -> Option<f64> {
        self.segments.first().map(|s| s.confidence)
    }

    /// Reply lines of the first segment.
    pub fn text(&self) -> Vec<String> {
        self.segments
            .first()
            .map(|s| split_lines(&s.text))
            .unwrap_or_default()
    }

    pub fn entities(&self) -> &EntityIndex {
        &self.entities
    }

    /// Provider payload this result was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn has_intent(&self, name: &str) -> bool {
        self.intent() == Some(name)
    }

    /// True when an intent was recognized with `confidence >= threshold`.
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.intent().is_some() && self.confidence().is_some_and(|c| c >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_result_has_nothing() {
        let result = ClassificationResult::normalize(vec![], vec![], vec![], json!({}));

        assert!(result.is_empty());
        assert_eq!(result.intent(), None);
        assert_eq!(result.confidence(), None);
        assert!(result.text().is_empty());
        assert!(!result.is_confident(0.0));
    }

    #[test]
    fn texts_pair_with_intents_by_position() {
        let result = ClassificationResult::normalize(
            texts(&["Hello", "Second"]),
            vec![RecognizedIntent::new("greeting", 0.97)],
            vec![],
            json!({}),
        );

        assert_eq!(result.segments().len(), 2);
        assert_eq!(result.intent(), Some("greeting"));
        assert_eq!(result.confidence(), Some(0.97));
        assert_eq!(result.segments()[1].intent, None);
        assert_eq!(result.segments()[1].confidence, UNMATCHED_CONFIDENCE);
    }

    #[test]
    fn missing_intents_pad_with_sentinel() {
        let result = ClassificationResult::normalize(
            texts(&["I did not get that"]),
            vec![],
            vec![],
            json!({}),
        );

        assert!(!result.is_empty());
        assert_eq!(result.intent(), None);
        assert_eq!(result.confidence(), Some(1.0));
        assert!(!result.is_confident(0.5));
    }

    #[test]
    fn surplus_intents_are_dropped() {
        let result = ClassificationResult::normalize(
            texts(&["Only one"]),
            vec![
                RecognizedIntent::new("a", 0.9),
                RecognizedIntent::new("b", 0.8),
            ],
            vec![],
            json!({}),
        );
        assert_eq!(result.segments().len(), 1);
    }

    #[test]
    fn text_splits_first_segment_only() {
        let result = ClassificationResult::normalize(
            texts(&["Line one.\n  Line two.", "Ignored"]),
            vec![],
            vec![],
            json!({}),
        );
        assert_eq!(result.text(), vec!["Line one.", "Line two."]);
    }

    #[test]
    fn confidence_threshold_is_inclusive() {
        let result = ClassificationResult::normalize(
            texts(&["ok"]),
            vec![RecognizedIntent::new("weather", 0.9)],
            vec![],
            json!({}),
        );
        assert!(result.is_confident(0.9));
        assert!(!result.is_confident(0.90001));
        assert!(result.has_intent("weather"));
    }

    #[test]
    fn entities_and_raw_are_kept() {
        let raw = json!({"output": {"generic": []}});
        let result = ClassificationResult::normalize(
            texts(&["x"]),
            vec![],
            vec![Entity::new("notion", "humidity")],
            raw.clone(),
        );
        assert!(result.entities().contains("notion", "humidity"));
        assert_eq!(result.raw(), &raw);
    }
}
