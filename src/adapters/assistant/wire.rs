//! JSON contracts of the v1 (workspace) and v2 (assistant/session) message APIs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::classification::{ClassificationResult, Entity, IntentTeaching, RecognizedIntent};

/// Intent as sent to and returned by both API generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireIntent {
    pub intent: String,
    pub confidence: f64,
}

impl WireIntent {
    /// A forced intent, recognized with full confidence.
    pub fn forced(intent: &str) -> Self {
        Self {
            intent: intent.to_string(),
            confidence: 1.0,
        }
    }
}

impl From<WireIntent> for RecognizedIntent {
    fn from(wire: WireIntent) -> Self {
        RecognizedIntent::new(wire.intent, wire.confidence)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// v2
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct V2MessageRequest<'a> {
    pub input: V2Input<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
pub struct V2Input<'a> {
    pub message_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<WireIntent>,
    pub options: V2InputOptions,
}

#[derive(Debug, Serialize)]
pub struct V2InputOptions {
    pub return_context: bool,
}

impl<'a> V2MessageRequest<'a> {
    pub fn new(
        text: Option<&'a str>,
        intents: &[String],
        context: Option<&'a Value>,
        return_context: bool,
    ) -> Self {
        Self {
            input: V2Input {
                message_type: "text",
                text,
                intents: intents.iter().map(|i| WireIntent::forced(i)).collect(),
                options: V2InputOptions { return_context },
            },
            context,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct V2SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct V2MessageResponse {
    #[serde(default)]
    pub output: V2Output,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct V2Output {
    #[serde(default)]
    pub generic: Vec<V2Generic>,
    #[serde(default)]
    pub intents: Vec<WireIntent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub struct V2Generic {
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl V2MessageResponse {
    /// Normalizes the output, keeping only generic items that carry text.
    pub fn into_result(self, raw: Value) -> ClassificationResult {
        let texts = self
            .output
            .generic
            .into_iter()
            .filter_map(|g| g.text)
            .collect();
        ClassificationResult::normalize(
            texts,
            self.output.intents.into_iter().map(Into::into).collect(),
            self.output.entities,
            raw,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// v1
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct V1MessageRequest<'a> {
    pub input: V1Input<'a>,
    pub alternate_intents: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<WireIntent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
pub struct V1Input<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

impl<'a> V1MessageRequest<'a> {
    pub fn new(text: Option<&'a str>, intents: &[String], context: Option<&'a Value>) -> Self {
        Self {
            input: V1Input { text },
            alternate_intents: false,
            intents: intents.iter().map(|i| WireIntent::forced(i)).collect(),
            context,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct V1MessageResponse {
    #[serde(default)]
    pub intents: Vec<WireIntent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub output: V1Output,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct V1Output {
    #[serde(default)]
    pub text: Vec<String>,
}

impl V1MessageResponse {
    pub fn into_result(self, raw: Value) -> ClassificationResult {
        ClassificationResult::normalize(
            self.output.text,
            self.intents.into_iter().map(Into::into).collect(),
            self.entities,
            raw,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct V1CreateIntent<'a> {
    pub intent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub examples: Vec<V1Example<'a>>,
}

#[derive(Debug, Serialize)]
pub struct V1Example<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct V1CreateDialogNode<'a> {
    pub dialog_node: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub conditions: String,
    pub output: V1NodeOutput<'a>,
}

#[derive(Debug, Serialize)]
pub struct V1NodeOutput<'a> {
    pub generic: Vec<V1NodeGeneric<'a>>,
}

#[derive(Debug, Serialize)]
pub struct V1NodeGeneric<'a> {
    pub response_type: &'static str,
    pub values: Vec<V1NodeText<'a>>,
}

#[derive(Debug, Serialize)]
pub struct V1NodeText<'a> {
    pub text: &'a str,
}

impl<'a> V1CreateIntent<'a> {
    pub fn from_teaching(teaching: &'a IntentTeaching) -> Self {
        Self {
            intent: teaching.name.as_str(),
            description: teaching.description.as_deref(),
            examples: vec![V1Example {
                text: teaching.example.as_str(),
            }],
        }
    }
}

impl<'a> V1CreateDialogNode<'a> {
    pub fn from_teaching(teaching: &'a IntentTeaching) -> Self {
        Self {
            dialog_node: teaching.name.as_str(),
            description: teaching.description.as_deref(),
            conditions: teaching.condition(),
            output: V1NodeOutput {
                generic: vec![V1NodeGeneric {
                    response_type: "text",
                    values: vec![V1NodeText {
                        text: teaching.reply.as_str(),
                    }],
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v2_request_carries_forced_intents_and_context() {
        let context = json!({"skills": {}});
        let request = V2MessageRequest::new(None, &["welcome".to_string()], Some(&context), true);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["input"]["message_type"], "text");
        assert!(body["input"].get("text").is_none());
        assert_eq!(body["input"]["intents"][0]["intent"], "welcome");
        assert_eq!(body["input"]["intents"][0]["confidence"], 1.0);
        assert_eq!(body["input"]["options"]["return_context"], true);
        assert_eq!(body["context"], context);
    }

    #[test]
    fn v2_response_normalizes_text_items() {
        let raw = json!({
            "output": {
                "generic": [
                    {"response_type": "text", "text": "Where are you?"},
                    {"response_type": "pause", "time": 500}
                ],
                "intents": [{"intent": "weather", "confidence": 0.97}],
                "entities": [{"entity": "notion", "value": "temperature", "location": [4, 15], "confidence": 1}]
            },
            "context": {"global": {}}
        });

        let response: V2MessageResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(response.context.is_some());
        let result = response.into_result(raw);

        assert_eq!(result.segments().len(), 1);
        assert_eq!(result.intent(), Some("weather"));
        assert_eq!(result.confidence(), Some(0.97));
        assert!(result.entities().contains("notion", "temperature"));
    }

    #[test]
    fn v2_empty_output_is_empty_result() {
        let raw = json!({"output": {"generic": []}});
        let response: V2MessageResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(response.into_result(raw).is_empty());
    }

    #[test]
    fn v1_request_disables_alternate_intents() {
        let request = V1MessageRequest::new(Some("hi"), &[], None);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["input"]["text"], "hi");
        assert_eq!(body["alternate_intents"], false);
        assert!(body.get("intents").is_none());
        assert!(body.get("context").is_none());
    }

    #[test]
    fn v1_response_pads_missing_intents() {
        let raw = json!({
            "intents": [],
            "entities": [{"entity": "domain", "value": "dev"}],
            "output": {"text": ["Line one", "Line two"]},
            "context": {"conversation_id": "abc"}
        });
        let response: V1MessageResponse = serde_json::from_value(raw.clone()).unwrap();
        let result = response.into_result(raw);

        assert_eq!(result.intent(), None);
        assert_eq!(result.confidence(), Some(1.0));
        assert_eq!(result.segments().len(), 2);
        assert_eq!(result.entities().latest("domain").unwrap().value, "dev");
    }

    #[test]
    fn teaching_payloads_share_the_intent_name() {
        let teaching = IntentTeaching::new(
            "who was ada lovelace",
            Some("Ada Lovelace".to_string()),
            "Ada Lovelace was a mathematician.",
        )
        .unwrap();

        let intent = serde_json::to_value(V1CreateIntent::from_teaching(&teaching)).unwrap();
        let node = serde_json::to_value(V1CreateDialogNode::from_teaching(&teaching)).unwrap();

        assert_eq!(intent["intent"], node["dialog_node"]);
        assert_eq!(intent["examples"][0]["text"], "who was ada lovelace");
        assert_eq!(node["conditions"], format!("#{}", teaching.name));
        assert_eq!(
            node["output"]["generic"][0]["values"][0]["text"],
            "Ada Lovelace was a mathematician."
        );
        assert_eq!(node["output"]["generic"][0]["response_type"], "text");
    }
}
