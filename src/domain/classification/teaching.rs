//! Value objects for teaching an assistant a new question/answer pair.

use crate::domain::foundation::{IntentName, ValidationError};

const MAX_EXAMPLE_CHARS: usize = 1024;
const MAX_REPLY_CHARS: usize = 4096;

/// A training utterance for a new intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentExample(String);

impl IntentExample {
    /// Trims and validates an example utterance.
    ///
    /// Must be 1..=1024 characters and contain no CR, LF or TAB.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("example"));
        }
        let len = text.chars().count();
        if len > MAX_EXAMPLE_CHARS {
            return Err(ValidationError::too_long("example", MAX_EXAMPLE_CHARS, len));
        }
        if text.contains(['\n', '\r', '\t']) {
            return Err(ValidationError::invalid_format(
                "example",
                "must not contain line breaks or tabs",
            ));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The reply a taught intent answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogReply(String);

impl DialogReply {
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("reply"));
        }
        let len = text.chars().count();
        if len > MAX_REPLY_CHARS {
            return Err(ValidationError::too_long("reply", MAX_REPLY_CHARS, len));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to register an intent and the dialog node answering it.
#[derive(Debug, Clone)]
pub struct IntentTeaching {
    pub name: IntentName,
    pub description: Option<String>,
    pub example: IntentExample,
    pub reply: DialogReply,
}

impl IntentTeaching {
    pub fn new(
        example: &str,
        description: Option<String>,
        reply: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: IntentName::generate(),
            description,
            example: IntentExample::new(example)?,
            reply: DialogReply::new(reply)?,
        })
    }

    /// Dialog condition that fires on this intent.
    pub fn condition(&self) -> String {
        format!("#{}", self.name)
    }
}
