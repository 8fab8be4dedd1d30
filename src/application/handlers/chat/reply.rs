use serde_json::Value;

/// What the message engine answers.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Reply lines, shown in order.
    Lines(Vec<String>),
    /// The assistant produced no output; carries its raw payload.
    NotFound(Value),
}

impl Reply {
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Reply::Lines(lines) => Some(lines),
            Reply::NotFound(_) => None,
        }
    }
}
