//! Fallback module - when a primary classification is not good enough.

use crate::domain::classification::ClassificationResult;
use crate::domain::foundation::ValidationError;

/// Default threshold below which the secondary assistant is consulted.
pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 0.9;

/// Minimum confidence a primary classification needs to stand on its own.
///
/// Always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FallbackThreshold(f64);

impl FallbackThreshold {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range("threshold", 0.0, 1.0, value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether `result` should be handed to the secondary assistant.
    ///
    /// Empty results are never delegated. A result with no intent is always
    /// delegated; otherwise only confidence strictly below the threshold is.
    pub fn should_delegate(&self, result: &ClassificationResult) -> bool {
        if result.is_empty() {
            return false;
        }
        match (result.intent(), result.confidence()) {
            (Some(_), Some(confidence)) => confidence < self.0,
            _ => true,
        }
    }
}

impl Default for FallbackThreshold {
    fn default() -> Self {
        Self(DEFAULT_FALLBACK_THRESHOLD)
    }
}
