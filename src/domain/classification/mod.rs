//! Classification module - what an assistant understood from an utterance.

mod entities;
mod result;
mod teaching;
mod text;

pub use entities::{Entity, EntityIndex};
pub use result::{ClassificationResult, RecognizedIntent, Segment, UNMATCHED_CONFIDENCE};
pub use teaching::{DialogReply, IntentExample, IntentTeaching};
pub use text::{clean_input, split_lines};
