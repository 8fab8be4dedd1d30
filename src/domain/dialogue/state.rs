use serde::{Deserialize, Serialize};

use crate::domain::classification::ClassificationResult;
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::weather::{Coordinates, Notion, NotionSet};

/// Entity group the assistant tags weather topics and places with.
const NOTION_ENTITY: &str = "notion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    Idle,
    AwaitingLocation,
}

impl StateMachine for DialoguePhase {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DialoguePhase::Idle => vec![DialoguePhase::AwaitingLocation],
            DialoguePhase::AwaitingLocation => vec![DialoguePhase::Idle],
        }
    }
}

/// A weather question waiting for the user to name a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDialogue {
    pub notions: NotionSet,
}

/// What a weather classification asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRequest {
    pub notions: NotionSet,
    /// First value of the notion group that is not itself a notion.
    pub location: Option<String>,
}

impl LocationRequest {
    pub fn from_classification(result: &ClassificationResult) -> Self {
        let mut notions = NotionSet::new();
        let mut location = None;

        for entity in result.entities().group(NOTION_ENTITY) {
            match Notion::from_entity_value(&entity.value) {
                Some(notion) => notions.insert(notion),
                None if location.is_none() => location = Some(entity.value.clone()),
                None => {}
            }
        }

        Self { notions, location }
    }
}

/// Everything remembered about one conversation between turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pending: Option<PendingDialogue>,
    /// Last place resolved for this conversation.
    location: Option<Coordinates>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DialoguePhase {
        if self.pending.is_some() {
            DialoguePhase::AwaitingLocation
        } else {
            DialoguePhase::Idle
        }
    }

    pub fn pending(&self) -> Option<&PendingDialogue> {
        self.pending.as_ref()
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Parks a weather question until the user supplies a location.
    pub fn await_location(&mut self, notions: NotionSet) -> Result<(), ValidationError> {
        self.phase().transition_to(DialoguePhase::AwaitingLocation)?;
        self.pending = Some(PendingDialogue { notions });
        Ok(())
    }

    /// Leaves the dialogue, returning what was pending if anything.
    pub fn finish(&mut self) -> Option<PendingDialogue> {
        self.pending.take()
    }

    pub fn remember_location(&mut self, coordinates: Coordinates) {
        self.location = Some(coordinates);
    }

    /// True when nothing is worth keeping for this conversation.
    pub fn is_blank(&self) -> bool {
        self.pending.is_none() && self.location.is_none()
    }
}
