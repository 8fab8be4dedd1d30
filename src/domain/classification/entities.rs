//! Entity records returned by an assistant and their lookup index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw entity as recognized by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity group, e.g. `notion` or `domain`.
    pub entity: String,
    /// Recognized value within the group, e.g. `temperature`.
    pub value: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Character span of the match in the input text.
    #[serde(default)]
    pub location: Option<Vec<usize>>,
}

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
            confidence: None,
            location: None,
        }
    }
}

/// Entities indexed by group name and by `(name, value)` pair.
///
/// Values inside a group keep the order in which they were first seen;
/// a repeated `(name, value)` replaces the stored record in place.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    by_pair: HashMap<(String, String), Entity>,
    values: HashMap<String, Vec<String>>,
    latest: HashMap<String, String>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) {
        let key = (entity.entity.clone(), entity.value.clone());
        if !self.by_pair.contains_key(&key) {
            self.values
                .entry(entity.entity.clone())
                .or_default()
                .push(entity.value.clone());
        }
        self.latest
            .insert(entity.entity.clone(), entity.value.clone());
        self.by_pair.insert(key, entity);
    }

    /// Exact `(name, value)` lookup.
    pub fn get(&self, name: &str, value: &str) -> Option<&Entity> {
        self.by_pair.get(&(name.to_string(), value.to_string()))
    }

    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.get(name, value).is_some()
    }

    /// All entities of a group, in first-seen order.
    pub fn group(&self, name: &str) -> Vec<&Entity> {
        self.values
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|value| self.get(name, value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The most recently recognized entity of a group.
    pub fn latest(&self, name: &str) -> Option<&Entity> {
        self.latest
            .get(name)
            .and_then(|value| self.get(name, value))
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

impl FromIterator<Entity> for EntityIndex {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut index = Self::new();
        for entity in iter {
            index.insert(entity);
        }
        index
    }
}
