use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A weather topic a user can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notion {
    Forecast,
    Humidity,
    Precipitation,
    Pressure,
    Temperature,
    Visibility,
    /// General conditions; stands for temperature and wind speed.
    Weather,
    WindSpeed,
}

impl Notion {
    pub const ALL: [Notion; 8] = [
        Notion::Forecast,
        Notion::Humidity,
        Notion::Precipitation,
        Notion::Pressure,
        Notion::Temperature,
        Notion::Visibility,
        Notion::Weather,
        Notion::WindSpeed,
    ];

    /// Parses an entity value as emitted by the assistant.
    pub fn from_entity_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Notion::Forecast => "forecast",
            Notion::Humidity => "humidity",
            Notion::Precipitation => "precipitation",
            Notion::Pressure => "pressure",
            Notion::Temperature => "temperature",
            Notion::Visibility => "visibility",
            Notion::Weather => "weather",
            Notion::WindSpeed => "wind speed",
        }
    }
}

impl fmt::Display for Notion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The notions requested in one weather question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionSet(BTreeSet<Notion>);

impl NotionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, notion: Notion) {
        self.0.insert(notion);
    }

    pub fn contains(&self, notion: Notion) -> bool {
        self.0.contains(&notion)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Notion> + '_ {
        self.0.iter().copied()
    }

    /// Replaces the umbrella `weather` notion with what it stands for.
    pub fn expanded(&self) -> Self {
        let mut out = self.clone();
        if out.contains(Notion::Weather) {
            out.insert(Notion::Temperature);
            out.insert(Notion::WindSpeed);
        }
        out
    }
}

impl FromIterator<Notion> for NotionSet {
    fn from_iter<I: IntoIterator<Item = Notion>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
