use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved place on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.latitude, self.longitude)
    }
}

/// Measurement system for observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Single-letter code used by the weather API.
    pub fn api_code(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "e",
        }
    }

    pub fn from_api_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(UnitSystem::Metric),
            "e" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => " km/h",
            UnitSystem::Imperial => " mph",
        }
    }
}

/// Renders a reading without a trailing `.0` for whole numbers.
pub fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    pub value: f64,
    pub feels_like: f64,
    pub units: UnitSystem,
}

impl Temperature {
    pub fn value_label(&self) -> String {
        format!("{}{}", format_reading(self.value), self.units.temperature_suffix())
    }

    pub fn feel_label(&self) -> String {
        format!(
            "{}{}",
            format_reading(self.feels_like),
            self.units.temperature_suffix()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub speed: f64,
    /// Cardinal direction such as `NNE`; empty when calm or unknown.
    pub direction: String,
    pub units: UnitSystem,
}

impl Wind {
    pub fn speed_label(&self) -> String {
        format!("{}{}", format_reading(self.speed), self.units.speed_suffix())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Precipitation {
    pub total: Option<f64>,
    pub hourly: Option<f64>,
    pub snow_hourly: Option<f64>,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Short description such as "Partly Cloudy".
    pub phrase: Option<String>,
    pub temperature: Option<Temperature>,
    pub wind: Option<Wind>,
    pub precipitation: Precipitation,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub units: UnitSystem,
}
