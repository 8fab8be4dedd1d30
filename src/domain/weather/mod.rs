//! Weather module - notions, observations and answer composition.

mod answer;
mod notion;
mod observation;

pub use answer::compose_answer;
pub use notion::{Notion, NotionSet};
pub use observation::{
    format_reading, Coordinates, Observation, Precipitation, Temperature, UnitSystem, Wind,
};
