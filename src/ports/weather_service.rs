//! Weather Service Port - location lookup and current conditions.

use async_trait::async_trait;

use crate::domain::weather::{Coordinates, Observation, UnitSystem};

use super::ServiceError;

/// Port for a weather data provider.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Resolves a free-text place name.
    ///
    /// Returns `Ok(None)` when the provider knows no such place.
    async fn resolve_location(&self, query: &str) -> Result<Option<Coordinates>, ServiceError>;

    /// Fetches the latest observation at a location.
    ///
    /// Returns `Ok(None)` when no observation is available.
    async fn current_conditions(
        &self,
        location: &Coordinates,
        units: UnitSystem,
    ) -> Result<Option<Observation>, ServiceError>;
}
