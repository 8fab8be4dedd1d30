//! Mock weather service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::weather::{Coordinates, Observation, UnitSystem};
use crate::ports::{ServiceError, WeatherService};

/// In-memory weather service with known places and a fixed observation.
#[derive(Debug, Clone, Default)]
pub struct MockWeatherService {
    places: Arc<Mutex<HashMap<String, Coordinates>>>,
    observation: Arc<Mutex<Option<Observation>>>,
    fail_with_status: Option<u16>,
    lookups: Arc<Mutex<Vec<String>>>,
    observed: Arc<Mutex<Vec<(Coordinates, UnitSystem)>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockWeatherService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a place name resolvable (case-insensitive).
    pub fn with_place(self, name: &str, coordinates: Coordinates) -> Self {
        lock(&self.places).insert(name.to_lowercase(), coordinates);
        self
    }

    /// Sets the observation returned for every location.
    pub fn with_observation(self, observation: Observation) -> Self {
        *lock(&self.observation) = Some(observation);
        self
    }

    /// Makes every call fail with the given HTTP status.
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with_status = Some(status);
        self
    }

    /// Place names looked up so far.
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }

    /// Locations observations were requested for.
    pub fn observed(&self) -> Vec<(Coordinates, UnitSystem)> {
        lock(&self.observed).clone()
    }

    fn check(&self) -> Result<(), ServiceError> {
        match self.fail_with_status {
            Some(status) => Err(ServiceError::status("weather", status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn resolve_location(&self, query: &str) -> Result<Option<Coordinates>, ServiceError> {
        lock(&self.lookups).push(query.to_string());
        self.check()?;
        Ok(lock(&self.places).get(&query.to_lowercase()).copied())
    }

    async fn current_conditions(
        &self,
        location: &Coordinates,
        units: UnitSystem,
    ) -> Result<Option<Observation>, ServiceError> {
        lock(&self.observed).push((*location, units));
        self.check()?;
        Ok(lock(&self.observation).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_places_only() {
        let service = MockWeatherService::new().with_place("Paris", Coordinates::new(48.86, 2.34));

        assert_eq!(
            service.resolve_location("paris").await.unwrap(),
            Some(Coordinates::new(48.86, 2.34))
        );
        assert_eq!(service.resolve_location("Atlantis").await.unwrap(), None);
        assert_eq!(service.lookups(), vec!["paris".to_string(), "Atlantis".to_string()]);
    }

    #[tokio::test]
    async fn failing_service_errors() {
        let service = MockWeatherService::new().failing(503);
        assert!(service.resolve_location("Paris").await.is_err());
    }
}
