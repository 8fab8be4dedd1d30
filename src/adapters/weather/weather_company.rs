//! Weather Company Data adapter - location search and current observations.
//!
//! # Endpoints
//!
//! - `GET https://{host}/api/weather/v3/location/search?query=..&language=..`
//! - `GET https://{host}/api/weather/v1/geocode/{lat}/{lon}/observations.json?units=m|e&language=..`
//!
//! Both use basic auth.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::domain::weather::{
    Coordinates, Observation, Precipitation, Temperature, UnitSystem, Wind,
};
use crate::ports::{ServiceError, WeatherService};

const SERVICE: &str = "weather";

/// Weather data provider reached over HTTPS.
#[derive(Debug)]
pub struct WeatherCompanyService {
    client: Client,
    base_url: String,
    username: String,
    password: Secret<String>,
    language: String,
    timeout: Duration,
}

impl WeatherCompanyService {
    pub fn new(
        host: &str,
        username: impl Into<String>,
        password: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Self::with_base_url(format!("https://{}/api/weather", host), username, password, timeout)
    }

    /// Uses an explicit base URL, e.g. a plain-HTTP stand-in during tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::network(SERVICE, e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password,
            language: "en-US".to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(
            &config.host,
            config.username.clone(),
            config.password.clone(),
            config.timeout(),
        )?
        .with_language(config.language.clone()))
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn location_url(&self) -> String {
        format!("{}/v3/location/search", self.base_url)
    }

    fn observations_url(&self, location: &Coordinates) -> String {
        format!(
            "{}/v1/geocode/{}/{}/observations.json",
            self.base_url, location.latitude, location.longitude
        )
    }

    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Response, ServiceError> {
        tracing::debug!(%url, "Calling weather service");
        self.client
            .get(url)
            .query(&[("language", self.language.as_str())])
            .query(params)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, self.timeout.as_secs()))
    }
}

/// True for statuses that mean "nothing here" rather than a failure.
fn is_absent(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::NO_CONTENT | StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND
    )
}

#[async_trait]
impl WeatherService for WeatherCompanyService {
    async fn resolve_location(&self, query: &str) -> Result<Option<Coordinates>, ServiceError> {
        let response = self.get(&self.location_url(), &[("query", query)]).await?;
        let status = response.status();

        if is_absent(status) {
            tracing::warn!(query, status = status.as_u16(), "Location not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::status(SERVICE, status.as_u16()));
        }

        let body: LocationSearchResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::parse(SERVICE, e.to_string()))?;

        Ok(body.location.first())
    }

    async fn current_conditions(
        &self,
        location: &Coordinates,
        units: UnitSystem,
    ) -> Result<Option<Observation>, ServiceError> {
        let response = self
            .get(&self.observations_url(location), &[("units", units.api_code())])
            .await?;
        let status = response.status();

        if is_absent(status) {
            tracing::warn!(%location, status = status.as_u16(), "No observation available");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::status(SERVICE, status.as_u16()));
        }

        let body: ObservationResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::parse(SERVICE, e.to_string()))?;

        Ok(body.into_observation(units))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// API types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct LocationSearchResponse {
    location: LocationMatches,
}

/// Parallel arrays, one entry per match, best match first.
#[derive(Debug, Deserialize)]
struct LocationMatches {
    #[serde(default)]
    latitude: Vec<f64>,
    #[serde(default)]
    longitude: Vec<f64>,
}

impl LocationMatches {
    fn first(&self) -> Option<Coordinates> {
        match (self.latitude.first(), self.longitude.first()) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    #[serde(default)]
    metadata: Option<ObservationMetadata>,
    observation: Option<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct ObservationMetadata {
    units: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawObservation {
    wx_phrase: Option<String>,
    temp: Option<f64>,
    feels_like: Option<f64>,
    wspd: Option<f64>,
    wdir_cardinal: Option<String>,
    precip_total: Option<f64>,
    precip_hrly: Option<f64>,
    snow_hrly: Option<f64>,
    pressure: Option<f64>,
    vis: Option<f64>,
}

impl ObservationResponse {
    fn into_observation(self, requested: UnitSystem) -> Option<Observation> {
        let units = self
            .metadata
            .and_then(|m| m.units)
            .and_then(|code| UnitSystem::from_api_code(&code))
            .unwrap_or(requested);
        let raw = self.observation?;

        Some(Observation {
            phrase: raw.wx_phrase,
            temperature: raw.temp.map(|value| Temperature {
                value,
                feels_like: raw.feels_like.unwrap_or(value),
                units,
            }),
            wind: raw.wspd.map(|speed| Wind {
                speed,
                direction: raw.wdir_cardinal.unwrap_or_default(),
                units,
            }),
            precipitation: Precipitation {
                total: raw.precip_total,
                hourly: raw.precip_hrly,
                snow_hourly: raw.snow_hrly,
            },
            pressure: raw.pressure,
            visibility: raw.vis,
            units,
        })
    }
}
