//! Weather adapters - implementations of the WeatherService port.
//!
//! - **WeatherCompanyService** - Weather Company Data HTTP API
//! - **MockWeatherService** - in-memory places and observation (testing)

mod mock;
mod weather_company;

pub use mock::MockWeatherService;
pub use weather_company::WeatherCompanyService;
