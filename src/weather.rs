//! Weather Gateway
//!
//! Thin client over the OpenWeatherMap current-weather endpoint. Accepts a
//! city name or a full lat/lon pair, forwards one GET, and reshapes the
//! provider payload into the subset this API exposes. No retry, no timeout.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Location selector from the query string: `city`, or `lat` + `lon` together.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Reshaped weather response returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: f64,
    pub description: String,
    pub city: String,
}

// ============================================================================
// Provider payload (subset of the OpenWeatherMap response)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    description: String,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch current weather for the requested location.
    ///
    /// A city name takes precedence when both forms are supplied; an empty or
    /// whitespace-only city counts as absent. Requests with neither a city nor
    /// a complete coordinate pair are rejected before any network traffic.
    pub async fn fetch(&self, location: &LocationQuery) -> Result<WeatherReport, AppError> {
        let city = location
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty());

        let mut params: Vec<(&str, String)> = match (city, location.lat, location.lon) {
            (Some(city), _, _) => vec![("q", city.to_string())],
            (None, Some(lat), Some(lon)) => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            _ => return Err(AppError::MissingLocation),
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let provider: ProviderResponse = response.json().await?;

        let description = provider
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| {
                AppError::Internal("Weather provider returned no conditions".to_string())
            })?;

        Ok(WeatherReport {
            temperature: provider.main.temp,
            humidity: provider.main.humidity,
            description,
            city: provider
                .name
                .unwrap_or_else(|| "Your Location".to_string()),
        })
    }
}
