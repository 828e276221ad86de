//! OpenWeather current-conditions client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::condition::Condition;
use crate::config::ProviderConfig;
use crate::state::{Coordinates, WeatherSnapshot};

/// Provider lookup errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {0}")]
    Status(StatusCode),

    /// Body did not match the expected shape
    #[error("response parse error: {0}")]
    Parse(String),
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct OwResponse {
    name: String,
    #[serde(default)]
    visibility: u32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

impl TryFrom<OwResponse> for WeatherSnapshot {
    type Error = ApiError;

    fn try_from(body: OwResponse) -> Result<Self, Self::Error> {
        let primary = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("response contained no weather entry".into()))?;

        Ok(WeatherSnapshot {
            name: body.name,
            country: body.sys.country,
            condition: Condition::from_main(&primary.main),
            condition_id: primary.id,
            description: primary.description,
            temperature: body.main.temp,
            feels_like: body.main.feels_like,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
            visibility: body.visibility,
            pressure: body.main.pressure,
            sunrise: body.sys.sunrise,
            sunset: body.sys.sunset,
        })
    }
}

/// Parse a `/weather` response body into a snapshot.
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, ApiError> {
    let parsed: OwResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    WeatherSnapshot::try_from(parsed)
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Shared HTTP client (reused by the location service)
    pub fn http(&self) -> &Client {
        &self.http
    }

    #[instrument(skip(self), fields(lat = coords.lat, lon = coords.lon))]
    pub async fn fetch_by_coords(&self, coords: Coordinates) -> Result<WeatherSnapshot, ApiError> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            coords.lat,
            coords.lon,
            urlencoding::encode(&self.api_key)
        );
        self.get_snapshot(&url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherSnapshot, ApiError> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        );
        self.get_snapshot(&url).await
    }

    async fn get_snapshot(&self, url: &str) -> Result<WeatherSnapshot, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!(%status, "provider responded");
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text().await?;
        parse_snapshot(&body)
    }
}
