//! Location service: resolves the viewer's coordinates once at start-up

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::state::Coordinates;

/// Default IP geolocation endpoint
pub const DEFAULT_LOCATE_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("location service unavailable")]
    Unavailable,

    #[error("location access denied: {0}")]
    Denied(String),

    #[error("location request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Where coordinates come from
#[derive(Clone, Debug, PartialEq)]
pub enum Locator {
    /// Coordinates given up front (command line)
    Fixed(Coordinates),
    /// HTTP geolocation lookup
    IpLookup { url: String },
    /// No location service; always unavailable
    Disabled,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl Locator {
    pub async fn locate(&self, http: &Client) -> Result<Coordinates, LocateError> {
        match self {
            Locator::Fixed(coords) => validated(*coords),
            Locator::Disabled => Err(LocateError::Unavailable),
            Locator::IpLookup { url } => {
                let response = http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LocateError::Denied(format!("lookup returned {status}")));
                }
                let body: LookupResponse = response.json().await?;
                debug!(?body, "geolocation lookup");

                if body.status.as_deref() == Some("fail") {
                    let reason = body.message.unwrap_or_else(|| "lookup failed".into());
                    return Err(LocateError::Denied(reason));
                }
                match (body.lat, body.lon) {
                    (Some(lat), Some(lon)) => validated(Coordinates::new(lat, lon)),
                    _ => Err(LocateError::Denied("no coordinates in response".into())),
                }
            }
        }
    }
}

fn validated(coords: Coordinates) -> Result<Coordinates, LocateError> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(LocateError::Denied(format!(
            "invalid coordinates {}, {}",
            coords.lat, coords.lon
        )))
    }
}
