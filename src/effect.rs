//! Effects - side effects declared by the reducer, and the runner that performs them

use tracing::{debug, warn};

use crate::action::Action;
use crate::api::OpenWeatherClient;
use crate::locate::Locator;
use crate::state::Coordinates;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the location service for the viewer's coordinates
    Locate,
    /// Fetch weather at the given coordinates
    FetchByCoords { seq: u64, coords: Coordinates },
    /// Fetch weather for a city name (already trimmed)
    FetchByName { seq: u64, city: String },
}

impl Effect {
    /// Task key; weather lookups share one so a newer lookup supersedes the old task.
    pub fn task_key(&self) -> &'static str {
        match self {
            Effect::Locate => "locate",
            Effect::FetchByCoords { .. } | Effect::FetchByName { .. } => "weather",
        }
    }
}

/// Performs effects against the provider and location service
#[derive(Clone, Debug)]
pub struct EffectRunner {
    client: OpenWeatherClient,
    locator: Locator,
}

impl EffectRunner {
    pub fn new(client: OpenWeatherClient, locator: Locator) -> Self {
        Self { client, locator }
    }

    /// Run one effect to completion and turn its outcome into an action.
    pub async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::Locate => match self.locator.locate(self.client.http()).await {
                Ok(coords) => {
                    debug!(lat = coords.lat, lon = coords.lon, "location resolved");
                    Action::LocateDidResolve(coords)
                }
                Err(e) => {
                    warn!(error = %e, "location access denied, using default city");
                    Action::LocateDidFail(e.to_string())
                }
            },
            Effect::FetchByCoords { seq, coords } => {
                match self.client.fetch_by_coords(coords).await {
                    Ok(snapshot) => Action::WeatherDidLoad { seq, snapshot },
                    Err(e) => {
                        warn!(seq, error = %e, "coordinate lookup failed");
                        Action::WeatherDidError {
                            seq,
                            message: e.to_string(),
                        }
                    }
                }
            }
            Effect::FetchByName { seq, city } => match self.client.fetch_by_city(&city).await {
                Ok(snapshot) => Action::WeatherDidLoad { seq, snapshot },
                Err(e) => {
                    warn!(seq, city = %city, error = %e, "city lookup failed");
                    Action::WeatherDidError {
                        seq,
                        message: e.to_string(),
                    }
                }
            },
        }
    }
}
