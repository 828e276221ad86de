//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::{background_for, Background, Condition};

/// Message shown when a coordinate lookup fails
pub const COORDS_ERROR_MESSAGE: &str = "Failed to fetch weather data";

/// Message shown when a city lookup fails
pub const CITY_ERROR_MESSAGE: &str = "City not found. Please try again.";

/// City queried when the location service is unavailable
pub const DEFAULT_CITY: &str = "London";

/// Spinner timing for the loading indicator.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// A latitude/longitude pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Current conditions from one successful lookup.
///
/// Never merged: a new lookup replaces the whole snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub name: String,
    pub country: String,
    pub condition: Condition,
    pub condition_id: u32,
    pub description: String,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    /// percent
    pub humidity: u8,
    /// m/s
    pub wind_speed: f64,
    /// meters
    pub visibility: u32,
    /// hPa
    pub pressure: u32,
    /// epoch seconds
    pub sunrise: i64,
    /// epoch seconds
    pub sunset: i64,
}

impl WeatherSnapshot {
    /// "Name, CC", or just the name when the provider omits the country
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }

    pub fn visibility_km(&self) -> f64 {
        f64::from(self.visibility) / 1000.0
    }
}

/// What a request was issued for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Query {
    Coords(Coordinates),
    City(String),
}

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Coords(_) => QueryKind::Coordinates,
            Query::City(_) => QueryKind::City,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum QueryKind {
    Coordinates,
    City,
}

/// The latest request still awaiting its result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PendingQuery {
    pub seq: u64,
    pub kind: QueryKind,
}

/// What happens to the last good snapshot when a lookup fails
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryPolicy {
    /// Keep showing the last snapshot and surface the error next to it
    #[default]
    Preserve,
    /// A failed city lookup clears the snapshot; coordinate failures keep it
    ClearOnCityMiss,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Query state ---
    /// Search field text
    #[debug(section = "Query", label = "City")]
    pub city: String,

    /// True exactly while the latest request is in flight
    #[debug(section = "Query", label = "Loading")]
    pub loading: bool,

    /// User-facing failure message
    #[debug(section = "Query", label = "Error", debug_fmt)]
    pub error: Option<String>,

    /// Last successful snapshot
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub weather: Option<WeatherSnapshot>,

    // --- Request bookkeeping ---
    /// Sequence number of the most recently issued request
    #[debug(section = "Requests", label = "Seq")]
    pub request_seq: u64,

    #[debug(section = "Requests", label = "Pending", debug_fmt)]
    pub pending: Option<PendingQuery>,

    /// Last issued query, re-run on refresh
    #[debug(section = "Requests", label = "Last query", debug_fmt)]
    pub last_query: Option<Query>,

    /// Whether the start-up location lookup is still outstanding
    #[debug(section = "Requests", label = "Locating")]
    pub locating: bool,

    // --- Settings ---
    #[debug(section = "Settings", label = "Default city")]
    pub default_city: String,

    #[debug(section = "Settings", label = "Recovery", debug_fmt)]
    pub recovery: RecoveryPolicy,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(default_city: impl Into<String>, recovery: RecoveryPolicy) -> Self {
        Self {
            city: String::new(),
            loading: false,
            error: None,
            weather: None,
            request_seq: 0,
            pending: None,
            last_query: None,
            locating: false,
            default_city: default_city.into(),
            recovery,
            tick_count: 0,
        }
    }

    pub fn background(&self) -> Background {
        background_for(self.weather.as_ref().map(|w| &w.condition))
    }

    /// Spinner glyph for the current tick
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.locating
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, RecoveryPolicy::default())
    }
}
