//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Coordinates, WeatherSnapshot};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Start-up: ask the location service for coordinates
    Init,

    // ===== Locate category =====
    /// Result: location service returned coordinates
    LocateDidResolve(Coordinates),

    /// Result: location service denied or unavailable
    LocateDidFail(String),

    // ===== Weather category =====
    /// Intent: look up weather at coordinates
    WeatherFetchCoords(Coordinates),

    /// Intent: look up weather by city name
    WeatherFetchCity(String),

    /// Intent: re-run the last query
    WeatherRefresh,

    /// Result: lookup `seq` produced a snapshot
    WeatherDidLoad { seq: u64, snapshot: WeatherSnapshot },

    /// Result: lookup `seq` failed
    WeatherDidError { seq: u64, message: String },

    // ===== City category =====
    /// Search field text changed
    CityChange(String),

    /// Submit the search field (Enter)
    CitySubmit,

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Spinner tick
    Tick,

    /// Exit the application
    Quit,
}
