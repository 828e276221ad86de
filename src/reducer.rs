//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::debug;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    AppState, PendingQuery, Query, QueryKind, RecoveryPolicy, CITY_ERROR_MESSAGE,
    COORDS_ERROR_MESSAGE,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.locating = true;
            DispatchResult::changed_with(Effect::Locate)
        }

        // ===== Locate actions =====
        Action::LocateDidResolve(coords) => {
            state.locating = false;
            if state.last_query.is_some() {
                debug!(?coords, "location arrived after a search, ignoring");
                return DispatchResult::changed();
            }
            if coords.is_valid() {
                start_query(state, Query::Coords(coords))
            } else {
                debug!(?coords, "location service returned invalid coordinates");
                let city = state.default_city.clone();
                fetch_city(state, &city).unwrap_or_else(DispatchResult::changed)
            }
        }

        Action::LocateDidFail(reason) => {
            state.locating = false;
            if state.last_query.is_some() {
                debug!(%reason, "location failed after a search, ignoring");
                return DispatchResult::changed();
            }
            debug!(%reason, "falling back to default city");
            let city = state.default_city.clone();
            fetch_city(state, &city).unwrap_or_else(DispatchResult::changed)
        }

        // ===== Weather actions =====
        Action::WeatherFetchCoords(coords) => start_query(state, Query::Coords(coords)),

        Action::WeatherFetchCity(name) => {
            fetch_city(state, &name).unwrap_or_else(DispatchResult::unchanged)
        }

        Action::WeatherRefresh => match state.last_query.clone() {
            Some(query) => start_query(state, query),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { seq, snapshot } => {
            let Some(pending) = take_pending(state, seq) else {
                return DispatchResult::unchanged();
            };
            if pending.kind == QueryKind::Coordinates {
                state.city = snapshot.name.clone();
            }
            state.weather = Some(snapshot);
            state.error = None;
            state.loading = false;
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, message } => {
            let Some(pending) = take_pending(state, seq) else {
                return DispatchResult::unchanged();
            };
            debug!(seq, %message, "lookup failed");
            match pending.kind {
                QueryKind::Coordinates => {
                    state.error = Some(COORDS_ERROR_MESSAGE.to_string());
                }
                QueryKind::City => {
                    state.error = Some(CITY_ERROR_MESSAGE.to_string());
                    if state.recovery == RecoveryPolicy::ClearOnCityMiss {
                        state.weather = None;
                    }
                }
            }
            state.loading = false;
            DispatchResult::changed()
        }

        // ===== City actions =====
        Action::CityChange(text) => {
            if state.city == text {
                DispatchResult::unchanged()
            } else {
                state.city = text;
                DispatchResult::changed()
            }
        }

        Action::CitySubmit => {
            let city = state.city.clone();
            fetch_city(state, &city).unwrap_or_else(DispatchResult::unchanged)
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Start a city lookup, or `None` when the trimmed name is empty.
fn fetch_city(state: &mut AppState, name: &str) -> Option<DispatchResult<Effect>> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(start_query(state, Query::City(name.to_string())))
}

fn start_query(state: &mut AppState, query: Query) -> DispatchResult<Effect> {
    state.request_seq += 1;
    let seq = state.request_seq;
    state.loading = true;
    state.error = None;
    state.pending = Some(PendingQuery {
        seq,
        kind: query.kind(),
    });
    state.last_query = Some(query.clone());
    state.tick_count = 0;

    let effect = match query {
        Query::Coords(coords) => Effect::FetchByCoords { seq, coords },
        Query::City(city) => Effect::FetchByName { seq, city },
    };
    DispatchResult::changed_with(effect)
}

/// Clear the pending request if `seq` is the latest one; stale results yield `None`.
fn take_pending(state: &mut AppState, seq: u64) -> Option<PendingQuery> {
    match state.pending {
        Some(pending) if pending.seq == seq => {
            state.pending = None;
            Some(pending)
        }
        _ => {
            debug!(seq, latest = state.request_seq, "discarding stale result");
            None
        }
    }
}
