//! Query lifecycle tests driven through EffectStoreTestHarness
//!
//! Each test plays the part of the effect runner: drain the effects the
//! reducer declared, then feed back the result actions.

use skypanel::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    condition::Condition,
    effect::Effect,
    reducer::reducer,
    state::{
        AppState, Coordinates, RecoveryPolicy, WeatherSnapshot, CITY_ERROR_MESSAGE,
        COORDS_ERROR_MESSAGE,
    },
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId};

fn snapshot(name: &str, condition: Condition) -> WeatherSnapshot {
    WeatherSnapshot {
        name: name.into(),
        country: "GB".into(),
        condition,
        condition_id: 800,
        description: "clear sky".into(),
        temperature: 14.2,
        feels_like: 13.1,
        humidity: 72,
        wind_speed: 4.1,
        visibility: 10000,
        pressure: 1012,
        sunrise: 1_700_000_000,
        sunset: 1_700_030_000,
    }
}

/// Sequence number carried by the single weather lookup in `effects`.
fn seq_of(effects: &[Effect]) -> u64 {
    assert_eq!(effects.len(), 1, "expected one effect, got {effects:?}");
    match &effects[0] {
        Effect::FetchByCoords { seq, .. } | Effect::FetchByName { seq, .. } => *seq,
        other => panic!("expected a weather lookup, got {other:?}"),
    }
}

// ============================================================================
// Start-up
// ============================================================================

#[test]
fn test_denied_location_falls_back_to_default_city() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::Locate));

    harness.complete_action(Action::LocateDidFail("denied".into()));
    harness.process_emitted();

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchByName { seq: 1, city } if city == "London"),
    );
    harness.assert_state(|s| s.loading);

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        snapshot: snapshot("London", Condition::Clear),
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.error.is_none());
    harness.assert_state(|s| s.weather.as_ref().is_some_and(|w| w.name == "London"));
}

#[test]
fn test_located_start_overwrites_search_text() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.complete_action(Action::LocateDidResolve(Coordinates::new(48.85, 2.35)));
    harness.process_emitted();

    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidLoad {
        seq,
        snapshot: snapshot("Paris", Condition::Clouds),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.city == "Paris");
    harness.assert_state(|s| !s.locating);
}

#[test]
fn test_search_during_locate_wins() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.dispatch_collect(Action::CityChange("Paris".into()));
    harness.dispatch_collect(Action::CitySubmit);
    let seq = seq_of(&harness.drain_effects());

    // Location answers after the user already searched
    harness.complete_action(Action::LocateDidResolve(Coordinates::new(51.5, -0.12)));
    harness.process_emitted();
    harness.drain_effects().effects_empty();

    harness.complete_action(Action::WeatherDidLoad {
        seq,
        snapshot: snapshot("Paris", Condition::Clouds),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.city == "Paris");
    harness.assert_state(|s| s.weather.as_ref().is_some_and(|w| w.name == "Paris"));
    harness.assert_state(|s| !s.loading && !s.locating);
}

// ============================================================================
// City lookups
// ============================================================================

#[test]
fn test_city_success_keeps_typed_text() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CityChange("  tokyo ".into()));
    harness.dispatch_collect(Action::CitySubmit);

    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchByName { city, .. } if city == "tokyo"),
    );

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        snapshot: snapshot("Tokyo", Condition::Rain),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.city == "  tokyo ");
    harness.assert_state(|s| s.weather.as_ref().is_some_and(|w| w.name == "Tokyo"));
}

#[test]
fn test_blank_submit_does_nothing() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::CityChange("   ".into()));
    let result = store.dispatch(Action::CitySubmit);

    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert!(!store.state().loading);
    assert_eq!(store.state().request_seq, 0);
}

#[test]
fn test_city_miss_preserves_snapshot_by_default() {
    let state = AppState {
        weather: Some(snapshot("London", Condition::Clear)),
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Atlantis".into()));
    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidError {
        seq,
        message: "404".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.error.as_deref() == Some(CITY_ERROR_MESSAGE));
    harness.assert_state(|s| s.weather.as_ref().is_some_and(|w| w.name == "London"));
    harness.assert_state(|s| !s.loading);
}

#[test]
fn test_city_miss_clears_snapshot_when_configured() {
    let state = AppState {
        weather: Some(snapshot("London", Condition::Clear)),
        ..AppState::new("London", RecoveryPolicy::ClearOnCityMiss)
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Atlantis".into()));
    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidError {
        seq,
        message: "404".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.error.as_deref() == Some(CITY_ERROR_MESSAGE));
    harness.assert_state(|s| s.weather.is_none());
}

#[test]
fn test_coordinate_failure_keeps_snapshot() {
    let state = AppState {
        weather: Some(snapshot("London", Condition::Clear)),
        ..AppState::new("London", RecoveryPolicy::ClearOnCityMiss)
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::WeatherFetchCoords(Coordinates::new(1.0, 2.0)));
    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidError {
        seq,
        message: "timeout".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.error.as_deref() == Some(COORDS_ERROR_MESSAGE));
    harness.assert_state(|s| s.weather.is_some());
}

#[test]
fn test_new_lookup_clears_previous_error() {
    let state = AppState {
        error: Some(CITY_ERROR_MESSAGE.into()),
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Oslo".into()));

    harness.assert_state(|s| s.error.is_none());
    harness.assert_state(|s| s.loading);
}

// ============================================================================
// Overlapping requests
// ============================================================================

#[test]
fn test_latest_request_wins() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Rome".into()));
    let first = seq_of(&harness.drain_effects());
    harness.dispatch_collect(Action::WeatherFetchCity("Madrid".into()));
    let second = seq_of(&harness.drain_effects());
    assert!(second > first);

    // Madrid answers first, then the stale Rome result arrives
    harness.complete_action(Action::WeatherDidLoad {
        seq: second,
        snapshot: snapshot("Madrid", Condition::Clear),
    });
    harness.complete_action(Action::WeatherDidLoad {
        seq: first,
        snapshot: snapshot("Rome", Condition::Rain),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "stale result should be discarded");
    harness.assert_state(|s| s.weather.as_ref().is_some_and(|w| w.name == "Madrid"));
    harness.assert_state(|s| !s.loading);
}

#[test]
fn test_stale_error_does_not_stop_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Rome".into()));
    let first = seq_of(&harness.drain_effects());
    harness.dispatch_collect(Action::WeatherFetchCity("Madrid".into()));
    harness.drain_effects();

    harness.complete_action(Action::WeatherDidError {
        seq: first,
        message: "late".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.loading);
    harness.assert_state(|s| s.error.is_none());
}

#[test]
fn test_refresh_reissues_last_query() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Lima".into()));
    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidLoad {
        seq,
        snapshot: snapshot("Lima", Condition::Clouds),
    });
    harness.process_emitted();

    harness.dispatch_collect(Action::WeatherRefresh);
    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchByName { seq, city } if *seq == 2 && city == "Lima"),
    );
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_enter_key_submits_city() {
    let state = AppState {
        city: "Cairo".into(),
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::CitySubmit);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.loading);
    harness
        .drain_effects()
        .effects_first_matches(
            |e| matches!(e, Effect::FetchByName { city, .. } if city == "Cairo"),
        );
}

#[test]
fn test_render_after_city_miss() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay::new();

    harness.dispatch_collect(Action::WeatherFetchCity("Nowhere".into()));
    let seq = seq_of(&harness.drain_effects());
    harness.complete_action(Action::WeatherDidError {
        seq,
        message: "404".into(),
    });
    harness.process_emitted();

    let output = harness.render_plain(70, 24, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("City not found. Please try again."),
        "error banner should be visible:\n{output}"
    );
}
