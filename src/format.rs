//! Display formatting for snapshot values

use chrono::{DateTime, Local, TimeZone};

/// Shown when an instant can't be represented
pub const INVALID_TIME: &str = "--:--";

/// Epoch seconds as `hh:mm AM/PM` in the viewer's local zone.
pub fn format_local_time(epoch_secs: i64) -> String {
    format_time_in(epoch_secs, &Local)
}

/// Epoch seconds as `hh:mm AM/PM` in `tz`.
pub fn format_time_in<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc.with_timezone(tz).format("%I:%M %p").to_string(),
        None => INVALID_TIME.to_string(),
    }
}

/// Rounded whole degrees, half-up, e.g. `"13°C"`.
pub fn format_temp(celsius: f64) -> String {
    let rounded = (celsius + 0.5).floor();
    // avoid "-0°C"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}°C")
}

/// Upper-case the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
