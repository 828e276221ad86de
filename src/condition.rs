//! Condition categories and the icon/background treatments derived from them

use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse weather classification reported by the provider (`weather[0].main`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    /// Any category outside the known set (Mist, Haze, Dust, ...)
    Other(String),
}

impl Condition {
    /// Parse the provider's category string, case-insensitively.
    pub fn from_main(main: &str) -> Self {
        match main.trim().to_ascii_lowercase().as_str() {
            "clear" => Condition::Clear,
            "clouds" => Condition::Clouds,
            "rain" => Condition::Rain,
            "drizzle" => Condition::Drizzle,
            "snow" => Condition::Snow,
            "thunderstorm" => Condition::Thunderstorm,
            _ => Condition::Other(main.trim().to_string()),
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            Condition::Clear => Icon::Sun,
            Condition::Clouds => Icon::Cloud,
            Condition::Rain | Condition::Drizzle => Icon::RainCloud,
            Condition::Snow => Icon::SnowCloud,
            Condition::Thunderstorm => Icon::Lightning,
            Condition::Other(_) => Icon::Sun,
        }
    }

    pub fn background(&self) -> Background {
        match self {
            Condition::Clear => Background::Clear,
            Condition::Clouds => Background::Cloudy,
            Condition::Rain | Condition::Drizzle => Background::Wet,
            Condition::Snow => Background::Snowy,
            Condition::Thunderstorm => Background::Stormy,
            Condition::Other(_) => Background::Clear,
        }
    }
}

/// Display icon for a condition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    Cloud,
    RainCloud,
    SnowCloud,
    Lightning,
}

impl Icon {
    /// Emoji representation for when sprites don't fit
    pub fn emoji(self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}\u{fe0f}",
            Icon::Cloud => "\u{2601}\u{fe0f}",
            Icon::RainCloud => "\u{1f327}\u{fe0f}",
            Icon::SnowCloud => "\u{1f328}\u{fe0f}",
            Icon::Lightning => "\u{26a1}",
        }
    }
}

/// One of the five background treatments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    Clear,
    Cloudy,
    Wet,
    Snowy,
    Stormy,
}

impl Background {
    /// Gradient stops (from, via, to) used for the panel frame and title.
    pub fn gradient(self) -> [Color; 3] {
        match self {
            Background::Clear => [
                Color::Rgb(96, 165, 250),
                Color::Rgb(59, 130, 246),
                Color::Rgb(37, 99, 235),
            ],
            Background::Cloudy => [
                Color::Rgb(156, 163, 175),
                Color::Rgb(107, 114, 128),
                Color::Rgb(75, 85, 99),
            ],
            Background::Wet => [
                Color::Rgb(75, 85, 99),
                Color::Rgb(55, 65, 81),
                Color::Rgb(31, 41, 55),
            ],
            Background::Snowy => [
                Color::Rgb(191, 219, 254),
                Color::Rgb(147, 197, 253),
                Color::Rgb(96, 165, 250),
            ],
            Background::Stormy => [
                Color::Rgb(31, 41, 55),
                Color::Rgb(17, 24, 39),
                Color::Rgb(0, 0, 0),
            ],
        }
    }

    /// Foreground accent that stays readable on the treatment.
    pub fn accent(self) -> Color {
        match self {
            Background::Clear | Background::Snowy => Color::Rgb(96, 165, 250),
            Background::Cloudy => Color::Rgb(156, 163, 175),
            Background::Wet => Color::Rgb(147, 197, 253),
            Background::Stormy => Color::Rgb(250, 204, 21),
        }
    }
}

/// Icon for a raw category string; unknown categories get the sun.
pub fn icon_for(category: &str) -> Icon {
    Condition::from_main(category).icon()
}

/// Background for an optional condition; `None` (no snapshot yet) is clear.
pub fn background_for(condition: Option<&Condition>) -> Background {
    condition.map_or(Background::Clear, Condition::background)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_main_is_case_insensitive() {
        assert_eq!(Condition::from_main("Clear"), Condition::Clear);
        assert_eq!(Condition::from_main("CLOUDS"), Condition::Clouds);
        assert_eq!(Condition::from_main(" rain "), Condition::Rain);
        assert_eq!(
            Condition::from_main("Mist"),
            Condition::Other("Mist".into())
        );
    }

    #[test]
    fn test_icon_table() {
        assert_eq!(icon_for("clear"), Icon::Sun);
        assert_eq!(icon_for("Clouds"), Icon::Cloud);
        assert_eq!(icon_for("Rain"), Icon::RainCloud);
        assert_eq!(icon_for("Drizzle"), Icon::RainCloud);
        assert_eq!(icon_for("Snow"), Icon::SnowCloud);
        assert_eq!(icon_for("Thunderstorm"), Icon::Lightning);
        assert_eq!(icon_for("Tornado"), Icon::Sun);
        assert_eq!(icon_for(""), Icon::Sun);
    }

    #[test]
    fn test_background_table() {
        let bg = |main: &str| background_for(Some(&Condition::from_main(main)));

        assert_eq!(bg("clear"), Background::Clear);
        assert_eq!(bg("clouds"), Background::Cloudy);
        assert_eq!(bg("rain"), Background::Wet);
        assert_eq!(bg("drizzle"), Background::Wet);
        assert_eq!(bg("snow"), Background::Snowy);
        assert_eq!(bg("thunderstorm"), Background::Stormy);
        assert_eq!(bg("smoke"), Background::Clear);
        assert_eq!(background_for(None), Background::Clear);
    }

    #[test]
    fn test_backgrounds_are_distinct() {
        let all = [
            Background::Clear,
            Background::Cloudy,
            Background::Wet,
            Background::Snowy,
            Background::Stormy,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.gradient(), b.gradient(), "{a:?} vs {b:?}");
            }
        }
    }
}
