//! Day/night display theme
//!
//! A theme is reduced to two color tokens, `dark` and `light`. Text uses the
//! dark token and backgrounds use the light token, so switching to night
//! swaps the two.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    /// The other theme
    pub fn opposite(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// Color tokens for this theme
    pub fn tokens(self) -> ColorTokens {
        match self {
            Theme::Day => ColorTokens {
                dark: Rgb(10, 10, 20),
                light: Rgb(255, 255, 255),
            },
            Theme::Night => ColorTokens {
                dark: Rgb(255, 255, 255),
                light: Rgb(10, 10, 20),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown theme name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme '{0}'. Use 'day' or 'night'.")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            _ => Err(ThemeParseError(s.to_string())),
        }
    }
}

/// An RGB triple, displayed as `"r, g, b"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// The two colors derived from a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorTokens {
    pub dark: Rgb,
    pub light: Rgb,
}

impl ColorTokens {
    pub fn foreground(&self) -> Rgb {
        self.dark
    }

    pub fn background(&self) -> Rgb {
        self.light
    }
}

/// Holds the current theme for one browsing session
#[derive(Debug, Clone, Default)]
pub struct ThemeController {
    current: Option<Theme>,
}

impl ThemeController {
    /// A controller that has not applied anything yet (reads as day)
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller starting from an explicit theme
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            current: Some(theme),
        }
    }

    /// Switch to `theme` and return its tokens
    pub fn apply(&mut self, theme: Theme) -> ColorTokens {
        self.current = Some(theme);
        theme.tokens()
    }

    /// Switch to the opposite of the current theme
    pub fn toggle(&mut self) -> ColorTokens {
        self.apply(self.current().opposite())
    }

    /// Current theme; day until something is applied
    pub fn current(&self) -> Theme {
        self.current.unwrap_or_default()
    }

    pub fn tokens(&self) -> ColorTokens {
        self.current().tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let day = Theme::Day.tokens();
        assert_eq!(day.dark.to_string(), "10, 10, 20");
        assert_eq!(day.light.to_string(), "255, 255, 255");

        let night = Theme::Night.tokens();
        assert_eq!(night.foreground(), Rgb(255, 255, 255));
        assert_eq!(night.background(), Rgb(10, 10, 20));
    }

    #[test]
    fn test_apply_ignores_prior_state() {
        let mut from_day = ThemeController::with_theme(Theme::Day);
        let mut from_night = ThemeController::with_theme(Theme::Night);
        assert_eq!(from_day.apply(Theme::Night), from_night.apply(Theme::Night));
        assert_eq!(from_day.current(), Theme::Night);
    }

    #[test]
    fn test_toggle_before_apply() {
        let mut controller = ThemeController::new();
        assert_eq!(controller.current(), Theme::Day);
        let tokens = controller.toggle();
        assert_eq!(controller.current(), Theme::Night);
        assert_eq!(tokens, Theme::Night.tokens());
    }

    #[test]
    fn test_toggle_twice_restores() {
        for start in [Theme::Day, Theme::Night] {
            let mut controller = ThemeController::with_theme(start);
            let before = controller.tokens();
            controller.toggle();
            controller.toggle();
            assert_eq!(controller.current(), start);
            assert_eq!(controller.tokens(), before);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("night".parse::<Theme>().unwrap(), Theme::Night);
        assert_eq!(" DAY ".parse::<Theme>().unwrap(), Theme::Day);
        assert!("dusk".parse::<Theme>().is_err());
        assert_eq!(Theme::Night.to_string(), "night");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Theme::Night).unwrap();
        assert_eq!(json, "\"night\"");
        let parsed: Theme = serde_json::from_str("\"day\"").unwrap();
        assert_eq!(parsed, Theme::Day);
    }
}
