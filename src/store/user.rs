use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Stored preferences may be stale or hand-edited; anything unknown is `Default`
    pub fn parse_or_default(value: Option<&str>) -> Theme {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown theme: {}", s))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub theme: Theme,
    pub logged_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_through_its_name() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn unknown_or_missing_theme_falls_back_to_default() {
        assert_eq!(Theme::parse_or_default(Some("solarized")), Theme::Default);
        assert_eq!(Theme::parse_or_default(None), Theme::Default);
        assert_eq!(Theme::parse_or_default(Some("dark")), Theme::Dark);
    }
}
