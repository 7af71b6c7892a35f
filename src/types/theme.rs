use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's stored theme choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the system color scheme.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    /// The exact string written to storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Auto => "auto",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Resolves the preference against the system "prefers dark" signal.
    pub fn resolve(&self, system_prefers_dark: bool) -> AppliedMode {
        match self {
            ThemePreference::Light => AppliedMode::Light,
            ThemePreference::Dark => AppliedMode::Dark,
            ThemePreference::Auto if system_prefers_dark => AppliedMode::Dark,
            ThemePreference::Auto => AppliedMode::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is exact: stored values are written lowercase by this crate, so
/// anything else is treated as foreign data.
impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ThemePreference::Auto),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("unknown theme preference '{}'", other)),
        }
    }
}

/// The visual mode actually rendered. Never "auto".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppliedMode {
    Light,
    Dark,
}

impl AppliedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppliedMode::Light => "light",
            AppliedMode::Dark => "dark",
        }
    }

    pub fn flipped(&self) -> AppliedMode {
        match self {
            AppliedMode::Light => AppliedMode::Dark,
            AppliedMode::Dark => AppliedMode::Light,
        }
    }

    /// The explicit preference that pins this mode.
    pub fn as_preference(&self) -> ThemePreference {
        match self {
            AppliedMode::Light => ThemePreference::Light,
            AppliedMode::Dark => ThemePreference::Dark,
        }
    }
}

impl fmt::Display for AppliedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
