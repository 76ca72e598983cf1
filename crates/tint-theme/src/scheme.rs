//! Scheme data model: seed, roles, color pairs and theme modes.
//!
//! A [`Scheme`] is built fresh for every resolution and never mutated after
//! construction; publication swaps whole schemes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tint_color::{Rgb, best_on_color};
use tracing::warn;

/// Built-in brand color used when no seed is given or persisted.
pub const DEFAULT_SEED: &str = "#3FBCA5";

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A validated seed color.
///
/// Holds the hex text as the user wrote it (digit case preserved), with a
/// leading `#` guaranteed. The light primary role is the seed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    /// Validate a seed; `None` unless it is a 6-digit hex color.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Rgb::parse_hex(raw)?;
        Some(if raw.starts_with('#') {
            Self(raw.to_owned())
        } else {
            Self(format!("#{raw}"))
        })
    }

    /// Validate a seed, substituting the brand default when malformed.
    #[must_use]
    pub fn or_brand(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            warn!(seed = raw, "malformed seed color, using brand default");
            Self::default()
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(&self.0)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(DEFAULT_SEED.to_owned())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Role / ColorPair / Roles
// ---------------------------------------------------------------------------

/// A named color slot within a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Primary, Self::Secondary, Self::Tertiary];

    /// Token key of the role color (`primary`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }

    /// Token key of the paired foreground (`on-primary`).
    #[must_use]
    pub const fn on_key(self) -> &'static str {
        match self {
            Self::Primary => "on-primary",
            Self::Secondary => "on-secondary",
            Self::Tertiary => "on-tertiary",
        }
    }
}

/// A role color and the foreground that stays readable on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    pub color: String,
    pub on_color: String,
}

impl ColorPair {
    /// Pair `color` with its higher-contrast foreground.
    #[must_use]
    pub fn readable(color: String) -> Self {
        let on_color = best_on_color(&color).to_owned();
        Self { color, on_color }
    }
}

/// The three role pairs of one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub primary: ColorPair,
    pub secondary: ColorPair,
    pub tertiary: ColorPair,
}

impl Roles {
    #[must_use]
    pub const fn get(&self, role: Role) -> &ColorPair {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Tertiary => &self.tertiary,
        }
    }

    /// Iterate pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &ColorPair)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Build a new set by transforming every pair.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(&ColorPair) -> ColorPair) -> Self {
        Self {
            primary: f(&self.primary),
            secondary: f(&self.secondary),
            tertiary: f(&self.tertiary),
        }
    }
}

// ---------------------------------------------------------------------------
// Scheme
// ---------------------------------------------------------------------------

/// The complete light + dark role resolution for one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub light: Roles,
    pub dark: Roles,
}

impl Scheme {
    #[must_use]
    pub const fn roles(&self, mode: ThemeMode) -> &Roles {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeMode
// ---------------------------------------------------------------------------

/// The light/dark marker on the document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Root class that marks this mode.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode `{0}` (expected `light` or `dark`)")]
pub struct ParseModeError(String);

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseModeError(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
