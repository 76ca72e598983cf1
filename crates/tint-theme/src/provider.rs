//! Scheme providers: an optional external color engine with a guaranteed
//! fallback to the built-in synthesizer.
//!
//! Capability detection happens at build time: the Material engine is only
//! compiled in with the `material` feature, and [`ProviderChain::detect`]
//! picks it up when present. At run time any engine failure (rejected seed,
//! missing role, unparsable color) is logged and the chain moves on. The
//! chain always ends with the synthesizer, so resolution cannot fail.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tint_color::Rgb;
use tracing::debug;

use crate::scheme::{ColorPair, Role, Roles, Scheme, Seed, ThemeMode};
use crate::synth::build_fallback_scheme;

/// Why a provider could not produce a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("color engine rejected seed `{0}`")]
    InvalidSeed(String),

    #[error("{mode} scheme is missing role `{key}`")]
    MissingRole { mode: ThemeMode, key: &'static str },

    #[error("{mode} role `{key}` has unparsable color `{value}`")]
    InvalidColor {
        mode: ThemeMode,
        key: &'static str,
        value: String,
    },

    #[error("color engine failed: {0}")]
    Engine(String),
}

/// Something that can turn a seed into a scheme, or decline to.
pub trait SchemeProvider {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Produce a scheme for `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when this provider cannot serve the seed;
    /// the chain then falls through to the next provider.
    fn scheme(&self, seed: &Seed) -> Result<Scheme, ProviderError>;
}

// ---------------------------------------------------------------------------
// Fallback synthesizer
// ---------------------------------------------------------------------------

/// The HSL synthesizer as a provider. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSynthesizerProvider;

impl FallbackSynthesizerProvider {
    #[must_use]
    pub fn synthesize(self, seed: &Seed) -> Scheme {
        build_fallback_scheme(seed)
    }
}

impl SchemeProvider for FallbackSynthesizerProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn scheme(&self, seed: &Seed) -> Result<Scheme, ProviderError> {
        Ok(self.synthesize(seed))
    }
}

// ---------------------------------------------------------------------------
// External engine
// ---------------------------------------------------------------------------

/// Flat role map as produced by an external engine, keyed `primary`,
/// `on-primary`, … Extra keys are ignored.
pub type RoleMap = BTreeMap<String, String>;

/// Light and dark role maps for one source color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineTheme {
    pub light: RoleMap,
    pub dark: RoleMap,
}

/// The boundary to an external color-science library.
pub trait ColorEngine {
    fn name(&self) -> &'static str;

    /// Convert hex text to the engine's packed ARGB representation.
    ///
    /// # Errors
    ///
    /// Fails when the engine cannot interpret `hex`.
    fn argb_from_hex(&self, hex: &str) -> Result<u32, ProviderError>;

    /// Produce light and dark role maps for a source color.
    ///
    /// # Errors
    ///
    /// Fails when the engine cannot build a theme.
    fn theme_from_source_color(&self, argb: u32) -> Result<EngineTheme, ProviderError>;
}

/// Adapts a [`ColorEngine`] to the [`Scheme`] shape.
#[derive(Debug, Clone)]
pub struct ExternalEngineProvider<E> {
    engine: E,
}

impl<E: ColorEngine> ExternalEngineProvider<E> {
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }
}

impl<E: ColorEngine> SchemeProvider for ExternalEngineProvider<E> {
    fn name(&self) -> &'static str {
        self.engine.name()
    }

    fn scheme(&self, seed: &Seed) -> Result<Scheme, ProviderError> {
        let argb = self.engine.argb_from_hex(seed.as_str())?;
        let theme = self.engine.theme_from_source_color(argb)?;
        Ok(Scheme {
            light: roles_from_map(&theme.light, ThemeMode::Light)?,
            dark: roles_from_map(&theme.dark, ThemeMode::Dark)?,
        })
    }
}

fn roles_from_map(map: &RoleMap, mode: ThemeMode) -> Result<Roles, ProviderError> {
    let pair = |role: Role| -> Result<ColorPair, ProviderError> {
        Ok(ColorPair {
            color: lookup(map, mode, role.key())?,
            on_color: lookup(map, mode, role.on_key())?,
        })
    };
    Ok(Roles {
        primary: pair(Role::Primary)?,
        secondary: pair(Role::Secondary)?,
        tertiary: pair(Role::Tertiary)?,
    })
}

/// Fetch a role color, normalized to lowercase `#rrggbb`.
fn lookup(map: &RoleMap, mode: ThemeMode, key: &'static str) -> Result<String, ProviderError> {
    let value = map.get(key).ok_or(ProviderError::MissingRole { mode, key })?;
    Rgb::parse_hex(value)
        .map(Rgb::to_hex)
        .ok_or_else(|| ProviderError::InvalidColor {
            mode,
            key,
            value: value.clone(),
        })
}

// ---------------------------------------------------------------------------
// Engine selection
// ---------------------------------------------------------------------------

/// Which providers the chain may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineSelection {
    /// Use an external engine when one is compiled in.
    #[default]
    Auto,
    /// Always use the built-in synthesizer.
    Fallback,
}

impl fmt::Display for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Fallback => "fallback",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine `{0}` (expected `auto` or `fallback`)")]
pub struct ParseEngineError(String);

impl FromStr for EngineSelection {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(Self::Auto),
            "fallback" => Ok(Self::Fallback),
            other => Err(ParseEngineError(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderChain
// ---------------------------------------------------------------------------

/// A scheme together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub seed: Seed,
    pub scheme: Scheme,
    /// Name of the provider that produced `scheme`.
    pub provider: &'static str,
}

/// Ordered providers, always terminated by the synthesizer.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn SchemeProvider>>,
    fallback: FallbackSynthesizerProvider,
}

impl ProviderChain {
    /// A chain that only synthesizes.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self::default()
    }

    /// Build the chain for a selection, including every engine compiled in.
    #[must_use]
    pub fn detect(selection: EngineSelection) -> Self {
        match selection {
            EngineSelection::Fallback => Self::fallback_only(),
            EngineSelection::Auto => with_compiled_engines(Self::fallback_only()),
        }
    }

    /// Try `provider` before anything added later and before the fallback.
    #[must_use]
    pub fn with_provider(mut self, provider: impl SchemeProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Provider names in the order they are tried.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .map(|p| p.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    /// Resolve a scheme. Never fails: every provider error falls through.
    #[must_use]
    pub fn resolve(&self, seed: &Seed) -> Resolution {
        for provider in &self.providers {
            match provider.scheme(seed) {
                Ok(scheme) => {
                    return Resolution {
                        seed: seed.clone(),
                        scheme,
                        provider: provider.name(),
                    };
                }
                Err(err) => {
                    debug!(provider = provider.name(), error = %err, "scheme provider failed, falling through");
                }
            }
        }
        Resolution {
            seed: seed.clone(),
            scheme: self.fallback.synthesize(seed),
            provider: self.fallback.name(),
        }
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(feature = "material")]
fn with_compiled_engines(chain: ProviderChain) -> ProviderChain {
    chain.with_provider(ExternalEngineProvider::new(crate::material::MaterialEngine))
}

#[cfg(not(feature = "material"))]
fn with_compiled_engines(chain: ProviderChain) -> ProviderChain {
    debug!("no external color engine compiled in");
    chain
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
