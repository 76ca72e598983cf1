//! # tint-theme — dynamic brand-color theming
//!
//! Turns a single seed color into a complete light/dark role scheme and
//! publishes it as CSS custom properties. The seed and the active theme mode
//! persist across runs; every failure along the way degrades to a working
//! theme instead of an error.
//!
//! # Architecture
//!
//! ```text
//! seed override │ persisted seed │ configured default
//!     │
//!     ▼
//! scheme.rs:     Seed (malformed → brand teal)
//!     │
//!     ▼
//! provider.rs:   ProviderChain: external engine first (material.rs,
//!     │          `material` feature), any failure falls through to…
//!     ▼
//! synth.rs:      HSL synthesizer (deterministic, never fails)
//!     │
//!     ▼
//! tokens.rs:     TokenSet → one style block in the StyleDocument,
//!     │          fully replaced on each publish
//!     ▼
//! controller.rs: ThemeController: owns the document, the store and the
//!                provider chain; persists seed and mode via store.rs
//! ```
//!
//! Published variables are `--md-sys-color-{primary,on-primary,secondary,
//! on-secondary,tertiary,on-tertiary}`, scoped by the `theme-light` /
//! `theme-dark` root marker with the light roles as the ambient default.

pub mod config;
pub mod controller;
#[cfg(feature = "material")]
pub mod material;
pub mod provider;
pub mod scheme;
pub mod store;
pub mod synth;
pub mod tokens;

pub use config::ThemeConfig;
pub use controller::ThemeController;
pub use provider::{EngineSelection, ProviderChain, Resolution, SchemeProvider};
pub use scheme::{ColorPair, DEFAULT_SEED, Role, Roles, Scheme, Seed, ThemeMode};
pub use synth::build_fallback_scheme;
pub use tokens::{STYLE_ID, StyleDocument, TokenSet};
