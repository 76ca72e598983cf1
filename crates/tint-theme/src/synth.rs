//! Fallback scheme synthesis: a full light/dark scheme from one seed with
//! nothing but HSL arithmetic.
//!
//! Light roles: the seed itself, the seed rotated −20° at 70% saturation,
//! and the seed rotated +40° at 80% saturation. Dark roles: each light role
//! with lightness raised 10% (clamped), hue untouched. On-colors are
//! recomputed against every final role color.

use tint_color::rotate_hue;

use crate::scheme::{ColorPair, Roles, Scheme, Seed};

/// Hue shift, saturation factor and lightness factor for the secondary role.
const SECONDARY: (f64, f64, f64) = (-20.0, 0.7, 1.0);

/// Hue shift, saturation factor and lightness factor for the tertiary role.
const TERTIARY: (f64, f64, f64) = (40.0, 0.8, 1.0);

/// Lightness boost applied to every light role to get its dark counterpart.
const DARK_LIGHTEN: f64 = 1.1;

/// Derive the complete scheme for `seed`.
///
/// Pure and deterministic: the same seed always yields an identical scheme.
#[must_use]
pub fn build_fallback_scheme(seed: &Seed) -> Scheme {
    let primary = seed.as_str();
    let light = Roles {
        primary: ColorPair::readable(primary.to_owned()),
        secondary: ColorPair::readable(derive(primary, SECONDARY)),
        tertiary: ColorPair::readable(derive(primary, TERTIARY)),
    };
    let dark = light.map(|pair| ColorPair::readable(rotate_hue(&pair.color, 0.0, 1.0, DARK_LIGHTEN)));
    Scheme { light, dark }
}

fn derive(seed: &str, (degrees, sat, light): (f64, f64, f64)) -> String {
    rotate_hue(seed, degrees, sat, light)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
