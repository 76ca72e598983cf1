// SPDX-License-Identifier: MIT
//
// WCAG relative luminance and contrast ratio, plus on-color selection.
//
// Every role color in a scheme is paired with a foreground ("on-color")
// picked from exactly two candidates: white, or a near-black that reads
// softer than pure black on light surfaces. Whichever candidate contrasts
// more with the background wins; white wins ties.

use crate::color::{Rgb, hex_to_rgb};

/// Foreground for dark backgrounds.
pub const ON_LIGHT: &str = "#FFFFFF";

/// Foreground for light backgrounds.
pub const ON_DARK: &str = "#1B1B1B";

/// Relative luminance per WCAG 2.x.
///
/// Channels are linearized (`c / 12.92` up to `0.03928`, gamma 2.4 above)
/// and weighted `0.2126 R + 0.7152 G + 0.0722 B`. Returns `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// WCAG contrast ratio, `(L_lighter + 0.05) / (L_darker + 0.05)`.
///
/// Lighter and darker are decided by luminance, not argument order, so the
/// result is symmetric and always in `[1, 21]`.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick the readable foreground for a background hex color.
///
/// Returns [`ON_LIGHT`] when white contrasts at least as well as the
/// near-black [`ON_DARK`], otherwise [`ON_DARK`]. Malformed input is read as
/// the brand teal.
///
/// ```
/// use tint_color::best_on_color;
///
/// assert_eq!(best_on_color("#FFFFFF"), "#1B1B1B");
/// assert_eq!(best_on_color("#000000"), "#FFFFFF");
/// ```
#[must_use]
pub fn best_on_color(bg_hex: &str) -> &'static str {
    let bg = hex_to_rgb(bg_hex);
    if contrast_ratio(bg, Rgb::WHITE) >= contrast_ratio(bg, hex_to_rgb(ON_DARK)) {
        ON_LIGHT
    } else {
        ON_DARK
    }
}

#[inline]
fn linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
