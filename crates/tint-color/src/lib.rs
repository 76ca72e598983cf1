// SPDX-License-Identifier: MIT
//
// tint-color — Color space utilities for the tint theming engine.
//
// Everything here is pure and total: out-of-range input is clamped or
// wrapped, malformed hex collapses to the brand teal. The theming pipeline
// built on top of this crate never has to handle a color error.
//
//   hex ↔ Rgb ↔ Hsl        (color)
//   Rgb → luminance → WCAG contrast → on-color choice   (contrast)

// Single-char channel names (r, g, b, h, s, l) follow color-science convention.
#![allow(clippy::many_single_char_names)]
// Formulas are written in the same operation order as the reference
// definitions so results stay bit-for-bit stable; no fused multiply-add.
#![allow(clippy::suboptimal_flops)]

pub mod color;
pub mod contrast;

pub use color::{BRAND_TEAL, Hsl, Rgb, hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, rotate_hue};
pub use contrast::{ON_DARK, ON_LIGHT, best_on_color, contrast_ratio, relative_luminance};
