//! Material color-science engine (`material` feature).
//!
//! Builds tonal-spot dynamic schemes with `material-color-utilities` and
//! exposes them through the [`ColorEngine`] boundary so the provider chain
//! can prefer them over the HSL synthesizer.

use material_color_utilities::{
    dynamiccolor::{DynamicSchemeBuilder, MaterialDynamicColors, SpecVersion, Variant},
    hct::Hct,
};
use tint_color::Rgb;

use crate::provider::{ColorEngine, EngineTheme, ProviderError, RoleMap};

/// Tonal-spot Material 3 schemes from a source color.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEngine;

impl ColorEngine for MaterialEngine {
    fn name(&self) -> &'static str {
        "material"
    }

    fn argb_from_hex(&self, hex: &str) -> Result<u32, ProviderError> {
        let rgb = Rgb::parse_hex(hex).ok_or_else(|| ProviderError::InvalidSeed(hex.to_owned()))?;
        Ok(0xFF00_0000 | u32::from(rgb.r) << 16 | u32::from(rgb.g) << 8 | u32::from(rgb.b))
    }

    fn theme_from_source_color(&self, argb: u32) -> Result<EngineTheme, ProviderError> {
        Ok(EngineTheme {
            light: role_map(argb, false),
            dark: role_map(argb, true),
        })
    }
}

fn role_map(argb: u32, is_dark: bool) -> RoleMap {
    let scheme = DynamicSchemeBuilder::default()
        .source_color_hct(Hct::from_int(argb))
        .variant(Variant::TonalSpot)
        .spec_version(SpecVersion::Spec2025)
        .is_dark(is_dark)
        .build();
    let colors = MaterialDynamicColors::new();

    let mut map = RoleMap::new();
    map.insert("primary".to_owned(), argb_to_hex(colors.primary().get_argb(&scheme)));
    map.insert("on-primary".to_owned(), argb_to_hex(colors.on_primary().get_argb(&scheme)));
    map.insert("secondary".to_owned(), argb_to_hex(colors.secondary().get_argb(&scheme)));
    map.insert("on-secondary".to_owned(), argb_to_hex(colors.on_secondary().get_argb(&scheme)));
    map.insert("tertiary".to_owned(), argb_to_hex(colors.tertiary().get_argb(&scheme)));
    map.insert("on-tertiary".to_owned(), argb_to_hex(colors.on_tertiary().get_argb(&scheme)));
    map
}

#[allow(clippy::cast_possible_truncation)] // Masked to one byte per channel.
fn argb_to_hex(argb: u32) -> String {
    Rgb::new(
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
    )
    .to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ExternalEngineProvider, ProviderChain, SchemeProvider};
    use crate::scheme::Seed;

    #[test]
    fn argb_packs_opaque() {
        assert_eq!(MaterialEngine.argb_from_hex("#3FBCA5"), Ok(0xFF3F_BCA5));
        assert!(MaterialEngine.argb_from_hex("bogus").is_err());
    }

    #[test]
    fn argb_to_hex_drops_alpha() {
        assert_eq!(argb_to_hex(0x803F_BCA5), "#3fbca5");
    }

    #[test]
    fn engine_produces_every_role() {
        let theme = MaterialEngine.theme_from_source_color(0xFF67_50A4).unwrap();
        for map in [&theme.light, &theme.dark] {
            for key in ["primary", "on-primary", "secondary", "on-secondary", "tertiary", "on-tertiary"] {
                let value = map.get(key).unwrap();
                assert!(Rgb::parse_hex(value).is_some(), "{key} = {value}");
            }
        }
        assert_ne!(theme.light.get("primary"), theme.dark.get("primary"));
    }

    #[test]
    fn detected_chain_prefers_material() {
        let seed = Seed::parse("#6750A4").unwrap();
        let chain = ProviderChain::detect(crate::provider::EngineSelection::Auto);
        assert_eq!(chain.names(), ["material", "fallback"]);
        let resolution = chain.resolve(&seed);
        assert_eq!(resolution.provider, "material");
        assert_eq!(
            Some(resolution.scheme),
            ExternalEngineProvider::new(MaterialEngine).scheme(&seed).ok()
        );
    }
}
