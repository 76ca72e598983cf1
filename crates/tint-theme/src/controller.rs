//! Theme controller: the single owner of live theme state.
//!
//! Holds the published [`StyleDocument`], the persistence store and the
//! provider chain. All mutation goes through `&mut self`, so the latest
//! publish always wins and there is never more than one block under the
//! configured style id.
//!
//! Nothing here returns an error. Malformed seeds, engine failures and
//! storage failures are logged and absorbed; the worst case is a theme
//! built from fallback colors.

use tracing::{info, warn};

use crate::config::ThemeConfig;
use crate::provider::{ProviderChain, Resolution};
use crate::scheme::{Scheme, Seed, ThemeMode};
use crate::store::{FileStore, MODE_KEY, SEED_KEY, ThemeStore};
use crate::tokens::{self, StyleDocument};

pub struct ThemeController {
    config: ThemeConfig,
    store: Box<dyn ThemeStore>,
    providers: ProviderChain,
    document: StyleDocument,
    publish_count: usize,
}

impl ThemeController {
    pub fn new(config: ThemeConfig, store: Box<dyn ThemeStore>, providers: ProviderChain) -> Self {
        Self {
            config,
            store,
            providers,
            document: StyleDocument::new(),
            publish_count: 0,
        }
    }

    /// File-backed store at the configured path and the provider chain for
    /// the configured engine.
    #[must_use]
    pub fn from_config(config: ThemeConfig) -> Self {
        let store = FileStore::new(config.store_path());
        let providers = ProviderChain::detect(config.engine);
        Self::new(config, Box::new(store), providers)
    }

    // ── Seed ─────────────────────────────────────────────────────────────

    /// The persisted seed, if any. Storage failures read as "none".
    #[must_use]
    pub fn get_seed(&self) -> Option<String> {
        match self.store.get(SEED_KEY) {
            Ok(seed) => seed,
            Err(err) => {
                warn!(error = %err, "could not read persisted theme seed");
                None
            }
        }
    }

    /// Persist `seed` (best-effort) and re-apply the theme from it.
    ///
    /// Publishes exactly once.
    pub fn set_theme_seed(&mut self, seed: &str) -> Resolution {
        let seed = seed.trim();
        if let Err(err) = self.store.set(SEED_KEY, seed) {
            warn!(error = %err, "could not persist theme seed");
        }
        self.apply_dynamic_color(Some(seed))
    }

    // ── Resolution & publication ─────────────────────────────────────────

    /// Seed precedence: explicit override, persisted seed, configured
    /// default. Blank values are skipped; a malformed winner becomes the
    /// brand color.
    fn pick_seed(&self, seed_override: Option<&str>) -> Seed {
        let raw = seed_override
            .map(str::to_owned)
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.get_seed().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| self.config.default_seed.clone());
        Seed::or_brand(&raw)
    }

    /// Resolve a scheme without publishing it.
    #[must_use]
    pub fn resolve_scheme(&self, seed_override: Option<&str>) -> Resolution {
        let seed = self.pick_seed(seed_override);
        self.providers.resolve(&seed)
    }

    /// Replace the style block with `scheme`'s tokens.
    pub fn publish(&mut self, scheme: &Scheme) {
        tokens::publish(&mut self.document, &self.config.style_id, scheme);
        self.publish_count += 1;
    }

    /// Resolve and publish.
    pub fn apply_dynamic_color(&mut self, seed: Option<&str>) -> Resolution {
        let resolution = self.resolve_scheme(seed);
        self.publish(&resolution.scheme);
        info!(
            seed = %resolution.seed,
            provider = resolution.provider,
            "published dynamic color tokens"
        );
        resolution
    }

    // ── Theme mode ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn mode(&self) -> Option<ThemeMode> {
        self.document.mode()
    }

    /// Apply the persisted mode, else keep the document's marker, else light.
    pub fn init_mode(&mut self) -> ThemeMode {
        let persisted = match self.store.get(MODE_KEY) {
            Ok(value) => value.and_then(|v| v.parse::<ThemeMode>().ok()),
            Err(err) => {
                warn!(error = %err, "could not read persisted theme mode");
                None
            }
        };
        let mode = persisted.or(self.document.mode()).unwrap_or_default();
        self.document.set_mode(Some(mode));
        mode
    }

    /// Mark the document with `mode` and persist it (best-effort).
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.document.set_mode(Some(mode));
        if let Err(err) = self.store.set(MODE_KEY, mode.as_str()) {
            warn!(error = %err, "could not persist theme mode");
        }
    }

    /// Flip between light and dark; an unmarked document counts as light.
    pub fn toggle_mode(&mut self) -> ThemeMode {
        let next = self.document.mode().unwrap_or_default().toggled();
        self.set_mode(next);
        next
    }

    // ── Accessors ────────────────────────────────────────────────────────

    #[must_use]
    pub const fn document(&self) -> &StyleDocument {
        &self.document
    }

    /// How many times a scheme has been published.
    #[must_use]
    pub const fn publish_count(&self) -> usize {
        self.publish_count
    }

    #[must_use]
    pub const fn config(&self) -> &ThemeConfig {
        &self.config
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.names()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ColorEngine, EngineTheme, ExternalEngineProvider, ProviderError};
    use crate::store::MemoryStore;
    use crate::synth::build_fallback_scheme;
    use crate::tokens::{STYLE_ID, TokenSet};
    use pretty_assertions::assert_eq;

    const PRIMARY: &str = "--md-sys-color-primary";

    fn controller_with(store: MemoryStore) -> ThemeController {
        ThemeController::new(
            ThemeConfig::default(),
            Box::new(store),
            ProviderChain::fallback_only(),
        )
    }

    fn controller() -> ThemeController {
        controller_with(MemoryStore::new())
    }

    fn fallback(hex: &str) -> Scheme {
        build_fallback_scheme(&Seed::parse(hex).unwrap())
    }

    /// An engine that is never there.
    struct MissingEngine;

    impl ColorEngine for MissingEngine {
        fn name(&self) -> &'static str {
            "missing"
        }

        fn argb_from_hex(&self, _hex: &str) -> Result<u32, ProviderError> {
            Err(ProviderError::Engine("module not found".to_owned()))
        }

        fn theme_from_source_color(&self, _argb: u32) -> Result<EngineTheme, ProviderError> {
            Err(ProviderError::Engine("module not found".to_owned()))
        }
    }

    // ── Seed precedence ─────────────────────────────────────────────

    #[test]
    fn startup_uses_default_seed() {
        let mut ctl = controller();
        let resolution = ctl.apply_dynamic_color(None);
        assert_eq!(resolution.seed.as_str(), "#3FBCA5");
        assert_eq!(resolution.scheme, fallback("#3FBCA5"));
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#3FBCA5"));
    }

    #[test]
    fn persisted_seed_beats_default() {
        let mut store = MemoryStore::new();
        store.set(SEED_KEY, "#6750A4").unwrap();
        let ctl = controller_with(store);
        assert_eq!(ctl.resolve_scheme(None).scheme, fallback("#6750A4"));
    }

    #[test]
    fn override_beats_persisted_seed() {
        let mut store = MemoryStore::new();
        store.set(SEED_KEY, "#6750A4").unwrap();
        let ctl = controller_with(store);
        assert_eq!(ctl.resolve_scheme(Some("#1E88E5")).scheme, fallback("#1E88E5"));
    }

    #[test]
    fn blank_values_are_skipped() {
        let mut store = MemoryStore::new();
        store.set(SEED_KEY, "   ").unwrap();
        let ctl = controller_with(store);
        assert_eq!(ctl.resolve_scheme(Some("")).seed.as_str(), "#3FBCA5");
    }

    #[test]
    fn configured_default_seed_is_used() {
        let config = ThemeConfig {
            default_seed: "#1E88E5".to_owned(),
            ..ThemeConfig::default()
        };
        let ctl = ThemeController::new(config, Box::new(MemoryStore::new()), ProviderChain::fallback_only());
        assert_eq!(ctl.resolve_scheme(None).seed.as_str(), "#1E88E5");
    }

    #[test]
    fn malformed_seed_uses_brand_color() {
        let mut ctl = controller();
        let resolution = ctl.apply_dynamic_color(Some("not-a-color"));
        assert_eq!(resolution.seed.as_str(), "#3FBCA5");
        assert_eq!(resolution.scheme, fallback("#3FBCA5"));
    }

    // ── Provider fallback ───────────────────────────────────────────

    #[test]
    fn unavailable_engine_matches_synthesizer() {
        let chain = ProviderChain::fallback_only().with_provider(ExternalEngineProvider::new(MissingEngine));
        let ctl = ThemeController::new(ThemeConfig::default(), Box::new(MemoryStore::new()), chain);
        assert_eq!(ctl.provider_names(), ["missing", "fallback"]);

        let resolution = ctl.resolve_scheme(Some("#3FBCA5"));
        assert_eq!(resolution.provider, "fallback");
        assert_eq!(resolution.scheme, fallback("#3FBCA5"));
    }

    // ── Publication ─────────────────────────────────────────────────

    #[test]
    fn two_publishes_leave_one_block() {
        let mut ctl = controller();
        ctl.publish(&fallback("#3FBCA5"));
        ctl.publish(&fallback("#6750A4"));

        assert_eq!(ctl.publish_count(), 2);
        assert_eq!(ctl.document().blocks().len(), 1);
        assert_eq!(
            ctl.document().style(STYLE_ID),
            Some(&TokenSet::from_scheme(&fallback("#6750A4")))
        );
    }

    #[test]
    fn custom_style_id() {
        let config = ThemeConfig {
            style_id: "brand-vars".to_owned(),
            ..ThemeConfig::default()
        };
        let mut ctl = ThemeController::new(config, Box::new(MemoryStore::new()), ProviderChain::fallback_only());
        ctl.apply_dynamic_color(None);
        assert!(ctl.document().style("brand-vars").is_some());
        assert!(ctl.document().style(STYLE_ID).is_none());
    }

    // ── set_theme_seed ──────────────────────────────────────────────

    #[test]
    fn set_seed_persists_and_publishes_once() {
        let mut ctl = controller();
        let before = ctl.publish_count();

        let resolution = ctl.set_theme_seed("#FF0000");

        assert_eq!(ctl.get_seed().as_deref(), Some("#FF0000"));
        assert_eq!(ctl.publish_count(), before + 1);
        assert_eq!(resolution.scheme, fallback("#FF0000"));
        assert_eq!(
            ctl.document().style(STYLE_ID),
            Some(&TokenSet::from_scheme(&fallback("#FF0000")))
        );
    }

    #[test]
    fn persisted_seed_survives_into_next_apply() {
        let mut ctl = controller();
        ctl.set_theme_seed("#6750A4");
        let resolution = ctl.apply_dynamic_color(None);
        assert_eq!(resolution.seed.as_str(), "#6750A4");
    }

    #[test]
    fn set_seed_without_storage_still_publishes() {
        let mut ctl = controller_with(MemoryStore::unavailable());
        let resolution = ctl.set_theme_seed("#FF0000");

        assert_eq!(ctl.get_seed(), None);
        assert_eq!(ctl.publish_count(), 1);
        assert_eq!(resolution.scheme, fallback("#FF0000"));
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#FF0000"));
    }

    #[test]
    fn last_seed_wins() {
        let mut ctl = controller();
        ctl.set_theme_seed("#FF0000");
        ctl.set_theme_seed("#1E88E5");
        assert_eq!(ctl.document().blocks().len(), 1);
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#1E88E5"));
        assert_eq!(ctl.get_seed().as_deref(), Some("#1E88E5"));
    }

    // ── Theme mode ──────────────────────────────────────────────────

    #[test]
    fn init_mode_defaults_to_light() {
        let mut ctl = controller();
        assert_eq!(ctl.mode(), None);
        assert_eq!(ctl.init_mode(), ThemeMode::Light);
        assert_eq!(ctl.mode(), Some(ThemeMode::Light));
    }

    #[test]
    fn init_mode_reads_persisted_mode() {
        let mut store = MemoryStore::new();
        store.set(MODE_KEY, "dark").unwrap();
        let mut ctl = controller_with(store);
        assert_eq!(ctl.init_mode(), ThemeMode::Dark);
    }

    #[test]
    fn init_mode_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(MODE_KEY, "sepia").unwrap();
        let mut ctl = controller_with(store);
        assert_eq!(ctl.init_mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_switches_resolved_tokens_and_persists() {
        let mut ctl = controller();
        ctl.apply_dynamic_color(Some("#3FBCA5"));
        ctl.init_mode();
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#3FBCA5"));

        assert_eq!(ctl.toggle_mode(), ThemeMode::Dark);
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#50c4af"));

        assert_eq!(ctl.toggle_mode(), ThemeMode::Light);
        assert_eq!(ctl.document().resolve_var(PRIMARY), Some("#3FBCA5"));

        // Mode changes never republish.
        assert_eq!(ctl.publish_count(), 1);
    }

    #[test]
    fn mode_survives_without_storage() {
        let mut ctl = controller_with(MemoryStore::unavailable());
        assert_eq!(ctl.init_mode(), ThemeMode::Light);
        ctl.set_mode(ThemeMode::Dark);
        assert_eq!(ctl.mode(), Some(ThemeMode::Dark));
    }
}
