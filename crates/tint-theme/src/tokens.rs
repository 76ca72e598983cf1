//! Token publication: a [`Scheme`] rendered as CSS custom properties.
//!
//! One publication produces one style block with three scopes:
//!
//! | Scope                                       | Roles  |
//! |---------------------------------------------|--------|
//! | `:root:not(.theme-light):not(.theme-dark)`  | light  |
//! | `.theme-light`                              | light  |
//! | `.theme-dark`                               | dark   |
//!
//! Each scope declares the six `--md-sys-color-*` variables. The block lives
//! in a [`StyleDocument`] under a single id and is replaced wholesale on
//! every publish, so at most one block per id ever exists.

use std::fmt::Write as _;

use crate::scheme::{Roles, Scheme, ThemeMode};

/// Id of the dynamic color style block.
pub const STYLE_ID: &str = "dynamic-color-vars";

/// Prefix of every published variable.
pub const TOKEN_PREFIX: &str = "--md-sys-color-";

// ---------------------------------------------------------------------------
// Scopes and tokens
// ---------------------------------------------------------------------------

/// When a scope's declarations apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeCondition {
    /// No mode marker on the root.
    Ambient,
    /// The root carries this mode's marker.
    Mode(ThemeMode),
}

impl ScopeCondition {
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Ambient => ":root:not(.theme-light):not(.theme-dark)",
            Self::Mode(ThemeMode::Light) => ".theme-light",
            Self::Mode(ThemeMode::Dark) => ".theme-dark",
        }
    }

    /// Whether this scope is active for the given root marker.
    #[must_use]
    pub fn matches(self, marker: Option<ThemeMode>) -> bool {
        match (self, marker) {
            (Self::Ambient, None) => true,
            (Self::Mode(mode), Some(active)) => mode == active,
            _ => false,
        }
    }
}

/// One `--name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub value: String,
}

impl Token {
    fn new(key: &str, value: &str) -> Self {
        Self {
            name: format!("{TOKEN_PREFIX}{key}"),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub condition: ScopeCondition,
    pub tokens: Vec<Token>,
}

impl Scope {
    fn from_roles(condition: ScopeCondition, roles: &Roles) -> Self {
        let tokens = roles
            .iter()
            .flat_map(|(role, pair)| {
                [
                    Token::new(role.key(), &pair.color),
                    Token::new(role.on_key(), &pair.on_color),
                ]
            })
            .collect();
        Self { condition, tokens }
    }

    /// Value declared for a full variable name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }
}

/// The full set of declarations published for one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    scopes: Vec<Scope>,
}

impl TokenSet {
    #[must_use]
    pub fn from_scheme(scheme: &Scheme) -> Self {
        Self {
            scopes: vec![
                Scope::from_roles(ScopeCondition::Ambient, &scheme.light),
                Scope::from_roles(ScopeCondition::Mode(ThemeMode::Light), &scheme.light),
                Scope::from_roles(ScopeCondition::Mode(ThemeMode::Dark), &scheme.dark),
            ],
        }
    }

    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Number of declarations across all scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.iter().map(|s| s.tokens.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of `name` in the scope with `condition`.
    #[must_use]
    pub fn get(&self, condition: ScopeCondition, name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .filter(|s| s.condition == condition)
            .find_map(|s| s.get(name))
    }

    /// Render as a CSS fragment.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for scope in &self.scopes {
            let _ = writeln!(css, "{} {{", scope.condition.selector());
            for token in &scope.tokens {
                let _ = writeln!(css, "  {}: {};", token.name, token.value);
            }
            css.push_str("}\n");
        }
        css
    }
}

// ---------------------------------------------------------------------------
// StyleDocument
// ---------------------------------------------------------------------------

/// An installed style block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    pub id: String,
    pub tokens: TokenSet,
}

/// The live style surface consumers read from: installed blocks in document
/// order plus the root mode marker.
#[derive(Debug, Clone, Default)]
pub struct StyleDocument {
    blocks: Vec<StyleBlock>,
    mode: Option<ThemeMode>,
}

impl StyleDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `tokens` under `id`, replacing any block already there.
    pub fn upsert_style(&mut self, id: &str, tokens: TokenSet) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
            block.tokens = tokens;
        } else {
            self.blocks.push(StyleBlock {
                id: id.to_owned(),
                tokens,
            });
        }
    }

    #[must_use]
    pub fn style(&self, id: &str) -> Option<&TokenSet> {
        self.blocks.iter().find(|b| b.id == id).map(|b| &b.tokens)
    }

    #[must_use]
    pub fn blocks(&self) -> &[StyleBlock] {
        &self.blocks
    }

    #[must_use]
    pub const fn mode(&self) -> Option<ThemeMode> {
        self.mode
    }

    pub const fn set_mode(&mut self, mode: Option<ThemeMode>) {
        self.mode = mode;
    }

    /// What a consumer reads for `name` under the current root marker.
    ///
    /// Later blocks override earlier ones, as in the cascade.
    #[must_use]
    pub fn resolve_var(&self, name: &str) -> Option<&str> {
        self.blocks.iter().rev().find_map(|block| {
            block
                .tokens
                .scopes()
                .iter()
                .rev()
                .filter(|s| s.condition.matches(self.mode))
                .find_map(|s| s.get(name))
        })
    }

    /// Render every block, each headed by its id. An active mode marker
    /// comes first as `/* root: .theme-dark */`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(mode) = self.mode {
            let _ = writeln!(css, "/* root: .{} */", mode.class_name());
        }
        for block in &self.blocks {
            let _ = writeln!(css, "/* {} */", block.id);
            css.push_str(&block.tokens.to_css());
        }
        css
    }
}

/// Install `scheme` as the block `id` of `document`.
pub fn publish(document: &mut StyleDocument, id: &str, scheme: &Scheme) {
    document.upsert_style(id, TokenSet::from_scheme(scheme));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
