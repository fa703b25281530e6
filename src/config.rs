use tern_core::{ColorScheme, Locale, DEFAULT_MAX_EXPANSION_DEPTH};

/// Settings for a root graph.
///
/// Color scheme and locale are fallbacks for when the platform does not report its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Nesting limit past which lowering fails with a cyclic composition error.
    pub max_expansion_depth: usize,
    pub color_scheme: ColorScheme,
    pub locale: Locale,
    pub app_name: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            color_scheme: ColorScheme::Light,
            locale: Locale::default(),
            app_name: None,
        }
    }
}

impl GraphConfig {
    pub fn with_max_expansion_depth(mut self, limit: usize) -> GraphConfig {
        self.max_expansion_depth = limit;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> GraphConfig {
        self.color_scheme = scheme;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> GraphConfig {
        self.locale = locale;
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> GraphConfig {
        self.app_name = Some(name.into());
        self
    }
}
