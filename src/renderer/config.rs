//! Output options for the SVG backend

/// How a board scene is serialized
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Prepend `<?xml ...?>`. Off by default: a diagram is normally inlined
    /// into a host document, where a declaration would be invalid.
    pub standalone: bool,

    /// One element per line, indented under `<svg>`
    pub pretty_print: bool,

    /// Prefix for class names and the arrowhead marker id (`cd-square`,
    /// `cd-arrowhead`)
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            pretty_print: true,
            class_prefix: Some("cd-".to_string()),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a standalone `.svg` file rather than an inline fragment
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Bare class names (`square`, `light`, `piece`)
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inline_fragment() {
        let config = SvgConfig::default();
        assert!(!config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("cd-"));
    }

    #[test]
    fn test_builders() {
        let config = SvgConfig::new()
            .with_standalone(true)
            .with_pretty_print(false)
            .with_class_prefix("board-");
        assert!(config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("board-"));
        assert_eq!(config.without_class_prefix().class_prefix, None);
    }
}
