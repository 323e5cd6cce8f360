//! Generator configuration.

/// Default bound on split object unrolling.
pub const DEFAULT_MAX_UNROLL: usize = 3;

/// Default include roots stripped from declaration file paths.
pub const DEFAULT_INCLUDE_ROOTS: [&str; 2] = ["include", "prec_stl"];

/// Settings for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    class_name: Option<String>,
    max_unroll: usize,
    include_roots: Vec<String>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            class_name: None,
            max_unroll: DEFAULT_MAX_UNROLL,
            include_roots: DEFAULT_INCLUDE_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sets the name of the generated class. Defaults to the tree name.
    #[must_use]
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Sets how many levels of split objects are expanded into member readers.
    #[must_use]
    pub fn max_unroll(mut self, depth: usize) -> Self {
        self.max_unroll = depth;
        self
    }

    /// Replaces the include roots.
    #[must_use]
    pub fn include_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one include root.
    #[must_use]
    pub fn include_root(mut self, root: impl Into<String>) -> Self {
        self.include_roots.push(root.into());
        self
    }

    /// Returns the configured class name, if any.
    #[must_use]
    pub fn class_name_override(&self) -> Option<&str> {
        self.class_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the unroll depth.
    #[must_use]
    pub const fn unroll_depth(&self) -> usize {
        self.max_unroll
    }

    /// Returns the include roots.
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.include_roots
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.class_name_override(), None);
        assert_eq!(config.unroll_depth(), DEFAULT_MAX_UNROLL);
        assert_eq!(config.roots(), &["include".to_string(), "prec_stl".to_string()]);
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .class_name("MySelector")
            .max_unroll(0)
            .include_roots(["/usr/include"])
            .include_root("/opt/root/include");

        assert_eq!(config.class_name_override(), Some("MySelector"));
        assert_eq!(config.unroll_depth(), 0);
        assert_eq!(config.roots().len(), 2);
        assert_eq!(config.roots()[1], "/opt/root/include");
    }

    #[test]
    fn test_empty_class_name_ignored() {
        let config = GeneratorConfig::new().class_name("");
        assert_eq!(config.class_name_override(), None);
    }
}
