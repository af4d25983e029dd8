//! Configuration for the flattening pipeline.

use chartflat_foundation::names::DEFAULT_SUFFIX;

use crate::trace::TracerConfig;

/// Configuration for the flattening pipeline.
///
/// Controls how mangled names are formed and whether stages are traced.
#[derive(Clone, Debug)]
pub struct FlattenConfig {
    /// Replaces the path separator when mangling names.
    pub separator: char,
    /// Appended repeatedly until a mangled name is unique.
    pub collision_suffix: String,
    /// Stage tracing.
    pub trace: TracerConfig,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            separator: '_',
            collision_suffix: DEFAULT_SUFFIX.to_string(),
            trace: TracerConfig::default(),
        }
    }
}

impl FlattenConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that traces every stage to stderr.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            trace: TracerConfig::new().enabled().to_stderr(),
            ..Self::default()
        }
    }

    /// Builder method to set the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Builder method to set the collision suffix.
    #[must_use]
    pub fn with_collision_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.collision_suffix = suffix.into();
        self
    }

    /// Builder method to set tracing.
    #[must_use]
    pub fn with_trace(mut self, trace: TracerConfig) -> Self {
        self.trace = trace;
        self
    }
}
