//! `[watch]` section.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! patterns = ["scss/**/*.scss", "vendor/**/*.css"]
//! delay_ms = 200
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Glob patterns whose changes trigger a rebuild.
    pub patterns: Vec<String>,
    /// Quiet period after the last change before rebuilding.
    pub delay_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["scss/**/*.scss".into()],
            delay_ms: 200,
        }
    }
}

impl WatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.patterns.is_empty() {
            diag.error("watch.patterns", "watch.patterns must not be empty");
        }

        for pattern in &self.patterns {
            if let Err(err) = glob::Pattern::new(pattern) {
                diag.error("watch.patterns", format!("invalid pattern `{pattern}`: {err}"));
            }
        }

        if self.delay_ms == 0 {
            diag.error("watch.delay_ms", "watch.delay_ms must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.watch.patterns, vec!["scss/**/*.scss"]);
        assert_eq!(config.watch.delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_zero_delay_and_empty_patterns() {
        let watch = WatchConfig {
            patterns: Vec::new(),
            delay_ms: 0,
        };
        let mut diag = ConfigDiagnostics::new();
        watch.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["watch.patterns", "watch.delay_ms"]);
    }
}
