//! Editing configuration.
//!
//! The session owns one `EditConfig` and hands it to every operation, so
//! a replacement passed to `LiveEditSession::set_config` is validated and
//! applies from the next call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for history depth, batching and keyboard step sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Maximum number of undo steps kept (at least 1)
    pub max_history: usize,

    /// Seconds without an edit before a keyboard burst becomes one undo step
    pub batch_timeout: f64,

    /// World units moved per tick
    pub move_step: f32,

    /// Degrees rotated per tick, before `rotation_multiplier`
    pub rotation_step: f32,

    /// Scale units added per tick
    pub scale_step: f32,

    /// Extra factor applied to rotation steps
    pub rotation_multiplier: f32,

    /// Step factor while the fast modifier is held
    pub fast_multiplier: f32,

    /// Step factor while the slow modifier is held (wins over fast)
    pub slow_multiplier: f32,

    /// Lower bound for every scale component
    pub min_scale: f32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            max_history: 50,
            batch_timeout: 0.5,
            move_step: 0.05,
            rotation_step: 1.0,
            scale_step: 0.01,
            rotation_multiplier: 2.0,
            fast_multiplier: 5.0,
            slow_multiplier: 0.2,
            min_scale: 0.01,
        }
    }
}

impl EditConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EditConfig = toml::from_str(content)?;
        Ok(config.validated())
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!(target: "void_live_edit", "Loaded edit config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self.validated()
    }

    pub fn with_batch_timeout(mut self, seconds: f64) -> Self {
        self.batch_timeout = seconds;
        self.validated()
    }

    /// Replace out-of-range values with usable ones.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.max_history == 0 {
            log::warn!(target: "void_live_edit", "max_history must be at least 1, clamping");
            self.max_history = 1;
        }
        if !(self.batch_timeout.is_finite() && self.batch_timeout >= 0.0) {
            log::warn!(
                target: "void_live_edit",
                "Rejected batch_timeout {}, using {}",
                self.batch_timeout,
                defaults.batch_timeout
            );
            self.batch_timeout = defaults.batch_timeout;
        }

        let steps = [
            (&mut self.move_step, defaults.move_step, "move_step"),
            (&mut self.rotation_step, defaults.rotation_step, "rotation_step"),
            (&mut self.scale_step, defaults.scale_step, "scale_step"),
            (&mut self.rotation_multiplier, defaults.rotation_multiplier, "rotation_multiplier"),
            (&mut self.fast_multiplier, defaults.fast_multiplier, "fast_multiplier"),
            (&mut self.slow_multiplier, defaults.slow_multiplier, "slow_multiplier"),
            (&mut self.min_scale, defaults.min_scale, "min_scale"),
        ];
        for (value, default, name) in steps {
            if !(value.is_finite() && *value >= 0.0) {
                log::warn!(target: "void_live_edit", "Rejected {} {}, using {}", name, value, default);
                *value = default;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EditConfig::from_toml_str("max_history = 10\nbatch_timeout = 0.25").unwrap();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.batch_timeout, 0.25);
        assert_eq!(config.move_step, EditConfig::default().move_step);
    }

    #[test]
    fn test_max_history_clamped() {
        let config = EditConfig::from_toml_str("max_history = 0").unwrap();
        assert_eq!(config.max_history, 1);
        assert_eq!(EditConfig::default().with_max_history(0).max_history, 1);
    }

    #[test]
    fn test_invalid_values_replaced() {
        let config = EditConfig::from_toml_str("batch_timeout = -1.0\nmove_step = -3.0").unwrap();
        assert_eq!(config.batch_timeout, 0.5);
        assert_eq!(config.move_step, 0.05);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(EditConfig::from_toml_str("max_history = \"lots\"").is_err());
    }
}
