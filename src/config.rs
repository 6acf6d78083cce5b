//! Runtime configuration layered on top of the compiled-in task table.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SignError, SignResult};
use crate::task::base::TaskInfo;

/// Scheduler and registry settings, usually loaded from JSON.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignConfig {
    /// Ticks per second of the render loop.
    pub fps: u32,
    /// Overrides every task's suggested run time when set.
    pub default_run_secs: Option<f64>,
    /// Per-title run time overrides (titles match case-insensitively).
    pub run_secs: BTreeMap<String, f64>,
    /// Titles to disable in addition to the compiled-in flags.
    pub disabled: Vec<String>,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            fps: 24,
            default_run_secs: None,
            run_secs: BTreeMap::new(),
            disabled: Vec::new(),
        }
    }
}

impl SignConfig {
    /// Parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SignResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> SignResult<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| SignError::config(format!("parse: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SignResult<()> {
        if self.fps == 0 || self.fps > 240 {
            return Err(SignError::config(format!(
                "fps must be in 1..=240, got {}",
                self.fps
            )));
        }
        let bad_secs = |s: f64| !s.is_finite() || s <= 0.0;
        if let Some(s) = self.default_run_secs.filter(|s| bad_secs(*s)) {
            return Err(SignError::config(format!(
                "default_run_secs must be positive, got {s}"
            )));
        }
        if let Some((title, s)) = self.run_secs.iter().find(|(_, s)| bad_secs(**s)) {
            return Err(SignError::config(format!(
                "run_secs for '{title}' must be positive, got {s}"
            )));
        }
        Ok(())
    }

    /// Seconds between ticks.
    pub fn frame_delta_secs(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    /// How long `info`'s task should stay on screen.
    pub fn run_secs_for(&self, info: &TaskInfo) -> f64 {
        self.run_secs
            .iter()
            .find(|(title, _)| title.eq_ignore_ascii_case(&info.title))
            .map(|(_, s)| *s)
            .or(self.default_run_secs)
            .unwrap_or(info.suggested_run_secs)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
