//! Internal implementation for settings module

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::{paths, ui};

/// Contents of `~/.pyskel/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub probe: ProbeSection,
}

/// Prompt defaults offered during the interview
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefaultsSection {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Dotted version, e.g. "3.9"
    #[serde(default)]
    pub min_python: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProbeSection {
    /// Per-candidate `--version` timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Searched after the built-in glob patterns
    #[serde(default)]
    pub extra_globs: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    2000
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            extra_globs: Vec::new(),
        }
    }
}

impl ProbeSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Settings {
    /// Apply `PYSKEL_*` overrides from `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(author) = lookup("PYSKEL_AUTHOR") {
            self.defaults.author = Some(author);
        }
        if let Some(email) = lookup("PYSKEL_EMAIL") {
            self.defaults.email = Some(email);
        }
        if let Some(raw) = lookup("PYSKEL_PROBE_TIMEOUT_MS") {
            match raw.trim().parse() {
                Ok(ms) => self.probe.timeout_ms = ms,
                Err(_) => tracing::warn!("ignoring PYSKEL_PROBE_TIMEOUT_MS={raw}: not a number"),
            }
        }
    }
}

pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))
}

pub fn load_user() -> Settings {
    let path = paths::config_path();
    let mut settings = match load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            ui::warn(format!("{e:#}; using built-in defaults"));
            Settings::default()
        }
    };
    settings.apply_env(|key| std::env::var(key).ok());
    tracing::debug!(?settings, "settings loaded");
    settings
}
