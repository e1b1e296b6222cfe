//! Settings module - user configuration for pyskel itself
//!
//! Reads `~/.pyskel/config.toml`, then applies `PYSKEL_*` environment
//! overrides. Every field has a default, so a missing or partial file is
//! valid. Settings only seed prompt defaults and probe tuning; the
//! interview still validates whatever ends up being used.
//!
//! # Example
//!
//! ```toml
//! [defaults]
//! author = "Ada Lovelace"
//! email = "ada@example.com"
//! min_python = "3.9"
//!
//! [probe]
//! timeout_ms = 2000
//! extra_globs = ["/opt/python/*/bin/python3*"]
//! ```

mod internal;

use anyhow::Result;
use std::path::Path;

pub use internal::{DefaultsSection, ProbeSection, Settings};

/// Load settings from the user config file plus environment overrides.
///
/// A malformed file is reported as a warning and ignored.
pub fn load() -> Settings {
    internal::load_user()
}

/// Load settings from an explicit file, without environment overrides
pub fn load_from(path: &Path) -> Result<Settings> {
    internal::load_from(path)
}
