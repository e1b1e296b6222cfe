//! Package manager seam for interpreter discovery
//!
//! Only Homebrew is implemented. Other platforms get `None` from
//! [`host_package_manager`] and rely on the filesystem globs alone.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::INTERPRETER_STEM;
use crate::process;

/// A system package manager that can list installed interpreters
pub trait PackageManager {
    fn name(&self) -> &str;

    /// Canonical executable paths of installed interpreters.
    ///
    /// Paths are candidates only; the probe still verifies them.
    fn list_interpreters(&self) -> Result<Vec<PathBuf>>;
}

/// Homebrew: `brew list --versions python@3*`
pub struct Homebrew {
    program: PathBuf,
    prefixes: Vec<PathBuf>,
}

impl Homebrew {
    /// Intel and Apple Silicon install prefixes
    pub const DEFAULT_PREFIXES: [&'static str; 2] = ["/usr/local", "/opt/homebrew"];

    pub fn new(program: impl Into<PathBuf>, prefixes: Vec<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefixes,
        }
    }

    /// Homebrew if `brew` is on PATH
    pub fn detect() -> Option<Self> {
        let program = which::which("brew").ok()?;
        tracing::debug!(brew = %program.display(), "homebrew detected");
        Some(Self::new(
            program,
            Self::DEFAULT_PREFIXES.iter().map(PathBuf::from).collect(),
        ))
    }

    /// `<prefix>/opt/<formula>/bin/python3` for every prefix
    pub fn formula_paths(&self, formula: &str) -> Vec<PathBuf> {
        self.prefixes
            .iter()
            .map(|prefix| formula_path(prefix, formula))
            .collect()
    }
}

impl PackageManager for Homebrew {
    fn name(&self) -> &str {
        "brew"
    }

    fn list_interpreters(&self) -> Result<Vec<PathBuf>> {
        let pattern = format!("python@{}*", major_version());
        let output =
            process::output(Command::new(&self.program).args(["list", "--versions", &pattern]))?;

        if !output.success() {
            bail!(
                "brew list exited with {}: {}",
                output.status,
                output.stderr.trim()
            );
        }

        Ok(parse_listing(&output.stdout)
            .iter()
            .flat_map(|formula| self.formula_paths(formula))
            .filter(|path| path.exists())
            .collect())
    }
}

/// Formula names from `brew list --versions` output.
///
/// Lines look like `python@3.11 3.11.4_1 3.11.6`; only `python@3*` formulas count.
pub fn parse_listing(stdout: &str) -> Vec<String> {
    let prefix = format!("python@{}", major_version());
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|formula| formula.starts_with(&prefix))
        .map(str::to_string)
        .collect()
}

fn formula_path(prefix: &Path, formula: &str) -> PathBuf {
    prefix
        .join("opt")
        .join(formula)
        .join("bin")
        .join(INTERPRETER_STEM)
}

fn major_version() -> &'static str {
    INTERPRETER_STEM.trim_start_matches("python")
}

/// The package manager available on this host, if any
pub fn host_package_manager() -> Option<Box<dyn PackageManager>> {
    Homebrew::detect().map(|brew| Box::new(brew) as Box<dyn PackageManager>)
}
