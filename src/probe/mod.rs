//! Interpreter discovery
//!
//! Finds Python interpreters on the host that can create a virtual
//! environment:
//!
//! 1. Glob well-known install locations (`/usr/local/bin/python3*`,
//!    `/usr/bin/python3*`, `~/Library/Python/*/bin/python3*`, plus any
//!    `extra_globs` from settings)
//! 2. Ask the host package manager for installed `python@3.*` formulas
//! 3. Run `<candidate> --version` (bounded by a timeout) and keep the ones
//!    that answer
//! 4. Deduplicate and sort by version
//!
//! Discovery never fails: problems are collected next to whatever was
//! found, and the caller reports them as a single warning. An empty list
//! is a valid answer; the caller decides what to do with it.

mod internal;
pub mod package_manager;

use std::path::PathBuf;
use std::time::Duration;

use crate::settings::ProbeSection;
use crate::spec::DiscoveredInterpreter;

pub use internal::{sort_and_dedup, version_key};
pub use package_manager::{host_package_manager, Homebrew, PackageManager};

/// Executable name of the interpreter family being probed
pub const INTERPRETER_STEM: &str = "python3";

/// Anything that can list interpreters for the interview
pub trait InterpreterDiscovery {
    fn discover(&self) -> DiscoveryReport;
}

/// Result of one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Sorted by version, duplicates removed
    pub interpreters: Vec<DiscoveredInterpreter>,
    /// Candidates or sources that could not be used
    pub failures: Vec<String>,
}

impl DiscoveryReport {
    pub fn found(interpreters: Vec<DiscoveredInterpreter>) -> Self {
        Self {
            interpreters,
            failures: Vec::new(),
        }
    }

    /// One-line summary of the failures, if there were any
    pub fn warning(&self) -> Option<String> {
        self.failures.first().map(|first| {
            format!(
                "interpreter discovery hit {} problem(s), first: {first}",
                self.failures.len()
            )
        })
    }
}

/// Filesystem + package manager probe used on a real host
pub struct InterpreterProbe {
    patterns: Vec<String>,
    package_manager: Option<Box<dyn PackageManager>>,
    timeout: Duration,
}

impl InterpreterProbe {
    pub fn new(
        patterns: Vec<String>,
        package_manager: Option<Box<dyn PackageManager>>,
        timeout: Duration,
    ) -> Self {
        Self {
            patterns,
            package_manager,
            timeout,
        }
    }

    /// Probe configured for this machine
    pub fn for_host(settings: &ProbeSection) -> Self {
        let mut patterns = default_patterns(dirs::home_dir());
        patterns.extend(settings.extra_globs.iter().cloned());
        Self::new(patterns, host_package_manager(), settings.timeout())
    }

    #[cfg(test)]
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl InterpreterDiscovery for InterpreterProbe {
    fn discover(&self) -> DiscoveryReport {
        let mut failures = Vec::new();

        let mut candidates = internal::glob_candidates(&self.patterns, &mut failures);

        if let Some(pm) = &self.package_manager {
            match pm.list_interpreters() {
                Ok(paths) => candidates.extend(paths),
                Err(e) => failures.push(format!("{} listing failed: {e:#}", pm.name())),
            }
        }

        let found = internal::query_versions(candidates, self.timeout, &mut failures);

        DiscoveryReport {
            interpreters: sort_and_dedup(found),
            failures,
        }
    }
}

/// Built-in glob patterns, in search order
pub fn default_patterns(home: Option<PathBuf>) -> Vec<String> {
    let mut patterns = vec![
        format!("/usr/local/bin/{INTERPRETER_STEM}*"),
        format!("/usr/bin/{INTERPRETER_STEM}*"),
    ];
    if let Some(home) = home {
        patterns.push(format!(
            "{}/Library/Python/*/bin/{INTERPRETER_STEM}*",
            home.display()
        ));
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_order() {
        let patterns = default_patterns(Some(PathBuf::from("/home/ada")));
        assert_eq!(
            patterns,
            vec![
                "/usr/local/bin/python3*".to_string(),
                "/usr/bin/python3*".to_string(),
                "/home/ada/Library/Python/*/bin/python3*".to_string(),
            ]
        );
    }

    #[test]
    fn test_default_patterns_without_home() {
        assert_eq!(default_patterns(None).len(), 2);
    }

    #[test]
    fn test_for_host_appends_extra_globs() {
        let settings = ProbeSection {
            timeout_ms: 100,
            extra_globs: vec!["/opt/py/*/bin/python3*".to_string()],
        };
        let probe = InterpreterProbe::for_host(&settings);
        assert_eq!(
            probe.patterns().last().map(String::as_str),
            Some("/opt/py/*/bin/python3*")
        );
    }

    #[test]
    fn test_report_warning_counts_failures() {
        assert_eq!(DiscoveryReport::default().warning(), None);

        let report = DiscoveryReport {
            interpreters: Vec::new(),
            failures: vec!["/a: no answer within 10ms".to_string(), "b".to_string()],
        };
        assert_eq!(
            report.warning().as_deref(),
            Some("interpreter discovery hit 2 problem(s), first: /a: no answer within 10ms")
        );
    }

    #[test]
    fn test_bad_glob_lands_in_report() {
        let probe = InterpreterProbe::new(vec!["/[".to_string()], None, Duration::from_millis(50));
        let report = probe.discover();
        assert!(report.interpreters.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("bad glob pattern /["));
    }
}
