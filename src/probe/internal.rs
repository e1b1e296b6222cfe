//! Internal implementation for interpreter discovery

use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;

use crate::process;
use crate::spec::DiscoveredInterpreter;

/// Expand glob patterns into executable files, in pattern order
pub fn glob_candidates(patterns: &[String], failures: &mut Vec<String>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for pattern in patterns {
        let paths = match glob::glob(pattern) {
            Ok(paths) => paths,
            Err(e) => {
                failures.push(format!("bad glob pattern {pattern}: {e}"));
                continue;
            }
        };

        for entry in paths {
            match entry {
                Ok(path) if is_executable_file(&path) => candidates.push(path),
                Ok(path) => tracing::debug!(path = %path.display(), "skipping non-executable"),
                Err(e) => tracing::debug!("unreadable glob entry: {e}"),
            }
        }
    }

    candidates
}

/// Run `--version` on every candidate; failures are recorded, not returned
pub fn query_versions(
    candidates: Vec<PathBuf>,
    timeout: Duration,
    failures: &mut Vec<String>,
) -> Vec<DiscoveredInterpreter> {
    let mut found = Vec::new();

    for path in candidates {
        if !is_executable_file(&path) {
            tracing::debug!(path = %path.display(), "skipping missing or non-executable");
            continue;
        }

        match query_version(&path, timeout) {
            Ok(label) => {
                tracing::debug!(path = %path.display(), %label, "interpreter found");
                found.push(DiscoveredInterpreter::new(path, label));
            }
            Err(reason) => {
                tracing::debug!(path = %path.display(), %reason, "candidate discarded");
                failures.push(format!("{}: {reason}", path.display()));
            }
        }
    }

    found
}

fn query_version(path: &Path, timeout: Duration) -> Result<String, String> {
    let output = process::output_with_timeout(Command::new(path).arg("--version"), timeout)
        .map_err(|e| format!("{e:#}"))?
        .ok_or_else(|| format!("no answer within {}ms", timeout.as_millis()))?;

    if !output.success() {
        return Err(format!("--version exited with {}", output.status));
    }

    match output.first_nonempty_stream() {
        "" => Err("--version printed nothing".to_string()),
        label => Ok(label.to_string()),
    }
}

/// Regular file (after following symlinks) with an execute bit set
pub fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    let executable = {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    };
    #[cfg(not(unix))]
    let executable = true;

    executable
}

/// Numeric components of the first dotted version in a label.
///
/// `"Python 3.11.4"` gives `[3, 11, 4]`; a label without digits gives `[]`.
pub fn version_key(label: &str) -> Vec<u64> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)*").expect("version regex is valid"));

    re.find(label)
        .map(|m| {
            m.as_str()
                .split('.')
                .filter_map(|part| part.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Version-aware ascending order, exact duplicates removed
pub fn sort_and_dedup(mut found: Vec<DiscoveredInterpreter>) -> Vec<DiscoveredInterpreter> {
    found.sort_by(|a, b| {
        version_key(&a.version_label)
            .cmp(&version_key(&b.version_label))
            .then_with(|| a.version_label.cmp(&b.version_label))
            .then_with(|| a.path.cmp(&b.path))
    });
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_key() {
        assert_eq!(version_key("Python 3.11.4"), vec![3, 11, 4]);
        assert_eq!(version_key("P 3.9"), vec![3, 9]);
        assert_eq!(version_key("Python 3.12.0 (Homebrew)"), vec![3, 12, 0]);
        assert!(version_key("unknown").is_empty());
    }

    #[test]
    fn test_sort_is_version_aware() {
        let sorted = sort_and_dedup(vec![
            DiscoveredInterpreter::new("/usr/local/bin/py", "P 3.11"),
            DiscoveredInterpreter::new("/usr/bin/py", "P 3.9"),
            DiscoveredInterpreter::new("/usr/bin/py3", "P 3.10"),
        ]);
        let labels: Vec<_> = sorted.iter().map(|i| i.version_label.as_str()).collect();
        assert_eq!(labels, vec!["P 3.9", "P 3.10", "P 3.11"]);
    }

    #[test]
    fn test_dedup_keeps_distinct_paths() {
        let sorted = sort_and_dedup(vec![
            DiscoveredInterpreter::new("/usr/bin/python3", "Python 3.9.6"),
            DiscoveredInterpreter::new("/usr/bin/python3", "Python 3.9.6"),
            DiscoveredInterpreter::new("/usr/bin/python3.9", "Python 3.9.6"),
        ]);
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].path, PathBuf::from("/usr/bin/python3"));
        assert_eq!(sorted[1].path, PathBuf::from("/usr/bin/python3.9"));
    }

    #[test]
    fn test_bad_pattern_is_recorded() {
        let mut failures = Vec::new();
        let found = glob_candidates(&["/tmp/[".to_string()], &mut failures);
        assert!(found.is_empty());
        assert_eq!(failures.len(), 1);
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_query_versions_filters_candidates() {
            let temp = TempDir::new().unwrap();
            let good = script(temp.path(), "python3.9", "echo 'Python 3.9.18'");
            let old = script(temp.path(), "python3.2", "echo 'Python 3.2.5' >&2");
            let broken = script(temp.path(), "python3-broken", "exit 1");
            let plain = temp.path().join("python3-plain");
            fs::write(&plain, "not executable").unwrap();

            let mut failures = Vec::new();
            let found = query_versions(
                vec![good.clone(), old.clone(), broken, plain],
                Duration::from_secs(2),
                &mut failures,
            );

            assert_eq!(
                found,
                vec![
                    DiscoveredInterpreter::new(good, "Python 3.9.18"),
                    DiscoveredInterpreter::new(old, "Python 3.2.5"),
                ]
            );
            assert_eq!(failures.len(), 1);
        }

        #[test]
        fn test_slow_candidate_is_discarded() {
            let temp = TempDir::new().unwrap();
            let slow = script(temp.path(), "python3-slow", "sleep 5; echo 'Python 3.0'");

            let mut failures = Vec::new();
            let found = query_versions(vec![slow], Duration::from_millis(100), &mut failures);

            assert!(found.is_empty());
            assert!(failures[0].contains("no answer"));
        }

        #[test]
        fn test_candidate_leaving_background_job_is_discarded() {
            let temp = TempDir::new().unwrap();
            let forking = script(temp.path(), "python3-fork", "echo 'Python 3.9'; sleep 6 &");

            let started = std::time::Instant::now();
            let mut failures = Vec::new();
            let found = query_versions(vec![forking], Duration::from_millis(200), &mut failures);

            assert!(started.elapsed() < Duration::from_secs(2));
            assert!(found.is_empty());
            assert_eq!(failures.len(), 1);
            assert!(failures[0].contains("no answer"));
        }

        #[test]
        fn test_broken_symlink_is_skipped() {
            let temp = TempDir::new().unwrap();
            let link = temp.path().join("python3.99");
            std::os::unix::fs::symlink(temp.path().join("gone"), &link).unwrap();

            let mut failures = Vec::new();
            let pattern = format!("{}/python3*", temp.path().display());
            assert!(glob_candidates(&[pattern], &mut failures).is_empty());
            assert!(failures.is_empty());
        }
    }
}
