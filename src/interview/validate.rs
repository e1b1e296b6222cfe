//! Answer validators
//!
//! Each validator is a pure function from the trimmed answer to either the
//! parsed value or a message shown before asking again.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::spec::ProjectName;

pub type Validation<T> = Result<T, String>;

/// Project name matching `^[A-Za-z][A-Za-z0-9_-]*$`
pub fn name_ok(answer: &str) -> Validation<ProjectName> {
    ProjectName::parse(answer)
}

/// `y` / `n`, case-insensitive
pub fn yn_ok(answer: &str) -> Validation<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err("please answer y or n".to_string()),
    }
}

/// Empty, or anything containing `@`
pub fn email_ok(answer: &str) -> Validation<String> {
    if answer.is_empty() || answer.contains('@') {
        Ok(answer.to_string())
    } else {
        Err("please enter a valid email address".to_string())
    }
}

/// Decimal integer in `1..=n`, returned zero-based
pub fn choice_ok(n: usize) -> impl Fn(&str) -> Validation<usize> {
    move |answer| match answer.parse::<usize>() {
        Ok(choice) if (1..=n).contains(&choice) => Ok(choice - 1),
        Ok(_) => Err(format!("please enter a number between 1 and {n}")),
        Err(_) => Err("please enter a valid number".to_string()),
    }
}

/// Dotted version such as `3.9`, wrapped as `>=3.9`.
///
/// An answer that already starts with `>=` is accepted as-is.
pub fn min_version_ok(answer: &str) -> Validation<String> {
    static DOTTED: OnceLock<Regex> = OnceLock::new();
    let dotted = DOTTED.get_or_init(|| Regex::new(r"^\d+(\.\d+){0,2}$").expect("regex is valid"));

    let version = answer.strip_prefix(">=").unwrap_or(answer).trim();
    if dotted.is_match(version) {
        Ok(format!(">={version}"))
    } else {
        Err("please enter a version such as 3.9".to_string())
    }
}

/// Free-form text
pub fn any(answer: &str) -> Validation<String> {
    Ok(answer.to_string())
}

/// Existing, writable directory. `~` is expanded and relative paths are
/// resolved against `base`.
pub fn dir_ok(base: &Path) -> impl Fn(&str) -> Validation<PathBuf> + '_ {
    move |answer| {
        let expanded = shellexpand::tilde(answer);
        let path = base.join(expanded.as_ref());

        let metadata = fs::metadata(&path)
            .map_err(|_| format!("{} does not exist", path.display()))?;
        if !metadata.is_dir() {
            return Err(format!("{} is not a directory", path.display()));
        }
        if !is_writable(&path) {
            return Err(format!("{} is not writable", path.display()));
        }

        Ok(normalize(&path))
    }
}

/// Permission bits do not account for ownership, so try creating a file
fn is_writable(dir: &Path) -> bool {
    tempfile::Builder::new()
        .prefix(".pyskel-")
        .tempfile_in(dir)
        .is_ok()
}

/// Drop `.` components and trailing separators without touching symlinks
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
