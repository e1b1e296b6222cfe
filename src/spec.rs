//! The frozen project record produced by the interview.
//!
//! A `ProjectSpec` is built once, confirmed by the user, and then only
//! borrowed: the renderer and the post actions never mutate it. Optional
//! subsystems are modelled as `Option`s so "config enabled" and "config
//! format chosen" cannot disagree.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Semantic version stamped into every generated project
pub const PROJECT_VERSION: &str = "0.1.0";

/// License written into README.md and setup.py
pub const LICENSE: &str = "MIT";

/// Python requirement used when the user accepts the default
pub const DEFAULT_MIN_PYTHON: &str = ">=3.7";

/// Accepted shape of a project name
pub const NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*$";

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("NAME_PATTERN is a valid regex"))
}

/// Validated project name, see [`NAME_PATTERN`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, String> {
        if name_regex().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(
                "project name must start with a letter and contain only letters, digits, '_' or '-'"
                    .to_string(),
            )
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix for environment overrides read by the generated config loader.
    ///
    /// `-` is not legal in environment variable names, so it maps to `_`.
    pub fn env_prefix(&self) -> String {
        format!("{}_", self.0.to_uppercase().replace('-', "_"))
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialisation format of the generated `config/` samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Ini,
}

impl ConfigFormat {
    /// All formats in menu order
    pub const ALL: [ConfigFormat; 3] = [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Ini];

    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
            ConfigFormat::Ini => "ini",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "ini" => Ok(ConfigFormat::Ini),
            other => Err(format!("unknown config format: {other}")),
        }
    }
}

/// An interpreter that answered `--version` during discovery
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredInterpreter {
    pub path: PathBuf,
    pub version_label: String,
}

impl DiscoveredInterpreter {
    pub fn new(path: impl Into<PathBuf>, version_label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version_label: version_label.into(),
        }
    }
}

/// Everything needed to materialise a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub project_name: ProjectName,
    /// Parent directory; the project lands in `project_path/project_name`
    pub project_path: PathBuf,
    pub author: String,
    pub email: String,
    pub description: String,
    pub version: String,
    /// Requirement specifier such as `>=3.7`
    pub min_python: String,
    pub license: String,
    pub use_vcs: bool,
    pub use_logging: bool,
    /// `Some` iff the layered config subsystem is enabled
    pub config_format: Option<ConfigFormat>,
    /// `Some` iff a virtual environment will be created with this interpreter
    pub sandbox_interpreter: Option<PathBuf>,
}

impl ProjectSpec {
    /// Spec with every optional subsystem disabled
    pub fn new(project_name: ProjectName, project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_name,
            project_path: project_path.into(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            version: PROJECT_VERSION.to_string(),
            min_python: DEFAULT_MIN_PYTHON.to_string(),
            license: LICENSE.to_string(),
            use_vcs: false,
            use_logging: false,
            config_format: None,
            sandbox_interpreter: None,
        }
    }

    pub fn name(&self) -> &str {
        self.project_name.as_str()
    }

    /// `project_path / project_name`
    pub fn project_dir(&self) -> PathBuf {
        self.project_path.join(self.project_name.as_str())
    }

    pub fn use_config(&self) -> bool {
        self.config_format.is_some()
    }

    pub fn use_sandbox(&self) -> bool {
        self.sandbox_interpreter.is_some()
    }

    pub fn sandbox_interpreter(&self) -> Option<&Path> {
        self.sandbox_interpreter.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_accepts_valid_names() {
        for name in ["demo", "A", "my-app", "my_app2", "x-_-9"] {
            assert!(ProjectName::parse(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_project_name_rejects_invalid_names() {
        for name in ["", "1demo", "_demo", "-demo", "my app", "app!", "café", "a.b"] {
            assert!(ProjectName::parse(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_env_prefix_replaces_dashes() {
        let name = ProjectName::parse("my-app").unwrap();
        assert_eq!(name.env_prefix(), "MY_APP_");
        let name = ProjectName::parse("demo").unwrap();
        assert_eq!(name.env_prefix(), "DEMO_");
    }

    #[test]
    fn test_config_format_round_trips_through_str() {
        for format in ConfigFormat::ALL {
            assert_eq!(format.extension().parse::<ConfigFormat>(), Ok(format));
        }
        assert!("toml".parse::<ConfigFormat>().is_err());
    }

    #[test]
    fn test_new_spec_has_fixed_fields() {
        let spec = ProjectSpec::new(ProjectName::parse("demo").unwrap(), "/tmp");
        assert_eq!(spec.version, "0.1.0");
        assert_eq!(spec.license, "MIT");
        assert_eq!(spec.min_python, ">=3.7");
        assert_eq!(spec.project_dir(), PathBuf::from("/tmp/demo"));
        assert!(!spec.use_config());
        assert!(!spec.use_sandbox());
    }

    mod names {
        use crate::spec::ProjectName;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn well_formed_names_are_accepted(raw in "[A-Za-z][A-Za-z0-9_-]{0,20}") {
                let name = ProjectName::parse(&raw);
                prop_assert!(name.is_ok());
                let name = name.unwrap();
                prop_assert_eq!(name.as_str(), raw.as_str());
            }

            #[test]
            fn names_not_starting_with_a_letter_are_rejected(raw in "[^A-Za-z].{0,10}") {
                prop_assert!(ProjectName::parse(&raw).is_err());
            }

            #[test]
            fn one_stray_character_is_enough_to_reject(
                raw in "[A-Za-z][A-Za-z0-9_-]{0,5}[^A-Za-z0-9_-][A-Za-z0-9_-]{0,5}"
            ) {
                prop_assert!(ProjectName::parse(&raw).is_err());
            }

            #[test]
            fn env_prefix_is_a_valid_variable_prefix(raw in "[A-Za-z][A-Za-z0-9_-]{0,20}") {
                let prefix = ProjectName::parse(&raw).unwrap().env_prefix();
                prop_assert!(prefix.ends_with('_'));
                prop_assert!(prefix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
            }
        }
    }
}
