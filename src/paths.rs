//! Single source of truth for every path pyskel reads or writes.
//!
//! This module defines WHERE things live. It has no I/O and no business
//! logic: one file shows the user-level layout and the layout of a
//! generated project.
//!
//! # User-Level Paths (~/.pyskel/)
//!
//! ```text
//! ~/.pyskel/
//! └── config.toml              # Interview defaults, probe tuning
//! ```
//!
//! # Generated Project (project_path/project_name/)
//!
//! ```text
//! <name>/
//! ├── README.md
//! ├── requirements.txt
//! ├── setup.py
//! ├── .gitignore               # git only
//! ├── .venv/                   # venv only, created by the interpreter
//! ├── config/                  # samples when config is enabled
//! ├── docs/helper.md           # logging or config enabled
//! ├── src/<name>/
//! │   ├── __init__.py
//! │   ├── main.py
//! │   ├── utils/               # logging only
//! │   └── config/              # config only
//! └── tests/test_main.py
//! ```

use std::path::PathBuf;

// =============================================================================
// User Level (~/.pyskel/)
// =============================================================================

/// User's pyskel home directory: `~/.pyskel/`
pub fn pyskel_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pyskel")
}

/// User config file: `~/.pyskel/config.toml`
pub fn config_path() -> PathBuf {
    pyskel_home().join("config.toml")
}

// =============================================================================
// Generated Project (relative to the project directory)
// =============================================================================

/// Paths inside a generated project, relative to its root.
///
/// ```
/// use std::path::Path;
/// use pyskel::paths::project;
///
/// assert_eq!(project::package_dir("demo"), Path::new("src/demo"));
/// assert_eq!(project::config_sample("default", "json"), Path::new("config/default.json"));
/// ```
pub mod project {
    use super::*;

    /// Sandbox directory: `.venv/`
    pub const VENV_DIR: &str = ".venv";

    pub fn readme() -> PathBuf {
        PathBuf::from("README.md")
    }

    pub fn requirements() -> PathBuf {
        PathBuf::from("requirements.txt")
    }

    pub fn setup_py() -> PathBuf {
        PathBuf::from("setup.py")
    }

    pub fn gitignore() -> PathBuf {
        PathBuf::from(".gitignore")
    }

    pub fn src_dir() -> PathBuf {
        PathBuf::from("src")
    }

    pub fn tests_dir() -> PathBuf {
        PathBuf::from("tests")
    }

    pub fn docs_dir() -> PathBuf {
        PathBuf::from("docs")
    }

    /// Config samples: `config/`
    pub fn config_dir() -> PathBuf {
        PathBuf::from("config")
    }

    /// Importable package: `src/{name}/`
    pub fn package_dir(name: &str) -> PathBuf {
        src_dir().join(name)
    }

    /// Logging helpers: `src/{name}/utils/`
    pub fn utils_dir(name: &str) -> PathBuf {
        package_dir(name).join("utils")
    }

    /// Layered config loader: `src/{name}/config/`
    pub fn config_package_dir(name: &str) -> PathBuf {
        package_dir(name).join("config")
    }

    /// User guide for optional subsystems: `docs/helper.md`
    pub fn helper_doc() -> PathBuf {
        docs_dir().join("helper.md")
    }

    /// Sample config layer: `config/{layer}.{ext}`
    pub fn config_sample(layer: &str, ext: &str) -> PathBuf {
        config_dir().join(format!("{layer}.{ext}"))
    }

    /// Entry added to `.gitignore` so local overrides stay private: `config/local.{ext}`
    pub fn local_config_ignore_entry(ext: &str) -> String {
        format!("config/local.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_pyskel_home() {
        let home = pyskel_home();
        assert!(home.ends_with(".pyskel"));
        assert!(config_path().starts_with(&home));
    }

    #[test]
    fn test_project_paths() {
        assert_eq!(project::package_dir("demo"), Path::new("src/demo"));
        assert_eq!(project::utils_dir("demo"), Path::new("src/demo/utils"));
        assert_eq!(
            project::config_package_dir("demo"),
            Path::new("src/demo/config")
        );
        assert_eq!(project::helper_doc(), Path::new("docs/helper.md"));
        assert_eq!(
            project::config_sample("local", "ini.example"),
            Path::new("config/local.ini.example")
        );
        assert_eq!(project::local_config_ignore_entry("yaml"), "config/local.yaml");
    }
}
