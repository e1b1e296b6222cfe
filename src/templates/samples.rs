//! Concrete config samples written under `config/`
//!
//! One typed value per layer, serialised in the chosen format. yaml and
//! json go through serde; ini has no serde backend in our stack and is
//! written by hand as a `[DEFAULT]` section plus a `[database]` section.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::paths::project;
use crate::spec::ConfigFormat;

/// Config layer a sample file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Default,
    Production,
    /// `local.<ext>.example`, copied by hand to `local.<ext>`
    LocalExample,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Default, Layer::Production, Layer::LocalExample];

    /// Path relative to the project root
    pub fn relative_path(self, format: ConfigFormat) -> PathBuf {
        let ext = format.extension();
        match self {
            Layer::Default => project::config_sample("default", ext),
            Layer::Production => project::config_sample("production", ext),
            Layer::LocalExample => project::config_sample("local", &format!("{ext}.example")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct AppConfig {
    app_name: String,
    debug: bool,
    host: String,
    port: u16,
    database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize)]
struct DatabaseConfig {
    host: String,
    port: u16,
    name: String,
    user: String,
    password: String,
}

impl AppConfig {
    fn for_layer(name: &str, layer: Layer) -> Self {
        match layer {
            Layer::Default => Self {
                app_name: name.to_string(),
                debug: true,
                host: "localhost".to_string(),
                port: 8000,
                database: DatabaseConfig {
                    host: "localhost".to_string(),
                    port: 5432,
                    name: format!("{name}_dev"),
                    user: "postgres".to_string(),
                    password: "postgres".to_string(),
                },
            },
            Layer::Production => Self {
                app_name: name.to_string(),
                debug: false,
                host: "0.0.0.0".to_string(),
                port: 8000,
                database: DatabaseConfig {
                    host: "db.example.com".to_string(),
                    port: 5432,
                    name: name.to_string(),
                    user: name.to_string(),
                    password: "change-me".to_string(),
                },
            },
            Layer::LocalExample => Self {
                app_name: name.to_string(),
                debug: true,
                host: "127.0.0.1".to_string(),
                port: 8080,
                database: DatabaseConfig {
                    host: "localhost".to_string(),
                    port: 5432,
                    name: format!("{name}_local"),
                    user: "postgres".to_string(),
                    password: String::new(),
                },
            },
        }
    }
}

/// Sample file contents for `layer` in `format`
pub fn render(project_name: &str, layer: Layer, format: ConfigFormat) -> Result<String> {
    let config = AppConfig::for_layer(project_name, layer);
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(&config).context("Failed to serialise yaml sample")
        }
        ConfigFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&config).context("Failed to serialise json sample")?;
            json.push('\n');
            Ok(json)
        }
        ConfigFormat::Ini => Ok(to_ini(&config)),
    }
}

fn to_ini(config: &AppConfig) -> String {
    let db = &config.database;
    let mut out = String::from("[DEFAULT]\n");
    let _ = writeln!(out, "app_name = {}", config.app_name);
    let _ = writeln!(out, "debug = {}", config.debug);
    let _ = writeln!(out, "host = {}", config.host);
    let _ = writeln!(out, "port = {}", config.port);

    out.push_str("\n[database]\n");
    let _ = writeln!(out, "host = {}", db.host);
    let _ = writeln!(out, "port = {}", db.port);
    let _ = writeln!(out, "name = {}", db.name);
    let _ = writeln!(out, "user = {}", db.user);
    let _ = writeln!(out, "password = {}", db.password);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_sample_paths() {
        assert_eq!(
            Layer::Default.relative_path(ConfigFormat::Yaml),
            Path::new("config/default.yaml")
        );
        assert_eq!(
            Layer::LocalExample.relative_path(ConfigFormat::Ini),
            Path::new("config/local.ini.example")
        );
    }

    #[test]
    fn test_yaml_parses_back() -> Result<()> {
        let text = render("demo", Layer::Default, ConfigFormat::Yaml)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&text)?;
        assert_eq!(value["app_name"].as_str(), Some("demo"));
        assert_eq!(value["debug"].as_bool(), Some(true));
        assert_eq!(value["database"]["port"].as_u64(), Some(5432));
        Ok(())
    }

    #[test]
    fn test_json_is_pretty_with_trailing_newline() -> Result<()> {
        let text = render("demo", Layer::Production, ConfigFormat::Json)?;
        assert!(text.starts_with("{\n  \"app_name\": \"demo\""));
        assert!(text.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value["debug"], serde_json::json!(false));
        Ok(())
    }

    #[test]
    fn test_ini_sections() -> Result<()> {
        let text = render("demo", Layer::Default, ConfigFormat::Ini)?;
        assert_eq!(
            text,
            "[DEFAULT]\n\
             app_name = demo\n\
             debug = true\n\
             host = localhost\n\
             port = 8000\n\
             \n\
             [database]\n\
             host = localhost\n\
             port = 5432\n\
             name = demo_dev\n\
             user = postgres\n\
             password = postgres\n"
        );
        Ok(())
    }
}
