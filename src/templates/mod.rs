//! Embedded templates for generated projects
//!
//! Every template is compiled into the binary with `include_str!` and
//! registered once in a strict Handlebars registry: a placeholder with no
//! value in the context is a render error, never an empty string.
//!
//! Output is not HTML-escaped. The artefacts are Python, Markdown and
//! plain text. Free-form answers placed inside Python string literals go
//! through the `py_str` helper instead.

pub mod samples;

use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde_json::{json, Value};

use crate::spec::ProjectSpec;

/// Identifier for each embedded template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Readme,
    Requirements,
    SetupPy,
    PackageInit,
    PackageMain,
    TestMain,
    Gitignore,
    UtilsInit,
    LogPy,
    ConfigInit,
    ConfigPy,
    HelperDoc,
    HelperLogging,
    HelperConfig,
}

impl TemplateId {
    pub const ALL: [TemplateId; 14] = [
        TemplateId::Readme,
        TemplateId::Requirements,
        TemplateId::SetupPy,
        TemplateId::PackageInit,
        TemplateId::PackageMain,
        TemplateId::TestMain,
        TemplateId::Gitignore,
        TemplateId::UtilsInit,
        TemplateId::LogPy,
        TemplateId::ConfigInit,
        TemplateId::ConfigPy,
        TemplateId::HelperDoc,
        TemplateId::HelperLogging,
        TemplateId::HelperConfig,
    ];

    /// Registry key
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Readme => "README.md",
            TemplateId::Requirements => "requirements.txt",
            TemplateId::SetupPy => "setup.py",
            TemplateId::PackageInit => "package/__init__.py",
            TemplateId::PackageMain => "package/main.py",
            TemplateId::TestMain => "tests/test_main.py",
            TemplateId::Gitignore => ".gitignore",
            TemplateId::UtilsInit => "utils/__init__.py",
            TemplateId::LogPy => "utils/log.py",
            TemplateId::ConfigInit => "config/__init__.py",
            TemplateId::ConfigPy => "config/config.py",
            TemplateId::HelperDoc => "docs/helper.md",
            TemplateId::HelperLogging => "docs/helper.md#logging",
            TemplateId::HelperConfig => "docs/helper.md#config",
        }
    }

    fn source(self) -> &'static str {
        match self {
            TemplateId::Readme => include_str!("../../resources/templates/python/README.md.tmpl"),
            TemplateId::Requirements => {
                include_str!("../../resources/templates/python/requirements.txt.tmpl")
            }
            TemplateId::SetupPy => include_str!("../../resources/templates/python/setup.py.tmpl"),
            TemplateId::PackageInit => {
                include_str!("../../resources/templates/python/package_init.py.tmpl")
            }
            TemplateId::PackageMain => {
                include_str!("../../resources/templates/python/main.py.tmpl")
            }
            TemplateId::TestMain => {
                include_str!("../../resources/templates/python/test_main.py.tmpl")
            }
            TemplateId::Gitignore => include_str!("../../resources/templates/python/gitignore.tmpl"),
            TemplateId::UtilsInit => {
                include_str!("../../resources/templates/python/utils_init.py.tmpl")
            }
            TemplateId::LogPy => include_str!("../../resources/templates/python/log.py.tmpl"),
            TemplateId::ConfigInit => {
                include_str!("../../resources/templates/python/config_init.py.tmpl")
            }
            TemplateId::ConfigPy => include_str!("../../resources/templates/python/config.py.tmpl"),
            TemplateId::HelperDoc => include_str!("../../resources/templates/python/helper.md.tmpl"),
            TemplateId::HelperLogging => {
                include_str!("../../resources/templates/python/helper_logging.md.tmpl")
            }
            TemplateId::HelperConfig => {
                include_str!("../../resources/templates/python/helper_config.md.tmpl")
            }
        }
    }
}

/// Escape `value` for the inside of a double-quoted Python string
pub fn escape_py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

handlebars_helper!(py_str: |value: str| escape_py_str(value));

/// Compiled template registry
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("py_str", Box::new(py_str));

        for id in TemplateId::ALL {
            registry
                .register_template_string(id.name(), id.source())
                .with_context(|| format!("Failed to compile template {}", id.name()))?;
        }

        Ok(Self { registry })
    }

    pub fn render(&self, id: TemplateId, context: &Value) -> Result<String> {
        self.registry
            .render(id.name(), context)
            .with_context(|| format!("Failed to render template {}", id.name()))
    }
}

/// Template context for a spec.
///
/// `config_format` and `env_prefix` are only present when the config
/// subsystem is enabled, so rendering a config template without it fails.
pub fn context(spec: &ProjectSpec) -> Value {
    let mut context = json!({
        "name": spec.name(),
        "version": spec.version,
        "author": spec.author,
        "email": spec.email,
        "description": spec.description,
        "license": spec.license,
        "min_python": spec.min_python,
    });

    if let Some(format) = spec.config_format {
        context["config_format"] = json!(format.extension());
        context["env_prefix"] = json!(spec.project_name.env_prefix());
    }

    context
}
