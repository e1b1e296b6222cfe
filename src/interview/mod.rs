//! The interview that produces a [`ProjectSpec`]
//!
//! Questions are asked in a fixed order:
//!
//! name → path → author → email → description → minimum Python →
//! git → venv → logging → config → [config format] → [interpreter]
//!
//! The interpreter question only appears when a virtual environment was
//! requested. If discovery finds nothing, the venv is dropped with a
//! warning and the interview carries on.

pub mod prompt;
pub mod validate;

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::ScaffoldError;
use crate::probe::InterpreterDiscovery;
use crate::settings::DefaultsSection;
use crate::spec::{ConfigFormat, DiscoveredInterpreter, ProjectSpec, DEFAULT_MIN_PYTHON};

pub use prompt::Prompter;

/// Run the interview and return the project spec, not yet confirmed.
///
/// `cwd` is the default project path and the base for relative answers.
pub fn build_spec<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    discovery: &dyn InterpreterDiscovery,
    defaults: &DefaultsSection,
    cwd: &Path,
) -> Result<ProjectSpec> {
    prompter.say("\n=== Python project wizard ===\n")?;

    let name = prompter.ask("Project name", None, validate::name_ok)?;

    let cwd_display = cwd.display().to_string();
    let project_path = prompter.ask(
        "Project path (Enter for current directory)",
        Some(cwd_display.as_str()),
        validate::dir_ok(cwd),
    )?;

    let mut spec = ProjectSpec::new(name, project_path);

    spec.author = prompter.ask("Author name", defaults.author.as_deref(), validate::any)?;
    spec.email = prompter.ask("Author email", defaults.email.as_deref(), validate::email_ok)?;
    spec.description = prompter.ask("Project description", None, validate::any)?;

    let default_python = defaults
        .min_python
        .clone()
        .unwrap_or_else(|| DEFAULT_MIN_PYTHON.trim_start_matches(">=").to_string());
    spec.min_python = prompter.ask(
        "Minimum Python version",
        Some(default_python.as_str()),
        validate::min_version_ok,
    )?;

    spec.use_vcs = prompter.ask("Use git for version control? (y/n)", None, validate::yn_ok)?;
    let wants_venv = prompter.ask("Create a virtual environment? (y/n)", None, validate::yn_ok)?;
    spec.use_logging = prompter.ask("Add the logging helper? (y/n)", None, validate::yn_ok)?;
    let wants_config = prompter.ask("Add layered configuration? (y/n)", None, validate::yn_ok)?;

    if wants_config {
        spec.config_format = Some(choose_config_format(prompter)?);
    }

    if wants_venv {
        let report = discovery.discover();
        if let Some(warning) = report.warning() {
            prompter.warn(warning)?;
        }

        let interpreters = report.interpreters;
        if interpreters.is_empty() {
            prompter.warn("no usable Python interpreter found, skipping virtual environment")?;
        } else {
            let chosen = choose_interpreter(prompter, &interpreters)?;
            spec.sandbox_interpreter = Some(chosen.path.clone());
        }
    }

    let project_dir = spec.project_dir();
    if dir_has_entries(&project_dir) {
        prompter.warn(format!(
            "{} already exists; files with the same name will be overwritten",
            project_dir.display()
        ))?;
    }

    tracing::debug!(?spec, "interview complete");
    Ok(spec)
}

/// Show the summary and require an explicit `y`.
///
/// Anything else prints "cancelled" and returns [`ScaffoldError::Cancelled`].
pub fn confirm<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    spec: &ProjectSpec,
) -> Result<()> {
    prompter.say(summary(spec))?;

    let answer = prompter.read_answer("Create the project? (y/n)")?;
    if answer.eq_ignore_ascii_case("y") {
        Ok(())
    } else {
        prompter.say("cancelled")?;
        Err(ScaffoldError::Cancelled.into())
    }
}

/// Human-readable confirmation block
pub fn summary(spec: &ProjectSpec) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    let mut lines = vec![
        "\n=== Project summary ===".to_string(),
        format!("Name:           {}", spec.name()),
        format!("Path:           {}", spec.project_path.display()),
        format!("Author:         {}", spec.author),
        format!("Email:          {}", spec.email),
        format!("Description:    {}", spec.description),
        format!("Python:         {}", spec.min_python),
        format!("License:        {}", spec.license),
        format!("Git:            {}", yes_no(spec.use_vcs)),
        format!("Virtualenv:     {}", yes_no(spec.use_sandbox())),
        format!("Logging:        {}", yes_no(spec.use_logging)),
    ];

    match spec.config_format {
        Some(format) => lines.push(format!("Configuration:  yes ({format})")),
        None => lines.push("Configuration:  no".to_string()),
    }

    if let Some(interpreter) = spec.sandbox_interpreter() {
        lines.push(format!("Interpreter:    {}", interpreter.display()));
    }

    lines.join("\n")
}

fn choose_config_format<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<ConfigFormat> {
    prompter.say("\nConfiguration formats:")?;
    for (i, format) in ConfigFormat::ALL.iter().enumerate() {
        prompter.say(format!("{}. {format}", i + 1))?;
    }

    let question = format!("Select a format (1-{})", ConfigFormat::ALL.len());
    let index = prompter.ask(
        &question,
        Some("1"),
        validate::choice_ok(ConfigFormat::ALL.len()),
    )?;
    Ok(ConfigFormat::ALL[index])
}

fn choose_interpreter<'a, R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    interpreters: &'a [DiscoveredInterpreter],
) -> Result<&'a DiscoveredInterpreter> {
    prompter.say("\nAvailable Python interpreters:")?;
    for (i, interpreter) in interpreters.iter().enumerate() {
        prompter.say(format!(
            "{}. {} ({})",
            i + 1,
            interpreter.version_label,
            interpreter.path.display()
        ))?;
    }

    let question = format!("Select a Python interpreter (1-{})", interpreters.len());
    let index = prompter.ask(&question, None, validate::choice_ok(interpreters.len()))?;
    Ok(&interpreters[index])
}

fn dir_has_entries(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ProjectName;

    #[test]
    fn test_summary_lists_optional_parts() {
        let mut spec = ProjectSpec::new(ProjectName::parse("demo").unwrap(), "/work");
        spec.config_format = Some(ConfigFormat::Ini);
        spec.sandbox_interpreter = Some("/usr/bin/python3".into());

        let text = summary(&spec);
        assert!(text.contains("Name:           demo"));
        assert!(text.contains("Configuration:  yes (ini)"));
        assert!(text.contains("Virtualenv:     yes"));
        assert!(text.contains("Interpreter:    /usr/bin/python3"));
    }

    #[test]
    fn test_summary_without_optional_parts() {
        let spec = ProjectSpec::new(ProjectName::parse("demo").unwrap(), "/work");
        let text = summary(&spec);
        assert!(text.contains("Configuration:  no"));
        assert!(!text.contains("Interpreter:"));
    }
}
