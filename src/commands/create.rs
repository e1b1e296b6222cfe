//! The one command: interview, confirm, render, post actions

use anyhow::{Context, Result};
use std::io;

use pyskel::interview::{self, Prompter};
use pyskel::probe::InterpreterProbe;
use pyskel::{post, render, settings, ui};

/// Run the wizard against the real terminal
pub fn execute() -> Result<()> {
    let settings = settings::load();
    let probe = InterpreterProbe::for_host(&settings.probe);
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let spec = interview::build_spec(&mut prompter, &probe, &settings.defaults, &cwd)?;
    interview::confirm(&mut prompter, &spec)?;

    ui::heading("Creating project");
    let project_dir = render::render(&spec)?;
    ui::success(format!("Project files written to {}", project_dir.display()));

    let report = post::run(&spec, &project_dir);
    tracing::debug!(warnings = report.warnings.len(), "post actions finished");

    ui::heading("Next steps");
    for step in post::next_steps(&spec, &report) {
        println!("  {step}");
    }

    Ok(())
}
