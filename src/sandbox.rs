//! Virtual environment creation with the chosen interpreter

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::paths::project;
use crate::process;

/// Install command as rendered in README.md
pub const README_VENV_COMMAND: &str = "python3 -m venv .venv";

/// Run `<interpreter> -m venv <project_dir>/.venv`. Returns the venv directory.
pub fn create(interpreter: &Path, project_dir: &Path) -> Result<PathBuf> {
    let venv_dir = project_dir.join(project::VENV_DIR);
    let output = process::output(
        Command::new(interpreter)
            .args(["-m", "venv"])
            .arg(&venv_dir)
            .current_dir(project_dir),
    )?;

    if !output.success() {
        bail!(
            "{} -m venv exited with {}: {}",
            interpreter.display(),
            output.status,
            output.first_nonempty_stream()
        );
    }

    Ok(venv_dir)
}

/// README install line for a venv built with `interpreter`
pub fn readme_command(interpreter: &Path) -> String {
    let interpreter = interpreter.display();
    format!("{interpreter} -m venv .venv  # uses {interpreter}")
}

/// Point the README install snippet at `interpreter`.
///
/// Returns `false` when the README no longer contains the stock command.
pub fn rewrite_readme(project_dir: &Path, interpreter: &Path) -> Result<bool> {
    let readme = project_dir.join(project::readme());
    let text = fs::read_to_string(&readme)
        .with_context(|| format!("Failed to read {}", readme.display()))?;

    if !text.contains(README_VENV_COMMAND) {
        return Ok(false);
    }

    let rewritten = text.replacen(README_VENV_COMMAND, &readme_command(interpreter), 1);
    fs::write(&readme, rewritten)
        .with_context(|| format!("Failed to write {}", readme.display()))?;
    Ok(true)
}

/// Shell command that activates the venv
pub fn activate_command() -> String {
    if cfg!(windows) {
        format!("{}\\Scripts\\activate", project::VENV_DIR)
    } else {
        format!("source {}/bin/activate", project::VENV_DIR)
    }
}
