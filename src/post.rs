//! Best-effort steps after the tree is on disk
//!
//! Git first, then the virtual environment. A failing step is reported
//! as a warning and never fails the run.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::git;
use crate::sandbox;
use crate::spec::ProjectSpec;
use crate::ui;

/// What the post actions did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostReport {
    pub git_initialised: bool,
    /// Set when the venv was created
    pub venv_dir: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl PostReport {
    fn warn(&mut self, message: String) {
        ui::warn(&message);
        self.warnings.push(message);
    }
}

/// Run every post action `spec` asks for
pub fn run(spec: &ProjectSpec, project_dir: &Path) -> PostReport {
    let mut report = PostReport::default();

    if spec.use_vcs {
        match init_repository(project_dir) {
            Ok(()) => {
                ui::success("Git repository initialised");
                report.git_initialised = true;
            }
            Err(e) => report.warn(format!("git setup failed: {e:#}")),
        }
    }

    if let Some(interpreter) = spec.sandbox_interpreter() {
        match sandbox::create(interpreter, project_dir) {
            Ok(venv_dir) => {
                ui::success(format!("Virtual environment created at {}", venv_dir.display()));
                if let Err(e) = sandbox::rewrite_readme(project_dir, interpreter) {
                    report.warn(format!("could not update README.md: {e:#}"));
                }
                report.venv_dir = Some(venv_dir);
            }
            Err(e) => report.warn(format!("virtual environment not created: {e:#}")),
        }
    }

    report
}

fn init_repository(project_dir: &Path) -> Result<()> {
    git::init(project_dir)?;
    git::add_all(project_dir)?;
    git::commit(project_dir, git::INITIAL_COMMIT_MESSAGE)
}

/// Lines of the closing "Next steps" block
pub fn next_steps(spec: &ProjectSpec, report: &PostReport) -> Vec<String> {
    let mut steps = vec![format!("cd {}", spec.project_dir().display())];

    if report.venv_dir.is_none() {
        steps.push(sandbox::README_VENV_COMMAND.to_string());
    }
    steps.push(sandbox::activate_command());
    steps.push("pip install -r requirements.txt".to_string());
    steps.push("pip install -e .".to_string());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ProjectName;

    fn spec() -> ProjectSpec {
        ProjectSpec::new(ProjectName::parse("demo").unwrap(), "/work")
    }

    #[test]
    fn test_nothing_requested_is_empty_report() {
        let report = run(&spec(), Path::new("/nonexistent"));
        assert_eq!(report, PostReport::default());
    }

    #[test]
    fn test_next_steps_without_venv() {
        let steps = next_steps(&spec(), &PostReport::default());
        assert_eq!(steps[0], "cd /work/demo");
        assert_eq!(steps[1], "python3 -m venv .venv");
        assert_eq!(steps.last().map(String::as_str), Some("pip install -e ."));
    }

    #[test]
    fn test_next_steps_with_venv() {
        let report = PostReport {
            venv_dir: Some(PathBuf::from("/work/demo/.venv")),
            ..PostReport::default()
        };
        let steps = next_steps(&spec(), &report);
        assert!(!steps.iter().any(|s| s.contains("-m venv")));
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn test_git_failure_is_a_warning() {
        let mut spec = spec();
        spec.use_vcs = true;
        // git cannot run inside a directory that does not exist
        let report = run(&spec, Path::new("/definitely/not/a/dir"));
        assert!(!report.git_initialised);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("git setup failed"));
    }
}
