//! Low-level git operations

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::process;

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd
}

/// Create an empty repository in `dir`
pub fn init(dir: &Path) -> Result<()> {
    let output = process::output(git(dir).arg("init")).context("Failed to run git init")?;

    if !output.success() {
        anyhow::bail!("git init failed: {}", output.stderr.trim());
    }

    Ok(())
}

/// Stage everything under `dir`
pub fn add_all(dir: &Path) -> Result<()> {
    let output =
        process::output(git(dir).args(["add", "."])).context("Failed to stage changes")?;

    if !output.success() {
        anyhow::bail!("Failed to stage changes: {}", output.stderr.trim());
    }

    Ok(())
}

/// Create a commit
pub fn commit(dir: &Path, message: &str) -> Result<()> {
    let output = process::output(git(dir).args(["commit", "-m", message]))
        .context("Failed to create commit")?;

    if !output.success() {
        anyhow::bail!("Failed to create commit: {}", output.first_nonempty_stream());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    #[test]
    fn test_init_and_stage() -> Result<()> {
        if !git_available() {
            return Ok(());
        }
        let temp = TempDir::new()?;
        fs::write(temp.path().join("README.md"), "# demo\n")?;

        init(temp.path())?;
        assert!(temp.path().join(".git").is_dir());
        add_all(temp.path())?;

        let staged = process::output(git(temp.path()).args(["diff", "--cached", "--name-only"]))?;
        assert_eq!(staged.stdout.trim(), "README.md");
        Ok(())
    }

    #[test]
    fn test_commit_outside_repo_fails() -> Result<()> {
        if !git_available() {
            return Ok(());
        }
        let temp = TempDir::new()?;
        assert!(commit(temp.path(), "nothing").is_err());
        Ok(())
    }
}
