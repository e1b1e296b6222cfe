//! Turns a confirmed [`ProjectSpec`] into files on disk
//!
//! Rendering is split in two:
//!
//! - [`plan`] is pure. It returns every directory and file (with its
//!   contents) that the project needs, decided only by the `ProjectSpec`.
//! - [`write_plan`] creates the directories and writes the files under a
//!   root. Existing directories are reused and existing files with the
//!   same name are overwritten; nothing is ever deleted.
//!
//! Any I/O failure is a [`ScaffoldError::Filesystem`] and is fatal. The
//! partial tree is left in place.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScaffoldError;
use crate::paths::project;
use crate::spec::ProjectSpec;
use crate::templates::{self, samples, TemplateId, Templates};

/// A file to write, relative to the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Everything [`write_plan`] will create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Parents before children; the empty path is the project root itself
    pub directories: Vec<PathBuf>,
    pub files: Vec<FileEntry>,
}

impl RenderPlan {
    pub fn file(&self, relative_path: impl AsRef<Path>) -> Option<&FileEntry> {
        let wanted = relative_path.as_ref();
        self.files.iter().find(|f| f.relative_path == wanted)
    }
}

/// Compute the tree for `spec` without touching the filesystem
pub fn plan(spec: &ProjectSpec) -> Result<RenderPlan> {
    let templates = Templates::new()?;
    let context = templates::context(spec);
    let name = spec.name();

    let render = |id: TemplateId| templates.render(id, &context);

    let mut directories = vec![
        PathBuf::new(),
        project::src_dir(),
        project::package_dir(name),
        project::tests_dir(),
        project::docs_dir(),
        project::config_dir(),
    ];

    let mut files = vec![
        entry(project::readme(), render(TemplateId::Readme)?),
        entry(project::requirements(), render(TemplateId::Requirements)?),
        entry(project::setup_py(), render(TemplateId::SetupPy)?),
        entry(
            project::package_dir(name).join("__init__.py"),
            render(TemplateId::PackageInit)?,
        ),
        entry(
            project::package_dir(name).join("main.py"),
            render(TemplateId::PackageMain)?,
        ),
        entry(
            project::tests_dir().join("test_main.py"),
            render(TemplateId::TestMain)?,
        ),
    ];

    if spec.use_vcs {
        let mut gitignore = render(TemplateId::Gitignore)?;
        if let Some(format) = spec.config_format {
            append_line_once(
                &mut gitignore,
                &project::local_config_ignore_entry(format.extension()),
            );
        }
        files.push(entry(project::gitignore(), gitignore));
    }

    if spec.use_logging {
        let utils = project::utils_dir(name);
        directories.push(utils.clone());
        files.push(entry(utils.join("__init__.py"), render(TemplateId::UtilsInit)?));
        files.push(entry(utils.join("log.py"), render(TemplateId::LogPy)?));
    }

    if let Some(format) = spec.config_format {
        let package = project::config_package_dir(name);
        directories.push(package.clone());
        files.push(entry(package.join("__init__.py"), render(TemplateId::ConfigInit)?));
        files.push(entry(package.join("config.py"), render(TemplateId::ConfigPy)?));

        for layer in samples::Layer::ALL {
            files.push(entry(
                layer.relative_path(format),
                samples::render(name, layer, format)?,
            ));
        }
    }

    if spec.use_logging || spec.use_config() {
        let mut helper = render(TemplateId::HelperDoc)?;
        if spec.use_logging {
            helper.push_str(&render(TemplateId::HelperLogging)?);
        }
        if spec.use_config() {
            helper.push_str(&render(TemplateId::HelperConfig)?);
        }
        files.push(entry(project::helper_doc(), helper));
    }

    tracing::debug!(
        directories = directories.len(),
        files = files.len(),
        "render plan ready"
    );
    Ok(RenderPlan { directories, files })
}

/// Create `plan` under `root`
pub fn write_plan(root: &Path, plan: &RenderPlan) -> Result<()> {
    for dir in &plan.directories {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(|source| ScaffoldError::Filesystem {
            path: path.clone(),
            source,
        })?;
    }

    for file in &plan.files {
        let path = root.join(&file.relative_path);
        tracing::debug!(path = %path.display(), "writing");
        fs::write(&path, &file.contents).map_err(|source| ScaffoldError::Filesystem {
            path: path.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Plan and write the project. Returns the project directory.
pub fn render(spec: &ProjectSpec) -> Result<PathBuf> {
    let plan = plan(spec)?;
    let project_dir = spec.project_dir();
    write_plan(&project_dir, &plan)?;
    Ok(project_dir)
}

/// Append `line` unless some line of `text` already equals it
pub fn append_line_once(text: &mut String, line: &str) {
    if text.lines().any(|existing| existing.trim() == line) {
        return;
    }
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(line);
    text.push('\n');
}

fn entry(relative_path: PathBuf, contents: String) -> FileEntry {
    FileEntry {
        relative_path,
        contents,
    }
}
