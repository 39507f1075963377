//! Workflow init step.
//!
//! Init seeds the working directory with the bundled config templates so
//! users can edit them before a run.
use crate::settings::Settings;
use crate::templates::{CONFIG_TEMPLATE_PATHS, LOG_DIR};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the init step against the current working directory.
pub fn run_init(settings: &Settings) -> Result<()> {
    let cwd = env::current_dir().context("resolve current directory")?;
    for written in init_working_dir(settings.base_dir(), &cwd)? {
        println!("wrote {}", written.display());
    }
    Ok(())
}

/// Copy every config template from `base_dir` into `dest_root`, then make
/// sure the log directory exists. Returns the top-level paths written.
///
/// Existing files are overwritten; a failure part way leaves earlier copies
/// in place.
pub(crate) fn init_working_dir(base_dir: &Path, dest_root: &Path) -> Result<Vec<PathBuf>> {
    for relative in CONFIG_TEMPLATE_PATHS {
        ensure_distinct(&base_dir.join(relative), &dest_root.join(relative))?;
    }

    let mut written = Vec::with_capacity(CONFIG_TEMPLATE_PATHS.len());
    for relative in CONFIG_TEMPLATE_PATHS {
        let source = base_dir.join(relative);
        let dest = dest_root.join(relative);
        copy_template(&source, &dest)?;
        tracing::debug!(source = %source.display(), dest = %dest.display(), "copied template");
        written.push(dest);
    }
    ensure_log_dir(dest_root)?;
    Ok(written)
}

/// Copying a template onto itself truncates it, and copying a directory into
/// itself never ends; both are refused before anything is written.
fn ensure_distinct(source: &Path, dest: &Path) -> Result<()> {
    if !source.exists() {
        return Ok(());
    }
    let source = source
        .canonicalize()
        .with_context(|| format!("resolve {}", source.display()))?;
    let target = canonical_target(dest)?;
    if target == source {
        return Err(anyhow!(
            "{} and {} are the same file; run init outside the crispin install directory",
            source.display(),
            dest.display()
        ));
    }
    if source.is_dir() && target.starts_with(&source) {
        return Err(anyhow!(
            "cannot copy {} into itself at {}",
            source.display(),
            dest.display()
        ));
    }
    Ok(())
}

/// Canonical form of `path`, resolving through its parent when it does not exist yet.
fn canonical_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("resolve {}", path.display()));
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent
            .canonicalize()
            .with_context(|| format!("resolve {}", parent.display()))?
            .join(name)),
        _ => Ok(path.to_path_buf()),
    }
}

fn copy_template(source: &Path, dest: &Path) -> Result<()> {
    if source.is_dir() {
        copy_dir_all(source, dest)
    } else if source.is_file() {
        fs::copy(source, dest)
            .with_context(|| format!("copy {} to {}", source.display(), dest.display()))?;
        Ok(())
    } else {
        Err(anyhow!("cannot find template {}", source.display()))
    }
}

fn copy_dir_all(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;
    let entries = fs::read_dir(source).with_context(|| format!("read {}", source.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read {}", source.display()))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
        }
    }
    Ok(())
}

fn ensure_log_dir(dest_root: &Path) -> Result<()> {
    let log_dir = dest_root.join(LOG_DIR);
    if log_dir.is_dir() {
        tracing::debug!(path = %log_dir.display(), "log directory already present");
        return Ok(());
    }
    fs::create_dir(&log_dir).with_context(|| format!("create {}", log_dir.display()))?;
    tracing::debug!(path = %log_dir.display(), "created log directory");
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
