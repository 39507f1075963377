//! Process-wide launcher settings, resolved once in `main`.
use anyhow::{anyhow, Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Overrides the directory holding the bundled pipeline and templates.
pub const HOME_ENV: &str = "CRISPIN_HOME";
/// Overrides the workflow engine executable.
pub const ENGINE_ENV: &str = "CRISPIN_NEXTFLOW";
pub const DEFAULT_ENGINE: &str = "nextflow";
/// Pipeline entry file, relative to the base directory.
pub const ENTRY_FILE: &str = "main.nf";

/// Read-only view of the install location and engine selection.
#[derive(Debug, Clone)]
pub struct Settings {
    base_dir: PathBuf,
    version: &'static str,
    engine: OsString,
}

impl Settings {
    pub fn new(base_dir: PathBuf, engine: OsString) -> Self {
        Self {
            base_dir,
            version: env!("CARGO_PKG_VERSION"),
            engine,
        }
    }

    /// Resolve settings from the environment and the running executable.
    pub fn resolve() -> Result<Self> {
        let base_dir = resolve_base_dir()?;
        let engine = env::var_os(ENGINE_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_ENGINE));
        tracing::debug!(
            base_dir = %base_dir.display(),
            engine = %engine.to_string_lossy(),
            "resolved settings"
        );
        Ok(Self::new(base_dir, engine))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn engine(&self) -> &OsString {
        &self.engine
    }

    /// Bundled `main.nf` used when `run` gets no `--main`.
    pub fn default_entry_path(&self) -> PathBuf {
        self.base_dir.join(ENTRY_FILE)
    }
}

fn resolve_base_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        let home = PathBuf::from(home);
        if !home.is_dir() {
            return Err(anyhow!(
                "{HOME_ENV} does not point at a directory: {}",
                home.display()
            ));
        }
        return Ok(home);
    }

    let exe = env::current_exe().context("locate crispin executable")?;
    if let Some(exe_dir) = exe.parent() {
        let candidates = [
            exe_dir.to_path_buf(),
            exe_dir.join("..").join("share").join("crispin"),
        ];
        if let Some(found) = candidates
            .into_iter()
            .find(|candidate| candidate.join(ENTRY_FILE).is_file())
        {
            return Ok(found);
        }
    }

    // Fall back to the source tree this binary was built from.
    Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}
