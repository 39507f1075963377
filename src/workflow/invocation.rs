//! Invocation model: what gets handed to the workflow engine.

use crate::cli::Mode;
use crate::settings::Settings;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The only GitHub repository the engine may fetch the pipeline from.
pub const REMOTE_REPOSITORY: &str = "CCBR/CRISPIN";

/// Where the engine should load the pipeline from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySpec {
    /// A `main.nf` on the local filesystem; must exist before launch.
    LocalPath(PathBuf),
    /// The canonical remote repository; the engine fetches it itself.
    RemoteRepository,
}

impl EntrySpec {
    /// Interpret the `--main` value, falling back to the bundled `main.nf`.
    pub fn from_arg(raw: Option<&str>, settings: &Settings) -> Self {
        match raw {
            Some(REMOTE_REPOSITORY) => EntrySpec::RemoteRepository,
            Some(path) => EntrySpec::LocalPath(PathBuf::from(path)),
            None => EntrySpec::LocalPath(settings.default_entry_path()),
        }
    }

    /// Pre-flight check run before anything is spawned.
    pub fn ensure_available(&self) -> Result<(), InvokeError> {
        match self {
            EntrySpec::RemoteRepository => Ok(()),
            EntrySpec::LocalPath(path) if path.exists() => Ok(()),
            EntrySpec::LocalPath(path) => Err(InvokeError::EntryNotFound(path.clone())),
        }
    }

    pub fn as_os_str(&self) -> &OsStr {
        match self {
            EntrySpec::LocalPath(path) => path.as_os_str(),
            EntrySpec::RemoteRepository => OsStr::new(REMOTE_REPOSITORY),
        }
    }
}

/// Failures that stop a `run` before the engine can report anything itself.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("path to the crispin main.nf file not found: {}", .0.display())]
    EntryNotFound(PathBuf),
    #[error("failed to launch `{program}`")]
    LaunchFailed {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("lost track of `{program}` while waiting for it to exit")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// A single `run` request as the user expressed it.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub entry: EntrySpec,
    pub mode: Mode,
    pub extra_args: Vec<String>,
}

/// Fully assembled engine command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `<engine> run <entry> -profile <profile> <extra_args...>`
    pub fn build(request: &InvocationRequest, engine: &OsStr) -> Self {
        let mut args = Vec::with_capacity(4 + request.extra_args.len());
        args.push(OsString::from("run"));
        args.push(request.entry.as_os_str().to_os_string());
        args.push(OsString::from("-profile"));
        args.push(OsString::from(request.mode.profile()));
        args.extend(request.extra_args.iter().map(OsString::from));
        Self {
            program: engine.to_os_string(),
            args,
        }
    }

    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Shell-quoted single line, for display only.
    pub fn render(&self) -> String {
        let words: Vec<String> = std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|word| word.to_string_lossy().into_owned())
            .collect();
        shell_words::join(words)
    }
}

/// Frame `body` under a `#`-boxed title, the way the command echo is shown.
pub fn message_box(title: &str, body: &str) -> String {
    let rule = "#".repeat(title.len() + 4);
    format!("\n{rule}\n# {title} #\n{rule}\n\n{body}\n")
}
