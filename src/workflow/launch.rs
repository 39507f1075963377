//! Process launching for the workflow engine.
//!
//! The child shares our stdin/stdout/stderr so the engine's progress output
//! reaches the terminal unbuffered.

use super::invocation::{Invocation, InvokeError};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Once;

/// Starts an assembled invocation and reports the engine's exit code.
pub trait Launcher {
    fn launch(&self, invocation: &Invocation) -> Result<i32, InvokeError>;
}

/// Launches the engine as a real child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<i32, InvokeError> {
        let program_name = invocation.program_display();
        let program = locate_program(&invocation.program).map_err(|source| {
            InvokeError::LaunchFailed {
                program: program_name.clone(),
                source,
            }
        })?;
        tracing::debug!(program = %program.display(), "spawning workflow engine");

        keep_running_on_interrupt();
        let mut child = Command::new(program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| InvokeError::LaunchFailed {
                program: program_name.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| InvokeError::Wait {
            program: program_name,
            source,
        })?;

        let code = exit_code(status);
        tracing::info!(code, "workflow engine exited");
        Ok(code)
    }
}

/// Bare names are looked up on PATH; anything with a directory part is used as is.
fn locate_program(program: &OsStr) -> io::Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }
    which::which(program).map_err(|err| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("could not find `{}` on PATH: {err}", program.to_string_lossy()),
        )
    })
}

/// Exit code to relay for a finished child.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Ctrl-C reaches the whole foreground process group. The engine decides how
/// to stop; the launcher keeps waiting so it can relay the engine's exit code.
///
/// A caught signal reverts to its default disposition across exec, so the
/// child is still interruptible. Installed at most once per process.
fn keep_running_on_interrupt() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if let Err(err) = ctrlc::set_handler(|| {
            tracing::debug!("interrupt received, waiting for workflow engine");
        }) {
            tracing::warn!(error = %err, "could not install Ctrl-C handler");
        }
    });
}
