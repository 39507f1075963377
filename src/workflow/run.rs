//! Workflow run step: resolve the entry file and hand off to the engine.
//!
//! A run either gets rejected while resolving the entry path (nothing is
//! spawned) or terminates with the engine's exit code, which is relayed
//! unchanged.

use super::invocation::{message_box, EntrySpec, Invocation, InvocationRequest, InvokeError};
use super::launch::{Launcher, ProcessLauncher};
use crate::cli::RunArgs;
use crate::settings::Settings;
use anyhow::Result;
use std::ffi::OsStr;

/// Run the `run` command and return the exit code to relay.
pub fn run_run(args: &RunArgs, settings: &Settings) -> Result<i32> {
    run_with_launcher(args, settings, &ProcessLauncher)
}

pub(crate) fn run_with_launcher<L: Launcher + ?Sized>(
    args: &RunArgs,
    settings: &Settings,
    launcher: &L,
) -> Result<i32> {
    let request = InvocationRequest {
        entry: EntrySpec::from_arg(args.main_path.as_deref(), settings),
        mode: args.mode,
        extra_args: args.nextflow_args.clone(),
    };
    let code = invoke(&request, settings.engine(), launcher)?;
    Ok(code)
}

/// Validate the entry, build the engine command and launch it.
pub(crate) fn invoke<L: Launcher + ?Sized>(
    request: &InvocationRequest,
    engine: &OsStr,
    launcher: &L,
) -> Result<i32, InvokeError> {
    request.entry.ensure_available()?;
    tracing::info!(
        entry = %request.entry.as_os_str().to_string_lossy(),
        profile = request.mode.profile(),
        extra_args = request.extra_args.len(),
        "resolved pipeline entry"
    );

    let invocation = Invocation::build(request, engine);
    eprint!("{}", message_box("Nextflow command", &invocation.render()));
    launcher.launch(&invocation)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
