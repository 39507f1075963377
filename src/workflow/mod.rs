//! Workflow steps behind the `run` and `init` commands.
//!
//! Each step is small and synchronous; the heavy lifting happens in the
//! external workflow engine.
mod init;
pub(crate) mod invocation;
pub(crate) mod launch;
mod run;

pub use init::run_init;
pub use run::run_run;
