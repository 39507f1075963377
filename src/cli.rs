//! CLI argument parsing for the pipeline launcher.
//!
//! The CLI only describes the surface; resolution of defaults that depend on
//! the install location happens in [`crate::settings`].
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;

/// Examples shown after `crispin run --help`.
const RUN_AFTER_HELP: &str = "\
EXAMPLES:
Execute with slurm:
    crispin run --mode slurm ...
Preview the processes that will run:
    crispin run --mode local -preview
Add nextflow args (anything supported by `nextflow run`):
    crispin run ... -work-dir path/to/workDir
Run with a specific installation of crispin:
    crispin run --main path/to/crispin/main.nf ...
Run with a specific tag, branch, or commit from GitHub:
    crispin run --main CCBR/CRISPIN -r v0.1.0 ...

See the docs website for more details:
https://ccbr.github.io/CRISPIN/";

/// Root CLI entrypoint.
///
/// Subcommands are listed in declaration order, so `run` comes before `init`.
#[derive(Parser, Debug)]
#[command(
    name = "crispin",
    version,
    about = "CRISPR screen pipeline",
    long_about = "CRISPR screen pipeline\n\nFor more options, run:\ncrispin [command] --help\n\nSee the docs website for more details:\nhttps://ccbr.github.io/CRISPIN/",
    disable_version_flag = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Print the citation in bibtex format and exit
    #[arg(long)]
    pub citation: bool,

    /// Emit debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// True when `--citation` appears among the root options.
///
/// Scanned ahead of parsing so the citation is printed even when the rest of
/// the command line would be rejected. Root options take no values, so the
/// scan stops at the first word that is not an option (the subcommand) or at
/// `--`; words forwarded to the engine are never inspected.
pub fn citation_requested<I>(args: I) -> bool
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .take_while(|arg| arg != "--" && arg.to_string_lossy().starts_with('-'))
        .any(|arg| arg == "--citation")
}

/// Top-level launcher commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    Init(InitArgs),
}

/// Run command inputs.
#[derive(Args, Debug)]
#[command(about = "Run the workflow", after_help = RUN_AFTER_HELP)]
pub struct RunArgs {
    /// Path to the crispin main.nf file or the GitHub repo (CCBR/CRISPIN).
    /// Defaults to the version bundled with this installation.
    #[arg(long = "main", value_name = "PATH")]
    pub main_path: Option<String>,

    /// Run mode
    #[arg(long, value_enum, default_value_t = Mode::Local)]
    pub mode: Mode,

    /// Arguments forwarded verbatim to `nextflow run`; everything from the
    /// first one on is forwarded, so launcher options go first
    #[arg(value_name = "NEXTFLOW_ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub nextflow_args: Vec<String>,
}

/// Init command takes no inputs; the template set is fixed.
#[derive(Args, Debug)]
#[command(about = "Initialize the working directory by copying the system default config files")]
pub struct InitArgs {}

/// Execution mode, mapped onto a Nextflow profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Local,
    Slurm,
}

impl Mode {
    /// Profile name handed to `nextflow run -profile`.
    pub fn profile(self) -> &'static str {
        match self {
            Mode::Local => "local",
            Mode::Slurm => "slurm",
        }
    }
}
