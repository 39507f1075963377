/// Config templates copied into the working directory by `init`, in order.
pub const CONFIG_TEMPLATE_PATHS: [&str; 3] = ["nextflow.config", "conf", "assets"];
/// Directory `init` creates for the pipeline's own logs.
pub const LOG_DIR: &str = "log";
pub const CITATION_BIB: &str = include_str!("../CITATION.bib");
