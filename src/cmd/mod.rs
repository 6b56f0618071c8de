pub mod sync;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pltsync",
    about = "Build or update the dialyzer PLT for an Elixir project",
    version
)]
pub struct Cli {
    /// Project root directory
    #[arg(long = "root")]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/pltsync.toml)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Print the sync report as JSON after the run
    #[arg(long = "json")]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Extra arguments are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}
