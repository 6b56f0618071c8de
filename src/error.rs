use std::path::PathBuf;

use thiserror::Error;

/// Structured error type for pltsync operations.
///
/// A failing `dialyzer` invocation is not an error here: its output and
/// exit code are surfaced through the sync report. These variants cover
/// failures of the task itself.
#[derive(Debug, Error)]
pub enum PltError {
    /// File system or process spawn failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// `pltsync.toml` exists but could not be parsed.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// An explicitly requested config file does not exist.
    #[error("config file {} not found", .0.display())]
    ConfigNotFound(PathBuf),
    /// No `plt_file` configured and the home directory is unknown.
    #[error("cannot determine home directory for the default PLT location; set dialyzer.plt_file")]
    HomeDirUnavailable,
    /// Probing the Elixir/OTP installation failed.
    #[error("toolchain probe failed: {0}")]
    Toolchain(String),
    /// `dialyzer --plt_info` did not succeed on an existing PLT.
    #[error("cannot read PLT {} (dialyzer exit code {})", path.display(), exit_code.map_or("none".to_string(), |c| c.to_string()))]
    PltUnreadable {
        path: PathBuf,
        exit_code: Option<i32>,
    },
}
