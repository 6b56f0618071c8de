use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cmd::Cli;
use crate::config::ProjectConfig;
use crate::error::PltError;
use crate::plt::{PltSynchronizer, SyncReport};
use crate::runner::ShellRunner;
use crate::toolchain::Toolchain;

pub fn run(cli: &Cli) {
    if !cli.ignored.is_empty() {
        debug!(args = ?cli.ignored, "ignoring extra arguments");
    }

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = match root.canonicalize() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("error: cannot resolve root path '{}': {}", root.display(), err);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = match sync(&root, cli.config.as_deref(), &mut out) {
        Ok(report) => report,
        Err(err) => {
            match &err {
                PltError::Config { .. } | PltError::ConfigNotFound(_) => {
                    eprintln!("error: {}", err);
                }
                PltError::Toolchain(_) => {
                    eprintln!("error: {}. Set [toolchain] in pltsync.toml to skip probing.", err);
                }
                PltError::PltUnreadable { path, .. } => {
                    eprintln!(
                        "error: {}. Delete {} to force a rebuild.",
                        err,
                        path.display()
                    );
                }
                PltError::Io(e) => {
                    eprintln!("error: I/O failure during sync: {}", e);
                }
                PltError::HomeDirUnavailable => {
                    eprintln!("error: {}", err);
                }
            }
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(err) = writeln!(out, "{}", json) {
                    eprintln!("error: failed to write report: {}", err);
                    std::process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("error: failed to serialize report: {}", err);
                std::process::exit(1);
            }
        }
    }
}

/// Loads config, resolves the toolchain and runs one sync against the shell.
pub fn sync(root: &Path, config: Option<&Path>, out: &mut dyn Write) -> Result<SyncReport, PltError> {
    let config = ProjectConfig::load(root, config)?;
    let runner = ShellRunner;
    let toolchain = Toolchain::resolve(&config.toolchain, &runner)?;
    let home = dirs::home_dir();
    let synchronizer = PltSynchronizer::new(&config, &toolchain, home.as_deref(), &runner)?;
    synchronizer.sync(out)
}
