//! Project configuration loaded from `pltsync.toml`.
//!
//! Every key is optional. The whole file is read once by the CLI and the
//! resulting [`ProjectConfig`] is handed to the synchronizer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::PltError;

/// Config file looked up in the project root when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "pltsync.toml";

/// Apps every PLT is expected to contain.
pub const DEFAULT_APPS: &[&str] = &["erts", "kernel", "stdlib", "crypto", "public_key"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub dialyzer: DialyzerSection,
    #[serde(default)]
    pub toolchain: ToolchainSection,
    /// Directory the config was loaded for. Relative paths resolve against it.
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    /// Declared dependency names, in declaration order.
    #[serde(default)]
    pub deps: Vec<String>,
    /// Where dependencies are checked out (default: `deps`).
    pub deps_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialyzerSection {
    pub plt_apps: Option<Vec<String>>,
    pub plt_add_apps: Option<Vec<String>>,
    pub plt_file: Option<PathBuf>,
    #[serde(default)]
    pub plt_add_deps: bool,
    /// Binary placed at the head of every command line.
    pub executable: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolchainSection {
    pub otp_release: Option<String>,
    pub elixir_version: Option<String>,
    pub lib_root: Option<PathBuf>,
}

impl ProjectConfig {
    /// Loads the config for the project at `root`.
    ///
    /// With `explicit = None` a missing `pltsync.toml` yields defaults;
    /// an explicit path that does not exist is an error.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, PltError> {
        let path = match explicit {
            Some(p) => {
                if !p.is_file() {
                    return Err(PltError::ConfigNotFound(p.to_path_buf()));
                }
                p.to_path_buf()
            }
            None => {
                let p = root.join(CONFIG_FILE_NAME);
                if !p.is_file() {
                    debug!(root = %root.display(), "no config file, using defaults");
                    return Ok(Self {
                        root: root.to_path_buf(),
                        ..Self::default()
                    });
                }
                p
            }
        };

        let content = fs::read_to_string(&path)?;
        let mut config = Self::parse(&content).map_err(|source| PltError::Config {
            path: path.clone(),
            source,
        })?;
        config.root = root.to_path_buf();
        debug!(file = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Names that must be present in the PLT.
    ///
    /// `plt_apps` replaces everything. Otherwise the defaults, then
    /// `plt_add_apps`, then the declared deps when `plt_add_deps` is set.
    /// Duplicates are kept.
    pub fn required_apps(&self) -> Vec<String> {
        if let Some(apps) = &self.dialyzer.plt_apps {
            return apps.clone();
        }

        let mut apps: Vec<String> = DEFAULT_APPS.iter().map(|s| s.to_string()).collect();
        if let Some(extra) = &self.dialyzer.plt_add_apps {
            apps.extend(extra.iter().cloned());
        }
        if self.dialyzer.plt_add_deps {
            apps.extend(self.project.deps.iter().cloned());
        }
        apps
    }

    pub fn executable(&self) -> &str {
        self.dialyzer.executable.as_deref().unwrap_or("dialyzer")
    }

    /// Absolute directory holding dependency checkouts.
    pub fn deps_dir(&self) -> PathBuf {
        let deps_path = self
            .project
            .deps_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("deps"));
        self.root.join(deps_path)
    }

    /// The configured `plt_file`, resolved against the project root.
    pub fn plt_file_override(&self) -> Option<PathBuf> {
        self.dialyzer.plt_file.as_ref().map(|p| self.root.join(p))
    }
}
