use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ToolchainSection;
use crate::error::PltError;
use crate::runner::CommandRunner;

/// Elixir libraries scanned recursively when a PLT is built.
pub const ELIXIR_LIBS: &[&str] = &["elixir", "eex", "ex_unit", "iex", "mix"];

/// Prints OTP release, Elixir version and the elixir app dir, one per line.
pub const PROBE_COMMAND: &str = "elixir -e 'IO.puts(:erlang.system_info(:otp_release)); IO.puts(System.version()); IO.puts(:code.lib_dir(:elixir))'";

/// Facts about the installed Erlang/Elixir toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub otp_release: String,
    pub elixir_version: String,
    /// Parent of the `elixir` app directory, e.g. `/usr/lib/elixir/lib`.
    pub lib_root: PathBuf,
}

impl Toolchain {
    /// Fills the toolchain from config overrides, probing `elixir` only
    /// when at least one value is missing.
    pub fn resolve(
        overrides: &ToolchainSection,
        runner: &dyn CommandRunner,
    ) -> Result<Self, PltError> {
        if let (Some(otp), Some(version), Some(root)) = (
            &overrides.otp_release,
            &overrides.elixir_version,
            &overrides.lib_root,
        ) {
            return Ok(Self {
                otp_release: otp.clone(),
                elixir_version: version.clone(),
                lib_root: root.clone(),
            });
        }

        let probed = Self::probe(runner)?;
        Ok(Self {
            otp_release: overrides.otp_release.clone().unwrap_or(probed.otp_release),
            elixir_version: overrides
                .elixir_version
                .clone()
                .unwrap_or(probed.elixir_version),
            lib_root: overrides.lib_root.clone().unwrap_or(probed.lib_root),
        })
    }

    pub fn probe(runner: &dyn CommandRunner) -> Result<Self, PltError> {
        let output = runner.run(PROBE_COMMAND)?;
        if !output.success() {
            return Err(PltError::Toolchain(format!(
                "`elixir` exited with {:?}: {}",
                output.exit_code,
                output.stdout.trim()
            )));
        }
        let toolchain = parse_probe_output(&output.stdout)?;
        debug!(?toolchain, "probed toolchain");
        Ok(toolchain)
    }

    /// `<home>/.dialyxir_core_<otp>_<elixir>.plt`
    pub fn default_plt_path(&self, home: &Path) -> PathBuf {
        home.join(format!(
            ".dialyxir_core_{}_{}.plt",
            self.otp_release, self.elixir_version
        ))
    }

    /// Compiled-output directories of the bundled Elixir libraries.
    pub fn elixir_scan_dirs(&self) -> Vec<PathBuf> {
        ELIXIR_LIBS
            .iter()
            .map(|lib| self.lib_root.join(lib).join("ebin"))
            .collect()
    }
}

fn parse_probe_output(stdout: &str) -> Result<Toolchain, PltError> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut next = |what: &str| {
        lines
            .next()
            .map(str::to_string)
            .ok_or_else(|| PltError::Toolchain(format!("probe output is missing the {}", what)))
    };

    let otp_release = next("OTP release")?;
    let elixir_version = next("Elixir version")?;
    let lib_dir = PathBuf::from(next("elixir lib dir")?);
    let lib_root = lib_dir
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| PltError::Toolchain(format!("unexpected lib dir {}", lib_dir.display())))?;

    Ok(Toolchain {
        otp_release,
        elixir_version,
        lib_root,
    })
}
