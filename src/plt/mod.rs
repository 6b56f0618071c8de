pub mod command;
pub mod info;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ProjectConfig;
use crate::error::PltError;
use crate::runner::{CommandOutput, CommandRunner};
use crate::toolchain::Toolchain;
use command::{add_command, aux_search_paths, build_command, info_command};
use info::{missing_apps, parse_plt_info};

/// What a sync run ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// PLT was absent and the build ran. Nothing was missing afterwards,
    /// or the build failed without producing a PLT.
    Built,
    /// Existing PLT got the missing apps added.
    Extended,
    /// Built, then still missing apps and those were added.
    BuiltAndExtended,
    /// Existing PLT already covered every required app.
    UpToDate,
}

/// One `dialyzer` build or add invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub command: String,
    #[serde(flatten)]
    pub output: CommandOutput,
}

/// Summary of a sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    pub plt_file: PathBuf,
    pub missing: Vec<String>,
    pub invocations: Vec<Invocation>,
}

impl SyncReport {
    /// False if any invocation exited non-zero or was killed.
    pub fn succeeded(&self) -> bool {
        self.invocations.iter().all(|i| i.output.success())
    }
}

/// Keeps a PLT in step with the apps a project needs.
pub struct PltSynchronizer<'a> {
    config: &'a ProjectConfig,
    toolchain: &'a Toolchain,
    plt_file: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> PltSynchronizer<'a> {
    /// Uses `plt_file` from config, or the per-toolchain default under `home`.
    pub fn new(
        config: &'a ProjectConfig,
        toolchain: &'a Toolchain,
        home: Option<&Path>,
        runner: &'a dyn CommandRunner,
    ) -> Result<Self, PltError> {
        let plt_file = match config.plt_file_override() {
            Some(p) => p,
            None => toolchain.default_plt_path(home.ok_or(PltError::HomeDirUnavailable)?),
        };
        debug!(plt = %plt_file.display(), "resolved PLT path");
        Ok(Self {
            config,
            toolchain,
            plt_file,
            runner,
        })
    }

    pub fn plt_file(&self) -> &Path {
        &self.plt_file
    }

    pub fn required_apps(&self) -> Vec<String> {
        self.config.required_apps()
    }

    pub fn aux_search_paths(&self) -> Vec<String> {
        aux_search_paths(
            &self.config.project.deps,
            &self.required_apps(),
            &self.config.deps_dir(),
        )
    }

    /// Recorded file list of the PLT, as reported by `dialyzer --plt_info`.
    pub fn recorded_files(&self) -> Result<Vec<String>, PltError> {
        let cmd = info_command(self.config.executable(), &self.plt_file);
        let output = self.runner.run(&cmd)?;
        if !output.success() {
            return Err(PltError::PltUnreadable {
                path: self.plt_file.clone(),
                exit_code: output.exit_code,
            });
        }
        let files = parse_plt_info(&output.stdout);
        debug!(count = files.len(), "PLT recorded files");
        Ok(files)
    }

    /// Builds the PLT if absent, then adds whatever required apps it lacks.
    ///
    /// Progress lines, command lines and tool output go to `out`.
    pub fn sync(&self, out: &mut dyn Write) -> Result<SyncReport, PltError> {
        let required = self.required_apps();
        let mut invocations = Vec::new();

        let built = if self.plt_file.exists() {
            false
        } else {
            let build = self.build(&required, out)?;
            let failed = !build.output.success();
            invocations.push(build);
            if failed && !self.plt_file.exists() {
                // nothing to inspect; the failing build is the result
                return Ok(SyncReport {
                    outcome: SyncOutcome::Built,
                    plt_file: self.plt_file.clone(),
                    missing: Vec::new(),
                    invocations,
                });
            }
            true
        };

        let files = self.recorded_files()?;
        let missing = missing_apps(&required, &files);

        if missing.is_empty() {
            if !built {
                writeln!(out, "Nothing to do.")?;
            }
        } else {
            invocations.push(self.add(&missing, out)?);
        }

        let outcome = match (built, missing.is_empty()) {
            (true, true) => SyncOutcome::Built,
            (true, false) => SyncOutcome::BuiltAndExtended,
            (false, true) => SyncOutcome::UpToDate,
            (false, false) => SyncOutcome::Extended,
        };

        Ok(SyncReport {
            outcome,
            plt_file: self.plt_file.clone(),
            missing,
            invocations,
        })
    }

    fn build(&self, required: &[String], out: &mut dyn Write) -> Result<Invocation, PltError> {
        let scan_dirs: Vec<String> = self
            .toolchain
            .elixir_scan_dirs()
            .iter()
            .map(|d| d.display().to_string())
            .collect();
        let cmd = build_command(
            self.config.executable(),
            &self.plt_file,
            &self.aux_search_paths(),
            required,
            &scan_dirs,
        );

        writeln!(out, "Starting PLT core build, this will take a while...")?;
        self.invoke(cmd, out)
    }

    fn add(&self, missing: &[String], out: &mut dyn Write) -> Result<Invocation, PltError> {
        writeln!(out, "Some apps are missing and will be added:")?;
        writeln!(out, "{}", missing.join(" "))?;
        writeln!(out, "Adding apps to existing PLT, this will take a little time...")?;
        let cmd = add_command(self.config.executable(), &self.plt_file, missing);
        let invocation = self.invoke(cmd, out)?;
        writeln!(out, "Finished adding apps to {}", self.plt_file.display())?;
        Ok(invocation)
    }

    fn invoke(&self, cmd: String, out: &mut dyn Write) -> Result<Invocation, PltError> {
        writeln!(out, "{}", cmd)?;
        let output = self.runner.run(&cmd)?;
        write!(out, "{}", output.stdout)?;
        if !output.stdout.is_empty() && !output.stdout.ends_with('\n') {
            writeln!(out)?;
        }
        if !output.success() {
            warn!(command = %cmd, exit_code = ?output.exit_code, "dialyzer did not exit cleanly");
        }
        Ok(Invocation {
            command: cmd,
            output,
        })
    }
}
