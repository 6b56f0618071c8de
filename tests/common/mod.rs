#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use pltsync::config::ProjectConfig;
use pltsync::error::PltError;
use pltsync::runner::{CommandOutput, CommandRunner};
use pltsync::toolchain::Toolchain;

/// Records every command line and answers with canned outputs.
///
/// `--plt_info` gets `plt_info`; build and add commands get `tool_stdout`
/// with `tool_exit`.
pub struct ScriptedRunner {
    pub plt_info: String,
    pub info_exit: i32,
    pub tool_stdout: String,
    pub tool_exit: i32,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn with_plt_info(files: &[&str]) -> Self {
        let quoted: Vec<String> = files.iter().map(|f| format!("\"{}\"", f)).collect();
        Self {
            plt_info: format!("Included files:\n[{}]\n", quoted.join(",\n ")),
            info_exit: 0,
            tool_stdout: " done in 0m1.5s\ndone (passed successfully)\n".to_string(),
            tool_exit: 0,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Build and add invocations, leaving out `--plt_info` queries.
    pub fn tool_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.contains("--plt_info"))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput, PltError> {
        self.calls.borrow_mut().push(command_line.to_string());
        let (stdout, code) = if command_line.contains("--plt_info") {
            (self.plt_info.clone(), self.info_exit)
        } else {
            (self.tool_stdout.clone(), self.tool_exit)
        };
        Ok(CommandOutput {
            stdout,
            exit_code: Some(code),
        })
    }
}

pub fn toolchain() -> Toolchain {
    Toolchain {
        otp_release: "26".to_string(),
        elixir_version: "1.15.7".to_string(),
        lib_root: PathBuf::from("/usr/lib/elixir/lib"),
    }
}

/// Parses `toml` as a project config rooted at `root`.
pub fn config(root: &Path, toml: &str) -> ProjectConfig {
    let mut config = ProjectConfig::parse(toml).expect("config should parse");
    config.root = root.to_path_buf();
    config
}

/// A recorded file list covering every default app.
pub const CORE_FILES: &[&str] = &[
    "/usr/lib/erlang/lib/erts-14.0/ebin/erlang.beam",
    "/usr/lib/erlang/lib/kernel-9.0/ebin/kernel.app",
    "/usr/lib/erlang/lib/stdlib-5.0/ebin/stdlib.app",
    "/usr/lib/erlang/lib/crypto-5.2/ebin/crypto.app",
    "/usr/lib/erlang/lib/public_key-1.14/ebin/public_key.app",
];
