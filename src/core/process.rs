use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::core::error::SweepError;

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn combined(&self) -> String {
        SweepError::combined_output(&self.stdout, &self.stderr)
    }
}

/// Trait defining how external tools are invoked.
/// The engine only ever hands over an argument vector and reads back text,
/// so tests can swap in a fake that never spawns anything.
pub trait ProcessRunner {
    /// Runs `argv[0]` with the remaining arguments and blocks until it exits.
    ///
    /// # Arguments
    /// * `argv`: Program followed by its arguments. Must not be empty.
    ///
    /// # Returns
    /// The captured stdout and stderr on a zero exit status. A nonzero status
    /// is reported as `SweepError::ProcessFailure` carrying both streams,
    /// a program that cannot be started as `SweepError::Spawn`.
    fn run(&self, argv: &[String]) -> Result<ProcessOutput, SweepError>;
}

/// Renders an argument vector the way it is shown to the operator.
pub fn render_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Concrete implementation of `ProcessRunner` backed by `std::process`.
#[derive(Debug, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self { working_dir: None }
    }

    /// Pins every spawned process to `dir` instead of inheriting the
    /// current directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            working_dir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput, SweepError> {
        let (program, args) = argv.split_first().ok_or(SweepError::EmptyCommand)?;
        let command = render_command(argv);

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(%command, "spawning");
        let output = cmd.output().map_err(|source| SweepError::Spawn {
            command: command.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(%command, status = %output.status, "finished");

        if !output.status.success() {
            return Err(SweepError::ProcessFailure {
                command,
                status: output.status,
                stdout,
                stderr,
            });
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}
