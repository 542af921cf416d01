use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures that end a sweep.
///
/// Nothing here is recovered locally: every variant aborts the run and is
/// surfaced to the operator through `anyhow` in `main`.
#[derive(Debug, Error)]
pub enum SweepError {
    /// One or more required binaries could not be resolved on `PATH`.
    #[error("required binaries not found: {}", missing.join(", "))]
    MissingDependency { missing: Vec<String> },

    /// The formatter exited with a nonzero status.
    #[error("formatter failed: {command}\n{output}")]
    ToolFailure { command: String, output: String },

    /// `git commit` exited with a nonzero status.
    #[error("commit failed for {}:\n{output}", path.display())]
    CommitFailure { path: PathBuf, output: String },

    /// A subprocess exited with a nonzero status. Callers map this to
    /// `ToolFailure` or `CommitFailure`.
    #[error("command {command:?} exited with {status}")]
    ProcessFailure {
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("failed to start {command:?}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to run an empty command")]
    EmptyCommand,

    #[error("{} is not inside a Git repository", path.display())]
    NotARepository { path: PathBuf },

    #[error(
        "{} is outside the work tree git commits into ({}); run from inside that repository",
        path.display(),
        work_tree.display()
    )]
    OutsideWorkTree { path: PathBuf, work_tree: PathBuf },

    #[error("invalid rule catalog:\n  - {}", issues.join("\n  - "))]
    InvalidCatalog { issues: Vec<String> },
}

impl SweepError {
    /// Stdout followed by stderr, the way the formatter's output is shown.
    pub fn combined_output(stdout: &str, stderr: &str) -> String {
        let mut combined = String::with_capacity(stdout.len() + stderr.len());
        combined.push_str(stdout);
        combined.push_str(stderr);
        combined
    }
}
