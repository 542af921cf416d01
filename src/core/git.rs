use git2::Repository;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::builders::reporter::{CommandKind, SweepReporter};
use crate::core::config::GIT_BINARY;
use crate::core::error::SweepError;
use crate::core::process::ProcessRunner;

/// Locates the work tree that contains `start`.
///
/// Used as a pre-flight check so a run outside a repository fails before the
/// formatter has rewritten anything, rather than at the first commit.
pub fn discover_work_tree(start: &Path) -> Result<PathBuf, SweepError> {
    let not_a_repo = || SweepError::NotARepository {
        path: start.to_path_buf(),
    };

    let repo = Repository::discover(start).map_err(|err| {
        debug!("repository discovery failed: {err}");
        not_a_repo()
    })?;
    let workdir = repo.workdir().ok_or_else(not_a_repo)?;
    Ok(workdir.to_path_buf())
}

/// Checks that `git commit`, run from `git_cwd`, can commit files under
/// `start_dir`.
///
/// `git` resolves its repository from the directory it is started in, not
/// from the paths it is given, so the work tree is discovered from
/// `git_cwd` and `start_dir` must lie inside it. A relative `start_dir` is
/// resolved against `git_cwd`.
///
/// # Arguments
/// * `git_cwd`: The directory `git` will be spawned in.
/// * `start_dir`: The root the files to sweep are enumerated from.
///
/// # Returns
/// The work tree root, or `NotARepository` when `git_cwd` is outside any
/// repository, or `OutsideWorkTree` when `start_dir` belongs elsewhere.
pub fn check_commit_target(git_cwd: &Path, start_dir: &Path) -> Result<PathBuf, SweepError> {
    let work_tree = discover_work_tree(git_cwd)?;
    let work_tree_real = work_tree.canonicalize().unwrap_or_else(|_| work_tree.clone());

    let start = git_cwd.join(start_dir);
    let start_real = start.canonicalize().unwrap_or(start);

    if !start_real.starts_with(&work_tree_real) {
        return Err(SweepError::OutsideWorkTree {
            path: start_dir.to_path_buf(),
            work_tree,
        });
    }
    Ok(work_tree)
}

/// Records one commit per modified file through the `git` binary.
///
/// Each commit is scoped to exactly one path, so only that file's changes
/// land in it even when other files in the tree are dirty.
pub struct CommitRecorder<'a> {
    runner: &'a dyn ProcessRunner,
    dry_run: bool,
    verbose: bool,
    author: Option<String>,
}

impl<'a> CommitRecorder<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        dry_run: bool,
        verbose: bool,
        author: Option<String>,
    ) -> Self {
        Self {
            runner,
            dry_run,
            verbose,
            author,
        }
    }

    /// `git commit <path> -m "<path>: <comment>" [--author <author>]`
    pub fn commit_command(&self, path: &Path, comment: &str) -> Vec<String> {
        let path = path.to_string_lossy();
        let mut argv = vec![
            GIT_BINARY.to_string(),
            "commit".to_string(),
            path.to_string(),
            "-m".to_string(),
            format!("{path}: {comment}"),
        ];
        if let Some(author) = &self.author {
            argv.push("--author".to_string());
            argv.push(author.clone());
        }
        argv
    }

    /// Commits `path` with `comment`.
    ///
    /// The command is shown first in dry-run or verbose mode; in dry-run mode
    /// nothing is executed.
    pub fn commit(
        &self,
        path: &Path,
        comment: &str,
        reporter: &mut dyn SweepReporter,
    ) -> Result<(), SweepError> {
        let argv = self.commit_command(path, comment);
        if self.dry_run || self.verbose {
            reporter.command(CommandKind::Commit, &argv);
        }
        if self.dry_run {
            return Ok(());
        }

        match self.runner.run(&argv) {
            Ok(_) => {
                debug!(path = %path.display(), "committed");
                Ok(())
            }
            Err(SweepError::ProcessFailure { stdout, stderr, .. }) => {
                let output = if stderr.trim().is_empty() {
                    SweepError::combined_output(&stdout, &stderr)
                } else {
                    stderr
                };
                Err(SweepError::CommitFailure {
                    path: path.to_path_buf(),
                    output,
                })
            }
            Err(other) => Err(other),
        }
    }
}
