use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::builders::files::FileEnumerator;
use crate::builders::fingerprint::fingerprint_file;
use crate::builders::reporter::{CommandKind, SweepReporter};
use crate::builders::rules::{Rule, RuleCatalog};
use crate::core::config::SweepConfig;
use crate::core::error::SweepError;
use crate::core::git::CommitRecorder;
use crate::core::process::{ProcessOutput, ProcessRunner};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Enabled rules that were swept.
    pub rules: usize,
    /// Files in the resolved file set.
    pub files: usize,
    /// (rule, file) pairs that changed and were committed.
    pub modified: usize,
}

/// Drives the formatter one rule at a time across the whole file set.
///
/// For every enabled rule, in catalog order, each file is fingerprinted, run
/// through the formatter restricted to that rule, and fingerprinted again.
/// Only a changed fingerprint leads to a commit. A rule's sweep finishes
/// before the next rule starts, which keeps one commit per file per rule in
/// a predictable order.
pub struct SweepEngine<'a> {
    config: SweepConfig,
    catalog: RuleCatalog,
    runner: &'a dyn ProcessRunner,
}

impl<'a> SweepEngine<'a> {
    pub fn new(config: SweepConfig, catalog: RuleCatalog, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            config,
            catalog,
            runner,
        }
    }

    /// Resolves the file set from the configured start directory and sweeps it.
    pub fn run(&self, reporter: &mut dyn SweepReporter) -> Result<SweepSummary> {
        let enumerator =
            FileEnumerator::new(self.config.recurse, self.config.extension.as_deref())?;
        let files = enumerator.collect(&self.config.start_dir)?;
        info!(count = files.len(), "resolved file set");
        self.sweep(&files, reporter)
    }

    /// Sweeps every enabled rule across `files`.
    ///
    /// Any formatter or commit failure aborts immediately; the summary is
    /// only reported once every rule has been applied.
    pub fn sweep(
        &self,
        files: &[PathBuf],
        reporter: &mut dyn SweepReporter,
    ) -> Result<SweepSummary> {
        let committer = CommitRecorder::new(
            self.runner,
            self.config.dry_run,
            self.config.verbose,
            self.config.author.clone(),
        );
        let total = self.catalog.enabled_count();
        let mut modified = 0;

        for (index, rule) in self.catalog.enabled().enumerate() {
            reporter.progress(index + 1, total, rule);

            for path in files {
                if self.apply(rule, path, &committer, reporter)? {
                    modified += 1;
                }
            }
        }

        reporter.summary(modified);
        Ok(SweepSummary {
            rules: total,
            files: files.len(),
            modified,
        })
    }

    /// `<formatter> --in-place --verbose --select=<id> [--aggressive] <path>`
    pub fn formatter_command(&self, rule: &Rule, path: &Path) -> Vec<String> {
        let mut argv = vec![
            self.config.formatter.clone(),
            "--in-place".to_string(),
            "--verbose".to_string(),
            format!("--select={}", rule.identifier),
        ];
        if rule.aggressive {
            argv.push("--aggressive".to_string());
        }
        argv.push(path.to_string_lossy().into_owned());
        argv
    }

    /// Applies one rule to one file. Returns whether the file was modified
    /// and committed.
    fn apply(
        &self,
        rule: &Rule,
        path: &Path,
        committer: &CommitRecorder<'_>,
        reporter: &mut dyn SweepReporter,
    ) -> Result<bool> {
        let argv = self.formatter_command(rule, path);

        if self.config.dry_run {
            reporter.command(CommandKind::Formatter, &argv);
            return Ok(false);
        }

        let before = fingerprint_file(path)?;
        if self.config.verbose {
            reporter.command(CommandKind::Formatter, &argv);
        }
        let output = self.run_formatter(&argv)?;
        let after = fingerprint_file(path)?;

        if before == after {
            return Ok(false);
        }

        debug!(path = %path.display(), rule = %rule.identifier, %before, %after, "file changed");
        reporter.formatter_output(&output.combined());
        committer.commit(path, &rule.comment(), reporter)?;
        Ok(true)
    }

    // The exit status only tells us the formatter ran, not whether it changed
    // anything; change detection is left to the fingerprints.
    fn run_formatter(&self, argv: &[String]) -> Result<ProcessOutput, SweepError> {
        self.runner.run(argv).map_err(|err| match err {
            SweepError::ProcessFailure {
                command,
                stdout,
                stderr,
                ..
            } => SweepError::ToolFailure {
                command,
                output: SweepError::combined_output(&stdout, &stderr),
            },
            other => other,
        })
    }
}
