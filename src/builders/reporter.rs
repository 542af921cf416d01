use colored::Colorize;

use crate::builders::rules::Rule;
use crate::core::process::render_command;

/// Which external tool a surfaced command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Formatter,
    Commit,
}

/// The `SweepReporter` trait is the single channel for operator-facing output.
///
/// The engine reports what it is about to do and what happened; the
/// implementation decides where that text goes. `ConsoleReporter` prints to
/// stderr, tests record the calls.
pub trait SweepReporter {
    /// Announces the start of a sweep: `"<index> of <total>: <id> <description>"`.
    ///
    /// # Arguments
    /// * `index`: 1-based position of the rule among the enabled rules.
    /// * `total`: Number of enabled rules in the catalog.
    /// * `rule`: The rule about to be applied to every file.
    fn progress(&mut self, index: usize, total: usize, rule: &Rule);

    /// Shows a command before it runs (verbose) or instead of running it (dry run).
    ///
    /// # Arguments
    /// * `kind`: Whether the command is a formatter call or a commit.
    /// * `argv`: The full argument vector, program first.
    fn command(&mut self, kind: CommandKind, argv: &[String]);

    /// Shows the formatter's captured output after it modified a file.
    ///
    /// # Arguments
    /// * `output`: Stdout followed by stderr of the formatter run.
    fn formatter_output(&mut self, output: &str);

    /// Final count of (rule, file) pairs that were modified and committed.
    fn summary(&mut self, modified: usize);

    /// Found / not-found line per required binary.
    ///
    /// # Arguments
    /// * `found`: Each required binary paired with whether it was resolved.
    fn dependency_report(&mut self, found: &[(String, bool)]);
}

/// Formats the progress line shared by every reporter.
pub fn progress_line(index: usize, total: usize, rule: &Rule) -> String {
    format!("{index} of {total}: {} {}", rule.identifier, rule.description)
}

/// Formats the closing summary line.
pub fn summary_line(modified: usize) -> String {
    format!("# {modified} files scanned/modified")
}

/// A concrete implementation of `SweepReporter` that prints to stderr.
///
/// Notices are green, commit commands blue and dependency errors red on
/// yellow so they stand out from the formatter's own chatter.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl SweepReporter for ConsoleReporter {
    fn progress(&mut self, index: usize, total: usize, rule: &Rule) {
        eprintln!("{}", progress_line(index, total, rule).green());
    }

    fn command(&mut self, kind: CommandKind, argv: &[String]) {
        let line = render_command(argv);
        match kind {
            CommandKind::Formatter => eprintln!("{}", line.green()),
            CommandKind::Commit => eprintln!("{}", line.blue()),
        }
    }

    fn formatter_output(&mut self, output: &str) {
        let trimmed = output.trim_end();
        if !trimmed.is_empty() {
            eprintln!("{}", trimmed.green());
        }
    }

    fn summary(&mut self, modified: usize) {
        eprintln!("{}", summary_line(modified).green());
    }

    fn dependency_report(&mut self, found: &[(String, bool)]) {
        eprintln!(
            "{}",
            "Certain additional binaries are required to run:"
                .red()
                .on_yellow()
        );
        for (binary, present) in found {
            let state = if *present { "Found" } else { "Not found" };
            eprintln!("{}", format!("\t{binary}: {state}").red().on_yellow());
        }
    }
}
