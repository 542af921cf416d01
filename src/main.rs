//! The Big IDEA:
//! Running autopep8 over a whole project gives one giant commit nobody
//! can review. Instead, fix one pep8 rule at a time, and commit every
//! file that rule touched on its own, with the rule in the message.
//! The history then reads like a changelog of mechanical fixes and
//! any single fix can be reverted or bisected.
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use git_pep8::builders::reporter::ConsoleReporter;
use git_pep8::core::config::{DEFAULT_CHECKER, DEFAULT_EXTENSION, DEFAULT_FORMATTER, SweepConfig};
use git_pep8::utils;

#[derive(Parser)]
#[command(name = "git-pep8")]
#[command(about = "Apply autopep8 one rule at a time, committing each fix separately")]
#[command(version)]
struct Cli {
    /// Recurse down directories from STARTDIR
    #[arg(short = 'r', long = "recurse")]
    recurse: bool,

    /// Specify file extension to work on (empty to take every file)
    #[arg(short = 'e', long = "ext", default_value = DEFAULT_EXTENSION)]
    ext: String,

    /// Do dry run -- do not modify files
    #[arg(short = 'd', long = "dryrun")]
    dryrun: bool,

    /// Specify directory to start in
    #[arg(short = 's', long = "startdir", default_value = ".")]
    startdir: PathBuf,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Specify path to autopep8 instance
    #[arg(short = 'a', long = "autopep8", default_value = DEFAULT_FORMATTER)]
    autopep8: String,

    /// Change git author
    #[arg(short = 'u', long = "author")]
    author: Option<String>,

    /// Style checker that must be installed
    #[arg(short = 'c', long = "checker", default_value = DEFAULT_CHECKER)]
    checker: String,

    /// Load the rule catalog from a TOML, JSON or YAML file
    #[arg(long = "rules", value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Print the rule catalog and exit
    #[arg(long = "list-rules")]
    list_rules: bool,

    /// Write the rule catalog to FILE and exit
    #[arg(long = "export-rules", value_name = "FILE")]
    export_rules: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> SweepConfig {
        SweepConfig {
            start_dir: self.startdir,
            extension: Some(self.ext).filter(|ext| !ext.is_empty()),
            recurse: self.recurse,
            dry_run: self.dryrun,
            verbose: self.verbose,
            formatter: self.autopep8,
            checker: self.checker,
            author: self.author,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let catalog = utils::load_catalog(cli.rules.as_deref())?;

    if cli.list_rules {
        utils::list_rules(&catalog);
        return Ok(());
    }
    if let Some(path) = &cli.export_rules {
        return utils::export_rules(&catalog, path);
    }

    let mut reporter = ConsoleReporter::new();
    utils::run_sweep(cli.into_config(), catalog, &mut reporter)?;
    Ok(())
}
