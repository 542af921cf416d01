use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::builders::reporter::SweepReporter;
use crate::builders::rules::RuleCatalog;
use crate::core::config::{CatalogManager, CatalogProvider, SweepConfig};
use crate::core::engine::{SweepEngine, SweepSummary};
use crate::core::error::SweepError;
use crate::core::git::check_commit_target;
use crate::core::process::SystemRunner;

/// Initialise `tracing` on stderr. `RUST_LOG` wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {level}");
}

/// True when `binary` is an existing path or resolves on `PATH`.
pub fn binary_available(binary: &str) -> bool {
    if binary.contains(std::path::MAIN_SEPARATOR) || binary.contains('/') {
        return Path::new(binary).is_file();
    }
    which::which(binary).is_ok()
}

/// Checks every binary and reports all of them if any is missing.
pub fn check_required_binaries(
    binaries: &[String],
    reporter: &mut dyn SweepReporter,
) -> Result<(), SweepError> {
    let found: Vec<(String, bool)> = binaries
        .iter()
        .map(|binary| (binary.clone(), binary_available(binary)))
        .collect();

    let missing: Vec<String> = found
        .iter()
        .filter(|(_, present)| !present)
        .map(|(binary, _)| binary.clone())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    reporter.dependency_report(&found);
    Err(SweepError::MissingDependency { missing })
}

/// Runs a full sweep from the current directory.
pub fn run_sweep(
    config: SweepConfig,
    catalog: RuleCatalog,
    reporter: &mut dyn SweepReporter,
) -> Result<SweepSummary> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    run_sweep_in(&cwd, config, catalog, reporter)
}

/// Runs a full sweep with every tool spawned in `cwd`: binary check,
/// repository check, then the engine.
///
/// The repository check looks at the same directory the commits run in, so
/// a run that could not commit stops before the formatter touches anything.
pub fn run_sweep_in(
    cwd: &Path,
    mut config: SweepConfig,
    catalog: RuleCatalog,
    reporter: &mut dyn SweepReporter,
) -> Result<SweepSummary> {
    // File enumeration resolves relative paths against the process's own
    // directory, the spawned tools against `cwd`; they must agree.
    let process_cwd = std::env::current_dir().ok();
    if config.start_dir.is_relative() && process_cwd.as_deref() != Some(cwd) {
        config.start_dir = cwd.join(&config.start_dir);
    }

    check_required_binaries(&config.required_binaries(), reporter)?;

    if !config.dry_run {
        let work_tree = check_commit_target(cwd, &config.start_dir)?;
        info!(work_tree = %work_tree.display(), "committing into repository");
    }

    let runner = SystemRunner::in_dir(cwd);
    let engine = SweepEngine::new(config, catalog, &runner);
    engine.run(reporter)
}

/// Loads a catalog from `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<RuleCatalog> {
    match path {
        Some(path) => CatalogManager::new(path)
            .load_validated()
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(RuleCatalog::builtin()),
    }
}

/// One line per rule, numbered in sweep order. Disabled rules are listed
/// unnumbered so the numbers match the progress notices of a real run.
pub fn format_rule_list(catalog: &RuleCatalog) -> Vec<String> {
    let mut position = 0;
    catalog
        .rules
        .iter()
        .map(|rule| {
            let flags = if rule.aggressive { " [aggressive]" } else { "" };
            if rule.enabled {
                position += 1;
                format!("{position:>3}. {} {}{flags}", rule.identifier, rule.description)
            } else {
                format!("  -. {} {} [disabled]", rule.identifier, rule.description)
            }
        })
        .collect()
}

pub fn list_rules(catalog: &RuleCatalog) {
    for line in format_rule_list(catalog) {
        println!("{line}");
    }
}

pub fn export_rules(catalog: &RuleCatalog, path: &Path) -> Result<()> {
    let manager = CatalogManager::new(path);
    manager.save_catalog(catalog)?;
    println!(
        "✓ Wrote {} rules to {}",
        catalog.rules.len(),
        manager.get_catalog_path().display()
    );
    Ok(())
}
