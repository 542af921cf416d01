use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::builders::rules::RuleCatalog;
use crate::builders::validator::{CatalogValidator, Severity, StandardValidator};
use crate::core::error::SweepError;

pub const GIT_BINARY: &str = "git";
pub const DEFAULT_FORMATTER: &str = "autopep8";
pub const DEFAULT_CHECKER: &str = "pep8";
pub const DEFAULT_EXTENSION: &str = ".py";

/// Everything a single run needs to know, collected from the command line.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub start_dir: PathBuf,
    /// Extension filter with its leading dot. `None` keeps every file.
    pub extension: Option<String>,
    pub recurse: bool,
    pub dry_run: bool,
    pub verbose: bool,
    /// Formatter binary, name or path.
    pub formatter: String,
    /// Style checker that must be installed alongside the formatter.
    pub checker: String,
    /// `Name <email>` passed to `git commit --author`.
    pub author: Option<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_dir: PathBuf::from("."),
            extension: Some(DEFAULT_EXTENSION.to_string()),
            recurse: false,
            dry_run: false,
            verbose: false,
            formatter: DEFAULT_FORMATTER.to_string(),
            checker: DEFAULT_CHECKER.to_string(),
            author: None,
        }
    }
}

impl SweepConfig {
    /// Binaries checked on PATH before any work starts, in report order.
    pub fn required_binaries(&self) -> Vec<String> {
        vec![
            GIT_BINARY.to_string(),
            self.formatter.clone(),
            self.checker.clone(),
        ]
    }
}

/// On-disk encodings of a rule catalog, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => CatalogFormat::Json,
            Some("yaml") | Some("yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Toml,
        }
    }
}

pub trait CatalogProvider {
    fn load_catalog(&self) -> Result<RuleCatalog>;
    fn save_catalog(&self, catalog: &RuleCatalog) -> Result<()>;
    fn get_catalog_path(&self) -> &Path;
}

/// Reads and writes rule catalogs at a fixed path.
pub struct CatalogManager {
    catalog_path: PathBuf,
    format: CatalogFormat,
}

impl CatalogManager {
    pub fn new<P: AsRef<Path>>(catalog_path: P) -> Self {
        let catalog_path = catalog_path.as_ref().to_path_buf();
        let format = CatalogFormat::from_path(&catalog_path);
        Self {
            catalog_path,
            format,
        }
    }

    /// Loads the catalog and runs the standard validator over it.
    ///
    /// Warnings and notes are logged; any error-level issue rejects the
    /// catalog with `SweepError::InvalidCatalog`.
    pub fn load_validated(&self) -> Result<RuleCatalog> {
        let catalog = self.load_catalog()?;
        let validator = StandardValidator::new()?;

        let mut errors = Vec::new();
        for issue in validator.validate_catalog(&catalog) {
            match issue.severity {
                Severity::Error => errors.push(issue.message),
                Severity::Warning => warn!("{}: {}", self.catalog_path.display(), issue.message),
                Severity::Note => info!("{}: {}", self.catalog_path.display(), issue.message),
            }
        }

        if !errors.is_empty() {
            return Err(SweepError::InvalidCatalog { issues: errors }.into());
        }
        Ok(catalog)
    }
}

impl CatalogProvider for CatalogManager {
    fn load_catalog(&self) -> Result<RuleCatalog> {
        let content = fs::read_to_string(&self.catalog_path).with_context(|| {
            format!("Failed to read rule catalog {}", self.catalog_path.display())
        })?;

        let mut catalog: RuleCatalog = match self.format {
            CatalogFormat::Json => {
                serde_json::from_str(&content).context("Failed to parse JSON rule catalog")?
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(&content).context("Failed to parse YAML rule catalog")?
            }
            CatalogFormat::Toml => {
                toml::from_str(&content).context("Failed to parse TOML rule catalog")?
            }
        };

        // Identifiers end up verbatim in `--select=`.
        for rule in &mut catalog.rules {
            rule.identifier = rule.identifier.trim().to_string();
            rule.description = rule.description.trim().to_string();
        }
        Ok(catalog)
    }

    fn save_catalog(&self, catalog: &RuleCatalog) -> Result<()> {
        let content = match self.format {
            CatalogFormat::Json => {
                serde_json::to_string_pretty(catalog).context("Failed to serialize to JSON")?
            }
            CatalogFormat::Yaml => {
                serde_yaml::to_string(catalog).context("Failed to serialize to YAML")?
            }
            CatalogFormat::Toml => {
                toml::to_string_pretty(catalog).context("Failed to serialize to TOML")?
            }
        };

        fs::write(&self.catalog_path, content).with_context(|| {
            format!("Failed to write rule catalog {}", self.catalog_path.display())
        })?;
        Ok(())
    }

    fn get_catalog_path(&self) -> &Path {
        &self.catalog_path
    }
}
