//! Logbook configuration
//!
//! The configuration mirrors the include/exclude block of the logbook
//! component:
//!
//! ```toml
//! [include]
//! domains = ["light"]
//! entities = ["sensor.outside"]
//! entity_globs = ["binary_sensor.*_door"]
//!
//! [exclude]
//! domains = ["automation"]
//! ```
//!
//! An empty configuration means "no filter".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::EntityFilter;

/// One side (include or exclude) of the entity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSpec {
    /// Whole domains
    pub domains: Vec<String>,
    /// Individual entity ids
    pub entities: Vec<String>,
    /// Entity id globs (`*` and `?` wildcards)
    pub entity_globs: Vec<String>,
}

impl FilterSpec {
    /// Whether nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.entities.is_empty() && self.entity_globs.is_empty()
    }
}

/// Top-level logbook configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogbookConfig {
    /// Entities to show
    pub include: FilterSpec,
    /// Entities to hide
    pub exclude: FilterSpec,
}

impl LogbookConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&source)
    }

    /// Build the entity filter, or `None` when nothing is configured.
    pub fn entity_filter(&self) -> Result<Option<EntityFilter>> {
        if self.include.is_empty() && self.exclude.is_empty() {
            return Ok(None);
        }
        EntityFilter::new(&self.include, &self.exclude).map(Some)
    }
}
