//! Track naming configuration
//!
//! Maps source file stems to the display names shown above each track.
//! Loaded from a TOML file such as:
//!
//! ```toml
//! [features]
//! "Genes_NC_045512.2" = "Genes (ORFs)"
//!
//! [primers]
//! "nCoV-2019" = "ARTIC bioinformatics primers for nanopore sequencing of nCoV2019"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DescriptionTable {
    names: BTreeMap<String, String>,
}

impl DescriptionTable {
    /// Display name for a source file: the configured description for its
    /// stem, else the stem itself.
    pub fn describe(&self, file_name: &str) -> String {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());

        match self.names.get(&stem) {
            Some(description) => description.clone(),
            None => stem,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DescriptionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackConfig {
    /// Display names for annotation (GFF) sources
    #[serde(default)]
    pub features: DescriptionTable,

    /// Display names for primer tables
    #[serde(default)]
    pub primers: DescriptionTable,
}

impl TrackConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        log::info!("Loading track configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrackConfig = toml::from_str(content)?;
        Ok(config)
    }
}
