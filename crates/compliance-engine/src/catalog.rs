//! Vent catalog: NFA rating per unit for each known vent type
//!
//! The standard catalog is static configuration data embedded from
//! `data/vent_catalog.json`. Alternate catalogs load from JSON with the same
//! shape, so new vent products need no change to the calculation.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use shared_types::VentCategory;

use crate::error::CatalogError;

const STANDARD_CATALOG_JSON: &str = include_str!("../data/vent_catalog.json");

lazy_static! {
    static ref STANDARD_CATALOG: VentCatalog =
        VentCatalog::from_json(STANDARD_CATALOG_JSON).expect("embedded vent catalog is valid");
}

/// A single vent product and its net free area per unit (square inches)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentCatalogEntry {
    pub name: String,
    pub category: VentCategory,
    pub nfa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentCatalog {
    vents: Vec<VentCatalogEntry>,
}

impl VentCatalog {
    /// The built-in residential vent catalog
    pub fn standard() -> Self {
        STANDARD_CATALOG.clone()
    }

    pub fn from_entries(vents: Vec<VentCatalogEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { vents };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: VentCatalog = serde_json::from_str(json)?;
        Self::from_entries(catalog.vents)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.vents.is_empty() {
            return Err(CatalogError::Invalid(
                "catalog must list at least one vent".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for vent in &self.vents {
            if vent.name.trim().is_empty() {
                return Err(CatalogError::Invalid("vent name is empty".to_string()));
            }
            if !seen.insert(vent.name.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate vent '{}'",
                    vent.name
                )));
            }
            if !vent.nfa.is_finite() || vent.nfa <= 0.0 {
                return Err(CatalogError::Invalid(format!(
                    "vent '{}' has non-positive NFA {}",
                    vent.name, vent.nfa
                )));
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[VentCatalogEntry] {
        &self.vents
    }

    pub fn len(&self) -> usize {
        self.vents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vents.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&VentCatalogEntry> {
        self.vents.iter().find(|v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// NFA per unit, looked up by name only
    pub fn rating(&self, name: &str) -> Option<f64> {
        self.get(name).map(|v| v.nfa)
    }

    /// Vents offered for a category, in catalog order
    pub fn options(&self, category: VentCategory) -> impl Iterator<Item = &VentCatalogEntry> {
        self.vents.iter().filter(move |v| v.category == category)
    }
}

impl Default for VentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
