//! Net free area compliance calculation

use serde::{Deserialize, Serialize};
use shared_types::{ComplianceResult, SquareFootage, VentCategory, VentEntry, VentilationSystem};

use crate::catalog::VentCatalog;
use crate::error::ComplianceError;

/// What to do with an entry whose vent type is not in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownVentPolicy {
    /// Count the entry as zero NFA
    #[default]
    Ignore,
    /// Fail the whole calculation
    Reject,
}

/// Stateless calculator over a vent catalog
#[derive(Debug, Clone, Default)]
pub struct ComplianceCalculator {
    catalog: VentCatalog,
    unknown_vents: UnknownVentPolicy,
}

impl ComplianceCalculator {
    pub fn new(catalog: VentCatalog) -> Self {
        Self {
            catalog,
            unknown_vents: UnknownVentPolicy::default(),
        }
    }

    pub fn with_unknown_vent_policy(mut self, policy: UnknownVentPolicy) -> Self {
        self.unknown_vents = policy;
        self
    }

    pub fn catalog(&self) -> &VentCatalog {
        &self.catalog
    }

    pub fn unknown_vent_policy(&self) -> UnknownVentPolicy {
        self.unknown_vents
    }

    /// Compute required and provided NFA for a list of vent entries.
    ///
    /// `square_footage` must be finite and positive. An empty entry list is
    /// valid and yields zero NFA and 0% compliance in both categories.
    pub fn compute(
        &self,
        square_footage: f64,
        entries: &[VentEntry],
    ) -> Result<ComplianceResult, ComplianceError> {
        let square_footage = SquareFootage::new(square_footage)?;
        let required_nfa = square_footage.required_nfa();

        let mut intake_nfa = 0.0;
        let mut exhaust_nfa = 0.0;

        for entry in entries {
            let nfa = self.entry_nfa(entry)?;
            match entry.category {
                VentCategory::Intake => intake_nfa += nfa,
                VentCategory::Exhaust => exhaust_nfa += nfa,
            }
        }

        let intake_compliance_pct = compliance_percentage(intake_nfa, required_nfa);
        let exhaust_compliance_pct = compliance_percentage(exhaust_nfa, required_nfa);
        if !intake_compliance_pct.is_finite() || !exhaust_compliance_pct.is_finite() {
            return Err(ComplianceError::InvalidInput(format!(
                "Square footage {} is too small to rate",
                square_footage
            )));
        }

        Ok(ComplianceResult {
            required_nfa,
            intake_nfa,
            exhaust_nfa,
            intake_compliance_pct,
            exhaust_compliance_pct,
        })
    }

    pub fn compute_system(
        &self,
        square_footage: f64,
        system: &VentilationSystem,
    ) -> Result<ComplianceResult, ComplianceError> {
        self.compute(square_footage, system.entries())
    }

    fn entry_nfa(&self, entry: &VentEntry) -> Result<f64, ComplianceError> {
        match self.catalog.rating(&entry.vent_type) {
            Some(rating) => Ok(f64::from(entry.quantity) * rating),
            None => match self.unknown_vents {
                UnknownVentPolicy::Ignore => Ok(0.0),
                UnknownVentPolicy::Reject => {
                    Err(ComplianceError::UnknownVentType(entry.vent_type.clone()))
                }
            },
        }
    }
}

/// `provided / required * 100`; equal areas give exactly 100.0
fn compliance_percentage(provided_nfa: f64, required_nfa: f64) -> f64 {
    (provided_nfa / required_nfa) * 100.0
}
