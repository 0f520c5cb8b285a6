//! Session state for one roof: attic size plus current and proposed plans
//!
//! Results are never stored; each call recomputes from the current inputs.

use shared_types::{
    ComplianceResult, SquareFootage, SystemKind, VentCategory, VentilationSystem,
};

use crate::calculator::ComplianceCalculator;
use crate::error::ComplianceError;

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    square_footage: Option<SquareFootage>,
    current: VentilationSystem,
    proposed: VentilationSystem,
}

impl Assessment {
    pub fn new() -> Self {
        Self {
            square_footage: None,
            current: VentilationSystem::new(SystemKind::Current),
            proposed: VentilationSystem::new(SystemKind::Proposed),
        }
    }

    pub fn square_footage(&self) -> Option<SquareFootage> {
        self.square_footage
    }

    /// Rejects non-positive or non-finite areas and leaves the old value
    pub fn set_square_footage(&mut self, value: f64) -> Result<(), ComplianceError> {
        self.square_footage = Some(SquareFootage::new(value)?);
        Ok(())
    }

    pub fn clear_square_footage(&mut self) {
        self.square_footage = None;
    }

    pub fn system(&self, kind: SystemKind) -> &VentilationSystem {
        match kind {
            SystemKind::Current => &self.current,
            SystemKind::Proposed => &self.proposed,
        }
    }

    pub fn system_mut(&mut self, kind: SystemKind) -> &mut VentilationSystem {
        match kind {
            SystemKind::Current => &mut self.current,
            SystemKind::Proposed => &mut self.proposed,
        }
    }

    pub fn set_quantity(
        &mut self,
        kind: SystemKind,
        category: VentCategory,
        vent_type: impl Into<String>,
        quantity: u32,
    ) {
        self.system_mut(kind)
            .set_quantity(category, vent_type, quantity);
    }

    /// `None` until a square footage has been entered
    pub fn result(
        &self,
        kind: SystemKind,
        calculator: &ComplianceCalculator,
    ) -> Result<Option<ComplianceResult>, ComplianceError> {
        match self.square_footage {
            Some(sf) => calculator
                .compute_system(sf.value(), self.system(kind))
                .map(Some),
            None => Ok(None),
        }
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new()
    }
}
