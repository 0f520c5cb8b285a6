//! Attic ventilation compliance
//!
//! Building code sizes attic ventilation by net free area (NFA): one square
//! inch of open vent area per 150 square inches of attic floor, checked
//! separately for intake and exhaust. This crate holds the vent catalog, the
//! calculation, and the per-session assessment state.

pub mod assessment;
pub mod calculator;
pub mod catalog;
pub mod error;

pub use assessment::Assessment;
pub use calculator::{ComplianceCalculator, UnknownVentPolicy};
pub use catalog::{VentCatalog, VentCatalogEntry};
pub use error::{CatalogError, ComplianceError};

/// Compute compliance with the standard catalog and default policy
pub fn compute(
    square_footage: f64,
    entries: &[shared_types::VentEntry],
) -> Result<shared_types::ComplianceResult, ComplianceError> {
    ComplianceCalculator::default().compute(square_footage, entries)
}
