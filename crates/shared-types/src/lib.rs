pub mod system;
pub mod types;

pub use system::VentilationSystem;
pub use types::{
    format_percentage, ComplianceResult, ComplianceStatus, InvalidSquareFootage, SquareFootage,
    SystemKind, VentCategory, VentEntry, SQUARE_INCHES_PER_SQUARE_FOOT, VENTILATION_RATIO,
};
