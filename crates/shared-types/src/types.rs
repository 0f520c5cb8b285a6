use std::fmt;

/// Square inches in one square foot of attic floor
pub const SQUARE_INCHES_PER_SQUARE_FOOT: f64 = 144.0;

/// Code ratio: one unit of net free area per 150 units of attic floor
pub const VENTILATION_RATIO: f64 = 150.0;

/// The two balanced-ventilation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VentCategory {
    Intake,
    Exhaust,
}

impl VentCategory {
    pub const ALL: [VentCategory; 2] = [VentCategory::Intake, VentCategory::Exhaust];

    pub fn as_str(&self) -> &'static str {
        match self {
            VentCategory::Intake => "intake",
            VentCategory::Exhaust => "exhaust",
        }
    }
}

impl fmt::Display for VentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VentCategory::Intake => write!(f, "Intake"),
            VentCategory::Exhaust => write!(f, "Exhaust"),
        }
    }
}

/// Which of the two ventilation plans in a session a system describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    Current,
    Proposed,
}

impl SystemKind {
    pub fn title(&self) -> &'static str {
        match self {
            SystemKind::Current => "Current",
            SystemKind::Proposed => "Proposed",
        }
    }
}

/// One line of a ventilation plan: how many of a given vent are installed
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VentEntry {
    pub category: VentCategory,
    pub vent_type: String, // Catalog name, e.g. "Ridge Vent"
    pub quantity: u32,
}

impl VentEntry {
    pub fn new(category: VentCategory, vent_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            category,
            vent_type: vent_type.into(),
            quantity,
        }
    }

    /// True if this entry occupies the same (category, vent type) slot
    pub fn same_slot(&self, category: VentCategory, vent_type: &str) -> bool {
        self.category == category && self.vent_type == vent_type
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Square footage must be a positive number (got {0})")]
pub struct InvalidSquareFootage(pub f64);

/// Attic floor area in square feet.
///
/// Always finite and strictly positive, and so is the required NFA derived
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct SquareFootage(f64);

impl SquareFootage {
    pub fn new(value: f64) -> Result<Self, InvalidSquareFootage> {
        let required_nfa = value * SQUARE_INCHES_PER_SQUARE_FOOT / VENTILATION_RATIO;
        if value.is_finite() && value > 0.0 && required_nfa.is_finite() && required_nfa > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidSquareFootage(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Code-required net free area in square inches (1:150 rule)
    pub fn required_nfa(&self) -> f64 {
        self.0 * SQUARE_INCHES_PER_SQUARE_FOOT / VENTILATION_RATIO
    }
}

impl TryFrom<f64> for SquareFootage {
    type Error = InvalidSquareFootage;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SquareFootage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComplianceStatus {
    Pass,
    Fail,
}

impl ComplianceStatus {
    /// Pass at or above 100%, inclusive. NaN is a Fail.
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 100.0 {
            ComplianceStatus::Pass
        } else {
            ComplianceStatus::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ComplianceStatus::Pass)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "Pass",
            ComplianceStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required versus provided net free area for one ventilation system
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceResult {
    pub required_nfa: f64,
    pub intake_nfa: f64,
    pub exhaust_nfa: f64,
    pub intake_compliance_pct: f64,
    pub exhaust_compliance_pct: f64,
}

impl ComplianceResult {
    pub fn nfa(&self, category: VentCategory) -> f64 {
        match category {
            VentCategory::Intake => self.intake_nfa,
            VentCategory::Exhaust => self.exhaust_nfa,
        }
    }

    pub fn compliance_pct(&self, category: VentCategory) -> f64 {
        match category {
            VentCategory::Intake => self.intake_compliance_pct,
            VentCategory::Exhaust => self.exhaust_compliance_pct,
        }
    }

    pub fn status(&self, category: VentCategory) -> ComplianceStatus {
        ComplianceStatus::from_percentage(self.compliance_pct(category))
    }

    pub fn intake_status(&self) -> ComplianceStatus {
        self.status(VentCategory::Intake)
    }

    pub fn exhaust_status(&self) -> ComplianceStatus {
        self.status(VentCategory::Exhaust)
    }

    /// Both categories meet the requirement
    pub fn is_compliant(&self) -> bool {
        self.intake_status().is_pass() && self.exhaust_status().is_pass()
    }
}

/// Format a compliance percentage with two decimals for display.
///
/// A failing value never renders as "100.00".
pub fn format_percentage(pct: f64) -> String {
    let shown = format!("{:.2}", pct);
    if pct < 100.0 && shown == "100.00" {
        "99.99".to_string()
    } else {
        shown
    }
}
