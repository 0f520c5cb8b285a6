//! Ventilation scorecard PDF
//!
//! Renders the current and proposed ventilation plans, their NFA figures and
//! pass/fail lines into a downloadable PDF.

pub mod error;
pub mod layout;
pub mod writer;

use std::path::Path;

pub use error::ReportError;
pub use layout::{layout, Block, Scorecard, SystemReport, Table};

/// File name offered to browsers and used by the CLI by default
pub const DEFAULT_FILE_NAME: &str = "Ventilation_Report.pdf";

/// Build the scorecard PDF in memory
pub fn render(scorecard: &Scorecard) -> Result<Vec<u8>, ReportError> {
    writer::write_pdf(&layout(scorecard), layout::TITLE)
}

/// Build the scorecard and write it to `path`
pub fn save(scorecard: &Scorecard, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let bytes = render(scorecard)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lopdf::{content::Content, Document, Object};
    use shared_types::{
        ComplianceResult, SquareFootage, SystemKind, VentCategory, VentilationSystem,
    };

    fn result(intake: f64, exhaust: f64, required: f64) -> ComplianceResult {
        ComplianceResult {
            required_nfa: required,
            intake_nfa: intake,
            exhaust_nfa: exhaust,
            intake_compliance_pct: intake / required * 100.0,
            exhaust_compliance_pct: exhaust / required * 100.0,
        }
    }

    fn scorecard() -> Scorecard {
        let mut current = VentilationSystem::new(SystemKind::Current);
        current.set_quantity(VentCategory::Exhaust, "Ridge Vent", 40);

        let mut proposed = VentilationSystem::new(SystemKind::Proposed);
        proposed.set_quantity(VentCategory::Exhaust, "Ridge Vent", 60);
        proposed.set_quantity(VentCategory::Intake, "Full Vent Soffit", 16);

        Scorecard {
            square_footage: SquareFootage::new(1000.0).unwrap(),
            current: SystemReport {
                system: current,
                result: result(0.0, 720.0, 960.0),
            },
            proposed: SystemReport {
                system: proposed,
                result: result(960.0, 1080.0, 960.0),
            },
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 19),
        }
    }

    /// Concatenate every string shown with Tj across all pages
    fn shown_text(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        let mut shown = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            for op in content.operations {
                if op.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        shown.push(String::from_utf8_lossy(bytes).into_owned());
                    }
                }
            }
        }
        shown
    }

    #[test]
    fn test_render_produces_loadable_pdf() {
        let bytes = render(&scorecard()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_contains_scorecard_text() {
        let text = shown_text(&render(&scorecard()).unwrap());

        for expected in [
            "Ready Roof Ventilation Check Scorecard",
            "Attic Square Footage: 1000 SF",
            "Current Ventilation System:",
            "Proposed Ventilation System:",
            "Vent Type",
            "Ridge Vent",
            "Exhaust Compliance: 75.00% (Fail)",
            "Intake Compliance: 0.00% (Fail)",
            "Exhaust Compliance: 112.50% (Pass)",
            "Intake Compliance: 100.00% (Pass)",
        ] {
            assert!(
                text.iter().any(|t| t == expected),
                "missing '{}' in {:?}",
                expected,
                text
            );
        }
    }

    #[test]
    fn test_footer_is_wrapped_but_complete() {
        let text = shown_text(&render(&scorecard()).unwrap());
        let joined = text.join(" ");

        assert!(joined.contains(layout::FOOTER));
        assert!(!text.iter().any(|t| t == layout::FOOTER));
    }

    #[test]
    fn test_save_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "scorecard-{}-{}",
            std::process::id(),
            DEFAULT_FILE_NAME
        ));

        save(&scorecard(), &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let err = save(&scorecard(), "/nonexistent/dir/report.pdf").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
