//! Scorecard content as a flat list of blocks
//!
//! Layout is kept separate from PDF writing so the wording can be checked
//! without decoding content streams.

use chrono::NaiveDate;
use shared_types::{
    format_percentage, ComplianceResult, SquareFootage, SystemKind, VentCategory,
    VentilationSystem,
};

pub const TITLE: &str = "Ready Roof Ventilation Check Scorecard";

pub const FOOTER: &str = "Balanced intake and exhaust ventilation prevents moisture buildup in winter and reduces heat in summer, extending shingle life.";

pub const EMPTY_SYSTEM_ROW: &str = "No vents entered";

/// One ventilation plan and its computed compliance
#[derive(Debug, Clone, PartialEq)]
pub struct SystemReport {
    pub system: VentilationSystem,
    pub result: ComplianceResult,
}

/// Everything printed on a scorecard
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub square_footage: SquareFootage,
    pub current: SystemReport,
    pub proposed: SystemReport,
    pub generated_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Rule,
    Heading(String),
    Line(String),
    Table(Table),
    Gap(i64),
    Note(String),
}

pub fn layout(scorecard: &Scorecard) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(TITLE.to_string()),
        Block::Rule,
        Block::Line(format!(
            "Attic Square Footage: {} SF",
            scorecard.square_footage
        )),
    ];

    if let Some(date) = scorecard.generated_on {
        blocks.push(Block::Line(format!("Generated: {}", date.format("%B %-d, %Y"))));
    }

    for report in [&scorecard.current, &scorecard.proposed] {
        blocks.push(Block::Gap(12));
        blocks.extend(system_section(report));
    }

    blocks.push(Block::Gap(18));
    blocks.push(Block::Note(FOOTER.to_string()));
    blocks
}

fn system_section(report: &SystemReport) -> Vec<Block> {
    let result = &report.result;
    let heading = match report.system.kind() {
        SystemKind::Current => "Current Ventilation System:",
        SystemKind::Proposed => "Proposed Ventilation System:",
    };

    let mut rows: Vec<Vec<String>> = report
        .system
        .entries()
        .iter()
        .map(|e| vec![e.vent_type.clone(), e.quantity.to_string()])
        .collect();
    if rows.is_empty() {
        rows.push(vec![EMPTY_SYSTEM_ROW.to_string(), "-".to_string()]);
    }

    vec![
        Block::Heading(heading.to_string()),
        Block::Table(Table {
            header: vec!["Vent Type".to_string(), "Quantity".to_string()],
            rows,
        }),
        Block::Gap(6),
        Block::Line(format!("Required NFA: {:.2} sq in", result.required_nfa)),
        Block::Line(format!("Intake NFA: {:.2} sq in", result.intake_nfa)),
        Block::Line(format!("Exhaust NFA: {:.2} sq in", result.exhaust_nfa)),
        compliance_line(result, VentCategory::Exhaust),
        compliance_line(result, VentCategory::Intake),
    ]
}

fn compliance_line(result: &ComplianceResult, category: VentCategory) -> Block {
    Block::Line(format!(
        "{} Compliance: {}% ({})",
        category,
        format_percentage(result.compliance_pct(category)),
        result.status(category)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Line(text) | Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn sample() -> Scorecard {
        let mut current = VentilationSystem::new(SystemKind::Current);
        current.set_quantity(VentCategory::Exhaust, "Ridge Vent", 40);
        current.set_quantity(VentCategory::Intake, "Center Vent Soffit", 4);

        Scorecard {
            square_footage: SquareFootage::new(1000.0).unwrap(),
            current: SystemReport {
                system: current,
                result: ComplianceResult {
                    required_nfa: 960.0,
                    intake_nfa: 72.0,
                    exhaust_nfa: 720.0,
                    intake_compliance_pct: 7.5,
                    exhaust_compliance_pct: 75.0,
                },
            },
            proposed: SystemReport {
                system: VentilationSystem::new(SystemKind::Proposed),
                result: ComplianceResult {
                    required_nfa: 960.0,
                    intake_nfa: 0.0,
                    exhaust_nfa: 0.0,
                    intake_compliance_pct: 0.0,
                    exhaust_compliance_pct: 0.0,
                },
            },
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 19),
        }
    }

    #[test]
    fn test_layout_starts_with_title_and_rule() {
        let blocks = layout(&sample());
        assert_eq!(blocks[0], Block::Title(TITLE.to_string()));
        assert_eq!(blocks[1], Block::Rule);
    }

    #[test]
    fn test_layout_lines() {
        let blocks = layout(&sample());

        assert_eq!(
            lines(&blocks),
            vec![
                "Attic Square Footage: 1000 SF",
                "Generated: October 19, 2026",
                "Current Ventilation System:",
                "Required NFA: 960.00 sq in",
                "Intake NFA: 72.00 sq in",
                "Exhaust NFA: 720.00 sq in",
                "Exhaust Compliance: 75.00% (Fail)",
                "Intake Compliance: 7.50% (Fail)",
                "Proposed Ventilation System:",
                "Required NFA: 960.00 sq in",
                "Intake NFA: 0.00 sq in",
                "Exhaust NFA: 0.00 sq in",
                "Exhaust Compliance: 0.00% (Fail)",
                "Intake Compliance: 0.00% (Fail)",
            ]
        );
    }

    #[test]
    fn test_tables_list_entries_or_placeholder() {
        let blocks = layout(&sample());
        let tables: Vec<&Table> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].header, vec!["Vent Type", "Quantity"]);
        assert_eq!(
            tables[0].rows,
            vec![
                vec!["Ridge Vent".to_string(), "40".to_string()],
                vec!["Center Vent Soffit".to_string(), "4".to_string()],
            ]
        );
        assert_eq!(
            tables[1].rows,
            vec![vec![EMPTY_SYSTEM_ROW.to_string(), "-".to_string()]]
        );
    }

    #[test]
    fn test_layout_ends_with_footer() {
        let blocks = layout(&sample());
        assert_eq!(blocks.last(), Some(&Block::Note(FOOTER.to_string())));
    }

    #[test]
    fn test_generated_line_omitted_without_date() {
        let mut scorecard = sample();
        scorecard.generated_on = None;

        let blocks = layout(&scorecard);
        assert!(!lines(&blocks).iter().any(|l| l.starts_with("Generated")));
    }
}
