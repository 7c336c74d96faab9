//! Interactive preview tree.
//!
//! Walks the composed geometry into a flow-layout structure the form UI can
//! render with its own layout engine. Content parity with the printed page
//! is guaranteed by construction: row counts, column ratios, formatted dates,
//! and field values are read off the geometry, never recomputed here.
//! Pixel positions are deliberately absent — the preview flows.

use serde::{Deserialize, Serialize};

use crate::layout::composer::ComposedDocument;
use crate::layout::panel::{CopyKind, PanelGeometry, TABLE_COLUMNS};

// ────────────────────────────────────────────────────────────────────────────
// Preview tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub subject: String,
    pub date: String,
    /// False for the padding rows that only carry a signature box.
    pub populated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPreview {
    pub copy: CopyKind,
    pub school_name: String,
    pub academic_year_line: String,
    pub title: String,
    pub examination_type: String,
    pub fields: Vec<PreviewField>,
    pub columns: Vec<String>,
    /// Column widths as fractions of the table width, matching the print
    /// output's 0.33 / 0.33 / remainder split.
    pub column_ratios: [f32; 3],
    pub rows: Vec<PreviewRow>,
    pub footer: String,
}

/// The whole preview: School Copy, a cut-line marker, Student Copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewDocument {
    pub school_copy: PanelPreview,
    pub student_copy: PanelPreview,
}

// ────────────────────────────────────────────────────────────────────────────
// Construction
// ────────────────────────────────────────────────────────────────────────────

/// Builds the flow tree from composed geometry.
pub fn build_preview(doc: &ComposedDocument) -> PreviewDocument {
    PreviewDocument {
        school_copy: panel_preview(&doc.panel1),
        student_copy: panel_preview(&doc.panel2),
    }
}

fn panel_preview(panel: &PanelGeometry) -> PanelPreview {
    // Heading order is fixed by the geometry: school, year, title, exam type.
    let heading_text = |i: usize| panel.heading.get(i).map(|t| t.text.clone()).unwrap_or_default();

    let width = panel.table.width;
    let column_ratios = [
        panel.table.col_widths[0] / width,
        panel.table.col_widths[1] / width,
        panel.table.col_widths[2] / width,
    ];

    PanelPreview {
        copy: panel.copy,
        school_name: heading_text(0),
        academic_year_line: heading_text(1),
        title: heading_text(2),
        examination_type: heading_text(3),
        fields: panel
            .details
            .iter()
            .map(|f| PreviewField {
                label: f.label.clone(),
                value: f.value.clone(),
            })
            .collect(),
        columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        column_ratios,
        rows: panel
            .table
            .rows
            .iter()
            .map(|row| match &row.entry {
                Some(entry) => PreviewRow {
                    subject: entry.subject.clone(),
                    date: entry.date_display.clone(),
                    populated: true,
                },
                None => PreviewRow {
                    subject: String::new(),
                    date: String::new(),
                    populated: false,
                },
            })
            .collect(),
        footer: panel.footer.text.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::composer::compose;
    use crate::layout::font_metrics::default_page_config;
    use crate::models::form::{FormState, Student, Subject};

    fn test_form() -> FormState {
        let student1 = Student {
            name: "Anita".to_string(),
            class_name: "V".to_string(),
            father_name: "Ramesh".to_string(),
            hall_ticket_number: "042".to_string(),
        };
        let student2 = Student {
            name: "Bhavana".to_string(),
            class_name: "III".to_string(),
            father_name: "Suresh".to_string(),
            hall_ticket_number: "043".to_string(),
        };
        FormState {
            student1,
            student2,
            subjects: vec![
                Subject {
                    name: "Telugu".to_string(),
                    date: "2025-08-12".to_string(),
                },
                Subject {
                    name: "English".to_string(),
                    date: "2025-08-13".to_string(),
                },
            ],
            ..FormState::default()
        }
    }

    fn preview() -> PreviewDocument {
        build_preview(&compose(&test_form(), &default_page_config()))
    }

    #[test]
    fn test_row_count_matches_print_output() {
        let p = preview();
        assert_eq!(p.school_copy.rows.len(), 6);
        assert_eq!(p.student_copy.rows.len(), 6);
        assert_eq!(
            p.school_copy.rows.iter().filter(|r| r.populated).count(),
            2
        );
    }

    #[test]
    fn test_column_ratios_sum_to_one() {
        let p = preview();
        let sum: f32 = p.school_copy.column_ratios.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "ratios should sum to 1, got {sum}");
    }

    #[test]
    fn test_dates_match_print_formatting() {
        let p = preview();
        assert_eq!(p.school_copy.rows[0].date, "12-Aug-2025");
        assert_eq!(p.school_copy.rows[1].date, "13-Aug-2025");
    }

    #[test]
    fn test_panels_carry_their_own_student() {
        let p = preview();
        let name = |panel: &PanelPreview| {
            panel
                .fields
                .iter()
                .find(|f| f.label == "Student Name:")
                .map(|f| f.value.clone())
        };
        assert_eq!(name(&p.school_copy).as_deref(), Some("Anita"));
        assert_eq!(name(&p.student_copy).as_deref(), Some("Bhavana"));
    }

    #[test]
    fn test_shared_heading_content() {
        let p = preview();
        assert_eq!(p.school_copy.title, "HALL TICKET");
        assert_eq!(p.school_copy.school_name, p.student_copy.school_name);
        assert_eq!(p.school_copy.academic_year_line, "Academic Year: 2025-26");
    }

    #[test]
    fn test_padding_rows_are_blank() {
        let p = preview();
        for row in p.school_copy.rows.iter().skip(2) {
            assert!(!row.populated);
            assert!(row.subject.is_empty() && row.date.is_empty());
        }
    }

    #[test]
    fn test_column_headings_in_order() {
        let p = preview();
        assert_eq!(
            p.school_copy.columns,
            vec!["Subject", "Date", "Invigilator's Signature"]
        );
    }
}
