//! Panel Geometry Calculator — absolute coordinates for one hall-ticket panel.
//!
//! `compute_panel` is a pure function: one student, the shared subject list,
//! and a vertical origin in; a fully positioned `PanelGeometry` (including
//! its total height) out. The composer calls it twice and chains panel 2's
//! origin from panel 1's returned height, which is why the height lives on
//! the geometry instead of in hidden cursor state.
//!
//! All coordinates are millimetres on an A4 portrait page. Text y values are
//! baselines. Geometry computation assumes a validated form — it raises no
//! errors and must not run before the validator passes.

use serde::{Deserialize, Serialize};

use crate::layout::dates::format_exam_date;
use crate::layout::font_metrics::{get_metrics, FontFamily, PageConfig};
use crate::models::form::{FormState, Student, HALL_TICKET_PREFIX};

// ────────────────────────────────────────────────────────────────────────────
// Layout constants (mm unless noted)
// ────────────────────────────────────────────────────────────────────────────

/// Height of one schedule-table row.
pub const ROW_HEIGHT_MM: f32 = 7.0;
/// Height of the schedule-table header band.
pub const TABLE_HEADER_HEIGHT_MM: f32 = 8.0;
/// Fixed vertical extent of everything above the table: border padding,
/// school header, title block, and the two detail rows.
pub const BASE_TICKET_HEIGHT_MM: f32 = 85.0;
/// The table always reserves at least this many rows, padding with empty
/// signature rows when fewer subjects are scheduled.
pub const MIN_TABLE_ROWS: usize = 6;

/// Schedule-table column headings, left to right.
pub const TABLE_COLUMNS: [&str; 3] = ["Subject", "Date", "Invigilator's Signature"];

const GRAY_TEXT: u8 = 80;

// ────────────────────────────────────────────────────────────────────────────
// Geometry types
// ────────────────────────────────────────────────────────────────────────────

/// Which of the two stacked panels this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyKind {
    SchoolCopy,
    StudentCopy,
}

impl CopyKind {
    pub fn label(&self) -> &'static str {
        match self {
            CopyKind::SchoolCopy => "School Copy",
            CopyKind::StudentCopy => "Student Copy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectGeom {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineGeom {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A positioned line of text. `x` is the left edge; centered heading lines
/// get their `x` precomputed from measured text width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGeom {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: FontFamily,
    pub size_pt: f32,
    /// Gray level, 0 = black.
    pub gray: u8,
}

/// One labelled detail field ("Hall Ticket No:", "Class:", ...) with its
/// value and the underline the value sits on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    pub label_x: f32,
    pub value_x: f32,
    pub y: f32,
    pub underline: LineGeom,
}

/// Text content of a populated schedule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowEntry {
    pub subject: String,
    pub date_display: String,
}

/// One schedule-table row. Padding rows carry no entry — just grid lines and
/// the empty signature box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Top edge of the row.
    pub y: f32,
    pub entry: Option<RowEntry>,
    /// Whether a horizontal divider is drawn along the row's top edge
    /// (every row except the first).
    pub divider: bool,
    pub signature_box: RectGeom,
}

/// The schedule table: outer frame, column split, and all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Subject / Date / Signature widths. The third column absorbs flooring
    /// remainders so the three always sum exactly to `width`.
    pub col_widths: [f32; 3],
    pub rows: Vec<TableRow>,
}

impl TableGeometry {
    /// Horizontal center of column `i` (0-based), for centered cell text.
    pub fn col_center_x(&self, i: usize) -> f32 {
        let offset: f32 = self.col_widths[..i].iter().sum();
        self.x + offset + self.col_widths[i] / 2.0
    }
}

/// Everything needed to render one panel, in either output medium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub copy: CopyKind,
    /// Top of the panel region (origin offset + page margin).
    pub origin_y: f32,
    /// Total vertical extent of this panel. The composer chains panel 2's
    /// offset from panel 1's value.
    pub height: f32,
    pub border: RectGeom,
    /// School name, academic year, HALL TICKET title, examination type —
    /// each centered on the page via measured width.
    pub heading: Vec<TextGeom>,
    /// Rule under the academic-year line.
    pub heading_rule: LineGeom,
    /// The four student detail fields in render order.
    pub details: Vec<DetailField>,
    pub table: TableGeometry,
    /// Principal's signature line, bottom right.
    pub footer: TextGeom,
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry computation
// ────────────────────────────────────────────────────────────────────────────

/// Computes the full geometry of one panel at the given vertical origin.
///
/// `state` supplies the shared school fields and subject list; `student`
/// supplies the per-panel details. Height depends only on the valid-subject
/// count, so both panels of one document always come out the same height.
pub fn compute_panel(
    student: &Student,
    copy: CopyKind,
    state: &FormState,
    config: &PageConfig,
    origin_offset_y: f32,
) -> PanelGeometry {
    let page_w = config.page_width_mm;
    let margin = config.margin_mm;
    let content_w = config.content_width_mm();
    let start_y = origin_offset_y + margin;

    let rows = state.valid_subjects();
    let row_count = rows.len().max(MIN_TABLE_ROWS);
    let table_height = TABLE_HEADER_HEIGHT_MM + row_count as f32 * ROW_HEIGHT_MM;
    let height = BASE_TICKET_HEIGHT_MM + table_height;

    let border = RectGeom {
        x: margin + 2.0,
        y: start_y + 2.0,
        w: content_w - 4.0,
        h: height - 4.0,
    };

    // ── Heading block, centered via measured width ──────────────────────────
    let academic_year_line = format!("Academic Year: {}", state.academic_year);
    let heading = vec![
        centered_text(&state.school_name, page_w, start_y + 15.0, FontFamily::HelveticaBold, 18.0, 0),
        centered_text(&academic_year_line, page_w, start_y + 22.0, FontFamily::Helvetica, 11.0, GRAY_TEXT),
        centered_text("HALL TICKET", page_w, start_y + 33.0, FontFamily::HelveticaBold, 15.0, 0),
        centered_text(&state.examination_type, page_w, start_y + 40.0, FontFamily::Helvetica, 12.0, 0),
    ];
    let heading_rule = LineGeom {
        x1: margin + 15.0,
        y1: start_y + 25.0,
        x2: page_w - margin - 15.0,
        y2: start_y + 25.0,
    };

    // ── Detail fields, two columns of two rows ──────────────────────────────
    let details_y = start_y + 50.0;
    let label_width = 32.0;
    let left_col_start = margin + 8.0;
    let left_col_end = page_w / 2.0 - 5.0;
    let right_col_start = page_w / 2.0 + 5.0;
    let right_col_end = page_w - margin - 8.0;
    let row1_y = details_y;
    let row2_y = details_y + 10.0;

    let ticket_number = format!("{HALL_TICKET_PREFIX}{}", student.hall_ticket_number);
    let details = vec![
        detail_field("Hall Ticket No:", &ticket_number, left_col_start, left_col_end, label_width, row1_y),
        detail_field("Student Name:", &student.name, right_col_start, right_col_end, label_width, row1_y),
        detail_field("Class:", &student.class_name, left_col_start, left_col_end, label_width, row2_y),
        detail_field("Father Name:", &student.father_name, right_col_start, right_col_end, label_width, row2_y),
    ];

    // ── Schedule table ──────────────────────────────────────────────────────
    let table_x = margin + 8.0;
    let table_y = details_y + 18.0;
    let table_w = content_w - 16.0;
    let col1 = (table_w * 0.33).floor();
    let col2 = (table_w * 0.33).floor();
    let col3 = table_w - col1 - col2;

    let table_rows = (0..row_count)
        .map(|i| {
            let row_y = table_y + TABLE_HEADER_HEIGHT_MM + i as f32 * ROW_HEIGHT_MM;
            let sig_w = col3 * 0.8;
            TableRow {
                y: row_y,
                entry: rows.get(i).map(|s| RowEntry {
                    subject: s.name.trim().to_string(),
                    date_display: format_exam_date(&s.date),
                }),
                divider: i > 0,
                signature_box: RectGeom {
                    x: table_x + col1 + col2 + (col3 - sig_w) / 2.0,
                    y: row_y + 1.0,
                    w: sig_w,
                    h: ROW_HEIGHT_MM - 2.0,
                },
            }
        })
        .collect();

    let table = TableGeometry {
        x: table_x,
        y: table_y,
        width: table_w,
        height: table_height,
        header_height: TABLE_HEADER_HEIGHT_MM,
        row_height: ROW_HEIGHT_MM,
        col_widths: [col1, col2, col3],
        rows: table_rows,
    };

    let footer = TextGeom {
        text: "Principal's Signature".to_string(),
        x: page_w - margin - 50.0,
        y: start_y + height - 10.0,
        font: FontFamily::HelveticaOblique,
        size_pt: 9.5,
        gray: GRAY_TEXT,
    };

    PanelGeometry {
        copy,
        origin_y: start_y,
        height,
        border,
        heading,
        heading_rule,
        details,
        table,
        footer,
    }
}

/// Centers a heading line on the page using the face's measured width.
fn centered_text(
    text: &str,
    page_w: f32,
    y: f32,
    font: FontFamily,
    size_pt: f32,
    gray: u8,
) -> TextGeom {
    let width = get_metrics(&font).measure_mm(text, size_pt);
    TextGeom {
        text: text.to_string(),
        x: (page_w - width) / 2.0,
        y,
        font,
        size_pt,
        gray,
    }
}

fn detail_field(
    label: &str,
    value: &str,
    col_start: f32,
    col_end: f32,
    label_width: f32,
    y: f32,
) -> DetailField {
    let value_x = col_start + label_width;
    DetailField {
        label: label.to_string(),
        value: value.to_string(),
        label_x: col_start,
        value_x,
        y,
        underline: LineGeom {
            x1: value_x - 1.0,
            y1: y + 1.5,
            x2: col_end,
            y2: y + 1.5,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
