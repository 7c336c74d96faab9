//! Print-ready drawing command sequence.
//!
//! Flattens a `ComposedDocument` into absolute-coordinate draw commands in
//! paint order. The commands carry everything a raster or vector backend
//! needs (position, face, size, gray level, dash flag); they re-derive no
//! layout — row counts, column splits, and centered x positions all come
//! from the geometry.

use serde::{Deserialize, Serialize};

use crate::layout::composer::ComposedDocument;
use crate::layout::font_metrics::FontFamily;
use crate::layout::panel::{PanelGeometry, TextGeom, TABLE_COLUMNS};

// ────────────────────────────────────────────────────────────────────────────
// Command types
// ────────────────────────────────────────────────────────────────────────────

/// How text is anchored at its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// x is the left edge (headings are pre-centered by the geometry).
    Start,
    /// x is the horizontal center (table cells anchor at column centers).
    Middle,
}

/// One absolute-coordinate drawing operation. Coordinates in mm; text y is
/// the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
        gray: u8,
        dashed: bool,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontFamily,
        size_pt: f32,
        gray: u8,
        anchor: TextAnchor,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Flattening
// ────────────────────────────────────────────────────────────────────────────

/// Flattens the whole page: panel 1, the dashed separator, panel 2.
pub fn draw_commands(doc: &ComposedDocument) -> Vec<DrawCmd> {
    let mut cmds = Vec::new();
    panel_commands(&doc.panel1, &mut cmds);
    cmds.push(DrawCmd::Line {
        x1: doc.separator.x1,
        y1: doc.separator.y,
        x2: doc.separator.x2,
        y2: doc.separator.y,
        line_width: 0.3,
        gray: 130,
        dashed: true,
    });
    panel_commands(&doc.panel2, &mut cmds);
    cmds
}

fn panel_commands(panel: &PanelGeometry, cmds: &mut Vec<DrawCmd>) {
    // Panel border
    cmds.push(DrawCmd::Rect {
        x: panel.border.x,
        y: panel.border.y,
        w: panel.border.w,
        h: panel.border.h,
        line_width: 0.5,
    });

    for line in &panel.heading {
        cmds.push(start_text(line));
    }
    cmds.push(DrawCmd::Line {
        x1: panel.heading_rule.x1,
        y1: panel.heading_rule.y1,
        x2: panel.heading_rule.x2,
        y2: panel.heading_rule.y2,
        line_width: 0.3,
        gray: 0,
        dashed: false,
    });

    for field in &panel.details {
        cmds.push(DrawCmd::Text {
            x: field.label_x,
            y: field.y,
            text: field.label.clone(),
            font: FontFamily::HelveticaBold,
            size_pt: 10.0,
            gray: 0,
            anchor: TextAnchor::Start,
        });
        cmds.push(DrawCmd::Text {
            x: field.value_x,
            y: field.y,
            text: field.value.clone(),
            font: FontFamily::Helvetica,
            size_pt: 10.0,
            gray: 0,
            anchor: TextAnchor::Start,
        });
        cmds.push(DrawCmd::Line {
            x1: field.underline.x1,
            y1: field.underline.y1,
            x2: field.underline.x2,
            y2: field.underline.y2,
            line_width: 0.3,
            gray: 0,
            dashed: false,
        });
    }

    table_commands(panel, cmds);
    cmds.push(start_text(&panel.footer));
}

fn table_commands(panel: &PanelGeometry, cmds: &mut Vec<DrawCmd>) {
    let table = &panel.table;

    // Outer frame, header band divider, column splits
    cmds.push(DrawCmd::Rect {
        x: table.x,
        y: table.y,
        w: table.width,
        h: table.height,
        line_width: 0.3,
    });
    cmds.push(DrawCmd::Line {
        x1: table.x,
        y1: table.y + table.header_height,
        x2: table.x + table.width,
        y2: table.y + table.header_height,
        line_width: 0.5,
        gray: 0,
        dashed: false,
    });
    for split in [
        table.x + table.col_widths[0],
        table.x + table.col_widths[0] + table.col_widths[1],
    ] {
        cmds.push(DrawCmd::Line {
            x1: split,
            y1: table.y,
            x2: split,
            y2: table.y + table.height,
            line_width: 0.3,
            gray: 0,
            dashed: false,
        });
    }

    // Column headings, centered in the header band
    let header_text_y = table.y + table.header_height / 2.0 + 1.5;
    for (i, heading) in TABLE_COLUMNS.iter().enumerate() {
        cmds.push(DrawCmd::Text {
            x: table.col_center_x(i),
            y: header_text_y,
            text: heading.to_string(),
            font: FontFamily::HelveticaBold,
            size_pt: 10.0,
            gray: 0,
            anchor: TextAnchor::Middle,
        });
    }

    for row in &table.rows {
        if row.divider {
            cmds.push(DrawCmd::Line {
                x1: table.x,
                y1: row.y,
                x2: table.x + table.width,
                y2: row.y,
                line_width: 0.3,
                gray: 0,
                dashed: false,
            });
        }
        if let Some(entry) = &row.entry {
            let text_y = row.y + table.row_height / 2.0 + 1.5;
            cmds.push(DrawCmd::Text {
                x: table.col_center_x(0),
                y: text_y,
                text: entry.subject.clone(),
                font: FontFamily::Helvetica,
                size_pt: 9.0,
                gray: 0,
                anchor: TextAnchor::Middle,
            });
            cmds.push(DrawCmd::Text {
                x: table.col_center_x(1),
                y: text_y,
                text: entry.date_display.clone(),
                font: FontFamily::Helvetica,
                size_pt: 9.0,
                gray: 0,
                anchor: TextAnchor::Middle,
            });
        }
        cmds.push(DrawCmd::Rect {
            x: row.signature_box.x,
            y: row.signature_box.y,
            w: row.signature_box.w,
            h: row.signature_box.h,
            line_width: 0.2,
        });
    }
}

fn start_text(geom: &TextGeom) -> DrawCmd {
    DrawCmd::Text {
        x: geom.x,
        y: geom.y,
        text: geom.text.clone(),
        font: geom.font,
        size_pt: geom.size_pt,
        gray: geom.gray,
        anchor: TextAnchor::Start,
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
        let student = Student {
            name: "Anita".to_string(),
            class_name: "V".to_string(),
            father_name: "Ramesh".to_string(),
            hall_ticket_number: "042".to_string(),
        };
        FormState {
            student1: student.clone(),
            student2: student,
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

    fn commands() -> Vec<DrawCmd> {
        draw_commands(&compose(&test_form(), &default_page_config()))
    }

    #[test]
    fn test_exactly_one_dashed_separator() {
        let dashed = commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { dashed: true, .. }))
            .count();
        assert_eq!(dashed, 1, "the cut line is the only dashed stroke");
    }

    #[test]
    fn test_signature_boxes_for_all_twelve_rows() {
        // 6 rows per panel, 2 panels — one thin-stroke box per row.
        let boxes = commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { line_width, .. } if *line_width == 0.2))
            .count();
        assert_eq!(boxes, 12);
    }

    #[test]
    fn test_populated_cells_render_per_panel() {
        let telugu = commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Text { text, .. } if text == "Telugu"))
            .count();
        assert_eq!(telugu, 2, "subject appears once in each panel");
        let dates = commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Text { text, .. } if text == "12-Aug-2025"))
            .count();
        assert_eq!(dates, 2);
    }

    #[test]
    fn test_padding_rows_render_no_text() {
        // 2 populated rows → per panel: 4 heading lines + 8 detail texts +
        // 3 column headings + 2×2 cell texts + 1 footer = 20 text commands.
        let texts = commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Text { .. }))
            .count();
        assert_eq!(texts, 40);
    }

    #[test]
    fn test_cell_text_anchors_at_column_centers() {
        let doc = compose(&test_form(), &default_page_config());
        let cmds = draw_commands(&doc);
        let subject_center = doc.panel1.table.col_center_x(0);
        let found = cmds.iter().any(|c| {
            matches!(c, DrawCmd::Text { text, x, anchor, .. }
                if text == "Telugu" && *anchor == TextAnchor::Middle && (*x - subject_center).abs() < 1e-4)
        });
        assert!(found, "subject cell should anchor mid-column");
    }

    #[test]
    fn test_panel2_commands_offset_below_separator() {
        let doc = compose(&test_form(), &default_page_config());
        let cmds = draw_commands(&doc);
        let separator_idx = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Line { dashed: true, .. }))
            .expect("separator present");
        // Every text after the separator sits below it
        for cmd in &cmds[separator_idx + 1..] {
            if let DrawCmd::Text { y, .. } = cmd {
                assert!(*y > doc.separator.y);
            }
        }
    }
}
