//! Page Composer — stacks two panels and the cut line on one page.
//!
//! The defining control-flow constraint: panel 2's vertical origin cannot be
//! known until panel 1's height has been computed, so the two `compute_panel`
//! calls are strictly sequential and the separator is derived in between.
//! Both output sinks (printable document and interactive preview) consume the
//! one `ComposedDocument` this produces.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::PageConfig;
use crate::layout::panel::{compute_panel, CopyKind, PanelGeometry};
use crate::models::form::FormState;

/// The dashed cut line between the two panels, inset 40mm from each side of
/// the content area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separator {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
}

/// A fully composed page: two positioned panels and the separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedDocument {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub panel1: PanelGeometry,
    pub separator: Separator,
    pub panel2: PanelGeometry,
}

/// Composes the document from a validated form snapshot.
///
/// 1. panel 1 (School Copy) at origin offset 0
/// 2. separator y = margin + panel 1 height + gap
/// 3. panel 2 (Student Copy) at offset `separator_y + gap - margin`
pub fn compose(state: &FormState, config: &PageConfig) -> ComposedDocument {
    let panel1 = compute_panel(&state.student1, CopyKind::SchoolCopy, state, config, 0.0);

    let separator_y = config.margin_mm + panel1.height + config.panel_gap_mm;
    let separator = Separator {
        y: separator_y,
        x1: config.margin_mm + 40.0,
        x2: config.page_width_mm - config.margin_mm - 40.0,
    };

    let second_offset = separator_y + config.panel_gap_mm - config.margin_mm;
    let panel2 = compute_panel(&state.student2, CopyKind::StudentCopy, state, config, second_offset);

    ComposedDocument {
        page_width_mm: config.page_width_mm,
        page_height_mm: config.page_height_mm,
        panel1,
        separator,
        panel2,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
