//! SVG serialization of the drawing command sequence.
//!
//! The printable artifact is a single A4 SVG page in millimetre units.
//! This is a mechanical backend: it maps each `DrawCmd` to one SVG element
//! and carries no layout knowledge of its own.

use std::fmt::Write;

use crate::layout::composer::ComposedDocument;
use crate::layout::font_metrics::FontFamily;
use crate::render::document::{draw_commands, DrawCmd, TextAnchor};

/// Renders the composed document to a complete standalone SVG string.
pub fn render_svg(doc: &ComposedDocument) -> String {
    let mut out = String::with_capacity(16 * 1024);
    // Writing to a String cannot fail; fmt errors are ignored.
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" \
         viewBox=\"0 0 {w} {h}\">\n<rect width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n",
        w = doc.page_width_mm,
        h = doc.page_height_mm,
    );
    for cmd in draw_commands(doc) {
        write_cmd(&mut out, &cmd);
    }
    out.push_str("</svg>\n");
    out
}

fn write_cmd(out: &mut String, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Rect { x, y, w, h, line_width } => {
            let _ = writeln!(
                out,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
                 fill=\"none\" stroke=\"black\" stroke-width=\"{line_width}\"/>"
            );
        }
        DrawCmd::Line { x1, y1, x2, y2, line_width, gray, dashed } => {
            let dash = if *dashed { " stroke-dasharray=\"2 2\"" } else { "" };
            let _ = writeln!(
                out,
                "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" \
                 stroke=\"{}\" stroke-width=\"{line_width}\"{dash}/>",
                gray_color(*gray),
            );
        }
        DrawCmd::Text { x, y, text, font, size_pt, gray, anchor } => {
            let anchor_attr = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
            };
            // Font size in mm so the glyphs scale with the mm viewBox.
            let size_mm = size_pt * crate::layout::font_metrics::MM_PER_PT;
            let (weight, style) = match font {
                FontFamily::Helvetica => ("normal", "normal"),
                FontFamily::HelveticaBold => ("bold", "normal"),
                FontFamily::HelveticaOblique => ("normal", "italic"),
            };
            let _ = writeln!(
                out,
                "<text x=\"{x}\" y=\"{y}\" font-family=\"Helvetica, Arial, sans-serif\" \
                 font-size=\"{size_mm}\" font-weight=\"{weight}\" font-style=\"{style}\" \
                 fill=\"{}\" text-anchor=\"{anchor_attr}\">{}</text>",
                gray_color(*gray),
                escape_xml(text),
            );
        }
    }
}

fn gray_color(gray: u8) -> String {
    if gray == 0 {
        "black".to_string()
    } else {
        format!("rgb({gray},{gray},{gray})")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
