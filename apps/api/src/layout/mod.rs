// Document Layout Engine.
// compute_panel is pure and returns its own height; the composer chains the
// second panel's origin from the first panel's height. Renderers must never
// re-derive row counts or column ratios — they read them from the geometry.

pub mod composer;
pub mod dates;
pub mod font_metrics;
pub mod panel;

// Re-export the public API consumed by other modules (render, generation).
pub use composer::{compose, ComposedDocument};
pub use font_metrics::{default_page_config, FontFamily, PageConfig};
pub use panel::{compute_panel, CopyKind, PanelGeometry};
