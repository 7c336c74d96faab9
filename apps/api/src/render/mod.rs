// Output renderers. Both consume the composed geometry; neither re-derives
// layout. `document` + `svg` produce the printable page, `preview` the flow
// tree for interactive display.

pub mod document;
pub mod preview;
pub mod svg;

pub use document::{draw_commands, DrawCmd};
pub use preview::{build_preview, PreviewDocument};
pub use svg::render_svg;
