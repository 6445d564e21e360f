//! Styled rendering for 2-way and 3-way region counts.
//!
//! The SVG writer is the single drawing path; other formats convert its output.

pub mod export;
pub mod layout;
pub mod output;
pub mod style;
pub mod svg;

pub use layout::{compute_layout, is_unbalanced, Circle, Point, VennLayout};
pub use output::{encode_figure, write_figure, write_output, OutputFormat};
pub use style::{FontFamily, FontSpec, FontStyle, OutlineStyle, StyleConfig};
pub use svg::render_venn_svg;
