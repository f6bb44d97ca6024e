//! Vector output for laid-out symbols
//!
//! `path` turns a module matrix into compact path data; `svg` serializes a
//! LayoutResult as a standalone document or as a bare group fragment.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use path::{build_path, path_for_lines};
pub use svg::render_svg;
