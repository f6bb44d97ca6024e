//! Layout engine for placing symbols
//!
//! This module takes module matrices and their shared geometry and
//! computes where each symbol goes, producing a LayoutResult that can be
//! turned into a node tree or serialized to SVG.

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use config::LayoutConfig;
pub use engine::compute;
pub use error::LayoutError;
pub use types::*;
