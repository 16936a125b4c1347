#![warn(missing_docs)]
//! Core primitives shared across the workspace.

mod color;
mod dimension;

pub use color::PackedColor;
pub use dimension::DimensionId;
