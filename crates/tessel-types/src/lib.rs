//! Foundation types and traits for tessel.
//!
//! This crate contains the backend-agnostic pieces shared by all tessel
//! crates: colors, integer geometry and clip regions, RGBA rasters, paint
//! sources, position flags, the drawing traits backends implement, the theme
//! manifest format, and the error type.

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod flags;
pub mod geometry;
pub mod image;
pub mod paint;

pub use backend::{Canvas, TileBackend};
pub use color::Color;
pub use error::{Result, TesselError};
pub use flags::PosFlags;
pub use geometry::{Point, Rect, Region, Size};
pub use image::Image;
pub use paint::{LinearGradient, Paint};
