//! Software raster backend for tessel.
//!
//! [`RasterSurface`] is the immediate-mode target: tile sets, masks, lines
//! and ornaments draw straight into its RGBA buffer.

mod surface;

pub use surface::RasterSurface;
