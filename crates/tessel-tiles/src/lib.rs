//! tessel-tiles: nine-slice tile compositing.
//!
//! A small template image is cut once into a 3x3 grid ([`TileTemplate`]) and
//! then drawn at any size: corners stay fixed, edges and the center repeat.
//! The same layout routine ([`render_tiles`]) drives every backend through
//! the [`TileBackend`](tessel_types::TileBackend) trait, whether it blends
//! onto a canvas or copies into a retained [`Picture`].
//!
//! On top of that sit [`TileSet`] (frames and outlines), [`TileMask`]
//! (recoloring any paint through a template's alpha), [`LineTemplate`]
//! (three-piece strips), [`CornerOrnament`] (generated corner glyphs with
//! cached connectors), and [`TileTheme`] (loading all of them from a
//! manifest).

pub mod line;
pub mod mask;
pub mod ornament;
pub mod picture;
pub mod render;
pub mod template;
pub mod theme;
pub mod tileset;

#[cfg(test)]
pub(crate) mod test_utils;

pub use line::LineTemplate;
pub use mask::{Inset, MaskOptions, TileMask};
pub use ornament::{ConnectorEdge, CornerOrnament, StripCache};
pub use picture::{Picture, PictureBuilder};
pub use render::{TileLayout, fit_pair, render_tiles};
pub use template::{Borders, RadiusHint, Slice, SliceGrid, SlicePos, TileTemplate};
pub use theme::TileTheme;
pub use tileset::TileSet;
