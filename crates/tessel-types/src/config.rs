//! Theme manifest -- which tile elements a theme provides and how to cut them.
//!
//! Loaded from `theme.toml` next to the PNG assets it references:
//!
//! ```toml
//! name = "glass"
//!
//! [[tileset]]
//! name = "button"
//! image = "button.png"
//! inner = { x = 8, y = 8, width = 4, height = 4 }
//! radius = { rx = 50, ry = 50 }
//!
//! [[mask]]
//! name = "panel"
//! image = "panel_mask.png"
//! inner = { x = 6, y = 6, width = 2, height = 2 }
//! inset = { left = 0, top = 0, right = 0, bottom = 0 }
//!
//! [[line]]
//! name = "separator"
//! image = "separator.png"
//! orientation = "horizontal"
//! split = [4, 12]
//!
//! [ornament]
//! alpha = 180
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, TesselError};
use crate::geometry::Rect;

/// Root of `theme.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeManifest {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, rename = "tileset")]
    pub tilesets: Vec<TileSetDef>,
    #[serde(default, rename = "mask")]
    pub masks: Vec<MaskDef>,
    #[serde(default, rename = "line")]
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub ornament: Option<OrnamentDef>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

/// The stretchable middle of a template image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InnerDef {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<InnerDef> for Rect {
    fn from(d: InnerDef) -> Self {
        Rect::new(d.x, d.y, d.width, d.height)
    }
}

/// Outline roundness, in percent of the template size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RadiusDef {
    #[serde(default)]
    pub rx: i32,
    #[serde(default)]
    pub ry: i32,
}

/// Signed edge deltas from the drawn rectangle to the content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct InsetDef {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileSetDef {
    pub name: String,
    pub image: PathBuf,
    pub inner: InnerDef,
    #[serde(default)]
    pub radius: RadiusDef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaskDef {
    pub name: String,
    /// Absent for a plain rectangular mask.
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default = "zero_inner")]
    pub inner: InnerDef,
    #[serde(default)]
    pub inset: InsetDef,
    #[serde(default)]
    pub radius: RadiusDef,
}

fn zero_inner() -> InnerDef {
    InnerDef {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineDef {
    pub name: String,
    pub image: PathBuf,
    pub orientation: Orientation,
    /// Start and end of the repeatable middle, along the orientation axis.
    pub split: [i32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrnamentDef {
    #[serde(default = "default_alpha")]
    pub alpha: u8,
}

fn default_alpha() -> u8 {
    255
}

impl Default for OrnamentDef {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

impl ThemeManifest {
    /// Parse and sanity-check a manifest.
    pub fn from_toml(src: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(src)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        let names = self
            .tilesets
            .iter()
            .map(|d| d.name.as_str())
            .chain(self.masks.iter().map(|d| d.name.as_str()))
            .chain(self.lines.iter().map(|d| d.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(TesselError::Config(format!("duplicate element name '{name}'")));
            }
        }
        for def in &self.tilesets {
            if def.inner.width < 0 || def.inner.height < 0 || def.inner.x < 0 || def.inner.y < 0 {
                return Err(TesselError::Config(format!(
                    "tileset '{}' has a negative inner rectangle",
                    def.name
                )));
            }
        }
        for def in &self.lines {
            if def.split[0] < 0 || def.split[1] < def.split[0] {
                return Err(TesselError::Config(format!(
                    "line '{}' split {:?} must satisfy 0 <= start <= end",
                    def.name, def.split
                )));
            }
        }
        Ok(())
    }
}
