//! Themes: every tile element of a look, built from a manifest directory.
//!
//! A theme directory holds `theme.toml` plus the PNG templates it names.
//! [`TileTheme::load`] cuts every element once; [`TileTheme::reload`] rebuilds
//! them from disk and empties the ornament strip cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tessel_types::backend::Canvas;
use tessel_types::config::ThemeManifest;
use tessel_types::error::{Result, TesselError};
use tessel_types::flags::PosFlags;
use tessel_types::geometry::Rect;
use tessel_types::image::Image;

use crate::line::LineTemplate;
use crate::mask::{Inset, TileMask};
use crate::ornament::{CornerOrnament, StripCache};
use crate::template::RadiusHint;
use crate::tileset::TileSet;

/// File name of the manifest inside a theme directory.
pub const MANIFEST_FILE: &str = "theme.toml";

/// The elements a theme provides, built and ready to render.
#[derive(Debug)]
pub struct TileTheme {
    dir: PathBuf,
    manifest: ThemeManifest,
    sets: HashMap<String, TileSet>,
    masks: HashMap<String, TileMask>,
    lines: HashMap<String, LineTemplate>,
    ornament: CornerOrnament,
    strips: StripCache,
}

/// Everything rebuilt on (re)load.
struct Elements {
    sets: HashMap<String, TileSet>,
    masks: HashMap<String, TileMask>,
    lines: HashMap<String, LineTemplate>,
    ornament: CornerOrnament,
}

impl TileTheme {
    /// Load `dir/theme.toml` and build every element it lists.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let manifest = read_manifest(&dir)?;
        Self::from_manifest(dir, manifest)
    }

    /// Build from an already parsed manifest. Image paths resolve against `dir`.
    pub fn from_manifest(dir: impl Into<PathBuf>, manifest: ThemeManifest) -> Result<Self> {
        let dir = dir.into();
        let elements = build(&dir, &manifest)?;
        log::info!(
            "Loaded theme '{}' from {}: {} tilesets, {} masks, {} lines",
            manifest.name,
            dir.display(),
            elements.sets.len(),
            elements.masks.len(),
            elements.lines.len()
        );
        Ok(Self {
            dir,
            manifest,
            sets: elements.sets,
            masks: elements.masks,
            lines: elements.lines,
            ornament: elements.ornament,
            strips: StripCache::new(),
        })
    }

    /// Re-read the manifest and assets from disk.
    ///
    /// On error the theme is left untouched.
    pub fn reload(&mut self) -> Result<()> {
        let manifest = read_manifest(&self.dir)?;
        let elements = build(&self.dir, &manifest)?;
        self.sets = elements.sets;
        self.masks = elements.masks;
        self.lines = elements.lines;
        self.ornament = elements.ornament;
        self.manifest = manifest;
        self.strips.reset();
        log::info!("Reloaded theme '{}'", self.manifest.name);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &ThemeManifest {
        &self.manifest
    }

    pub fn tileset(&self, name: &str) -> Option<&TileSet> {
        self.sets.get(name)
    }

    pub fn mask(&self, name: &str) -> Option<&TileMask> {
        self.masks.get(name)
    }

    pub fn line(&self, name: &str) -> Option<&LineTemplate> {
        self.lines.get(name)
    }

    pub fn require_tileset(&self, name: &str) -> Result<&TileSet> {
        self.tileset(name)
            .ok_or_else(|| TesselError::Theme(format!("no tileset named '{name}'")))
    }

    pub fn require_mask(&self, name: &str) -> Result<&TileMask> {
        self.mask(name)
            .ok_or_else(|| TesselError::Theme(format!("no mask named '{name}'")))
    }

    pub fn require_line(&self, name: &str) -> Result<&LineTemplate> {
        self.line(name)
            .ok_or_else(|| TesselError::Theme(format!("no line named '{name}'")))
    }

    pub fn ornament(&self) -> &CornerOrnament {
        &self.ornament
    }

    pub fn strip_cache(&self) -> &StripCache {
        &self.strips
    }

    /// Draw the theme's corner ornament, caching connector strips in the theme.
    pub fn render_ornament<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        rect: Rect,
        flags: PosFlags,
    ) -> Result<()> {
        self.ornament.render(canvas, rect, flags, &mut self.strips)
    }
}

fn read_manifest(dir: &Path) -> Result<ThemeManifest> {
    let path = dir.join(MANIFEST_FILE);
    let src = std::fs::read_to_string(&path)
        .map_err(|e| TesselError::Theme(format!("{}: {e}", path.display())))?;
    ThemeManifest::from_toml(&src)
}

fn load_image(dir: &Path, rel: &Path) -> Result<Image> {
    let path = dir.join(rel);
    Image::load_png(&path).map_err(|e| TesselError::Theme(format!("{}: {e}", path.display())))
}

fn build(dir: &Path, manifest: &ThemeManifest) -> Result<Elements> {
    let mut sets = HashMap::new();
    for def in &manifest.tilesets {
        let image = load_image(dir, &def.image)?;
        let radius = RadiusHint::new(def.radius.rx, def.radius.ry);
        sets.insert(def.name.clone(), TileSet::new(&image, def.inner.into(), radius));
    }

    let mut masks = HashMap::new();
    for def in &manifest.masks {
        let image = match &def.image {
            Some(rel) => load_image(dir, rel)?,
            None => Image::null(),
        };
        let inset = Inset::new(def.inset.left, def.inset.top, def.inset.right, def.inset.bottom);
        let radius = RadiusHint::new(def.radius.rx, def.radius.ry);
        masks.insert(
            def.name.clone(),
            TileMask::new(&image, def.inner.into(), inset, radius),
        );
    }

    let mut lines = HashMap::new();
    for def in &manifest.lines {
        let image = load_image(dir, &def.image)?;
        let [start, end] = def.split;
        lines.insert(
            def.name.clone(),
            LineTemplate::new(&image, def.orientation, start, end),
        );
    }

    let alpha = manifest.ornament.unwrap_or_default().alpha;
    Ok(Elements {
        sets,
        masks,
        lines,
        ornament: CornerOrnament::new(alpha),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_types::config::{InnerDef, MaskDef};

    #[test]
    fn imageless_mask_needs_no_files() {
        let manifest = ThemeManifest {
            name: "flat".into(),
            tilesets: Vec::new(),
            masks: vec![MaskDef {
                name: "panel".into(),
                image: None,
                inner: InnerDef {
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 0,
                },
                inset: Default::default(),
                radius: Default::default(),
            }],
            lines: Vec::new(),
            ornament: None,
        };
        let theme = TileTheme::from_manifest("/nonexistent", manifest).unwrap();
        assert_eq!(theme.name(), "flat");
        assert!(!theme.require_mask("panel").unwrap().has_corners());
        assert_eq!(theme.ornament().alpha(), 255);
    }

    #[test]
    fn missing_elements_are_theme_errors() {
        let manifest = ThemeManifest::from_toml("name = \"empty\"").unwrap();
        let theme = TileTheme::from_manifest(".", manifest).unwrap();
        assert!(matches!(
            theme.require_tileset("button"),
            Err(TesselError::Theme(_))
        ));
        assert!(theme.require_line("rule").is_err());
        assert!(theme.line("rule").is_none());
    }

    #[test]
    fn missing_manifest_reports_path() {
        let err = TileTheme::load("/definitely/not/here").unwrap_err();
        assert!(err.to_string().contains("theme.toml"));
    }
}
