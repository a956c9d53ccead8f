//! Nine-slice layout checked pixel by pixel on the software surface.

use proptest::prelude::*;

use tessel_raster::RasterSurface;
use tessel_tiles::{RadiusHint, TileSet};
use tessel_types::{Color, Image, Point, PosFlags, Rect, Result, Size, TileBackend};

/// 30x30 opaque template where every pixel is distinct; 10 px bands.
fn source() -> Image {
    Image::from_fn(30, 30, |x, y| Color::rgb(x as u8 * 8, y as u8 * 8, 100))
}

fn set() -> TileSet {
    TileSet::new(&source(), Rect::new(10, 10, 10, 10), RadiusHint::default())
}

fn render(w: i32, h: i32, flags: PosFlags) -> RasterSurface {
    let mut surface = RasterSurface::new(w.max(0) as u32, h.max(0) as u32);
    set().render(&mut surface, Rect::new(0, 0, w, h), flags).unwrap();
    surface
}

/// Counts backend calls without drawing.
#[derive(Default)]
struct Counter {
    blits: Vec<(Rect, Point)>,
    tiled: Vec<Rect>,
}

impl TileBackend for Counter {
    fn blit(&mut self, _image: &Image, src: Rect, dst: Point) -> Result<()> {
        self.blits.push((src, dst));
        Ok(())
    }

    fn tiled_blit(&mut self, _image: &Image, dst: Rect, _offset: Point) -> Result<()> {
        self.tiled.push(dst);
        Ok(())
    }
}

#[test]
fn corners_are_copied_unscaled() {
    let src = source();
    let out = render(57, 43, PosFlags::FULL);
    for j in 0..10 {
        for i in 0..10 {
            assert_eq!(out.pixel(i, j), src.pixel(i, j));
            assert_eq!(out.pixel(47 + i, j), src.pixel(20 + i, j));
            assert_eq!(out.pixel(i, 33 + j), src.pixel(i, 20 + j));
            assert_eq!(out.pixel(47 + i, 33 + j), src.pixel(20 + i, 20 + j));
        }
    }
}

#[test]
fn edges_and_center_tile_without_stretching() {
    let src = source();
    let out = render(57, 43, PosFlags::FULL);
    // Top edge repeats source columns 10..20.
    for x in 10..47 {
        assert_eq!(out.pixel(x, 4), src.pixel(10 + (x - 10) % 10, 4));
    }
    // Center repeats the inner square in both directions.
    assert_eq!(out.pixel(31, 25), src.pixel(11, 15));
    // Bottom edge keeps the source's bottom rows.
    assert_eq!(out.pixel(20, 42), src.pixel(10, 29));
}

#[test]
fn overlap_splits_by_floor_rule() {
    let src = source();
    let out = render(15, 15, PosFlags::RING);
    // Left/top corners keep 7 leading pixels, right/bottom keep 8 trailing.
    assert_eq!(out.pixel(6, 0), src.pixel(6, 0));
    assert_eq!(out.pixel(7, 0), src.pixel(22, 0));
    assert_eq!(out.pixel(14, 14), src.pixel(29, 29));
    assert_eq!(out.pixel(0, 7), src.pixel(0, 22));
}

#[test]
fn exact_fit_has_no_interior_draws() {
    let mut counter = Counter::default();
    set().render(&mut counter, Rect::new(0, 0, 20, 20), PosFlags::FULL).unwrap();
    assert_eq!(counter.blits.len(), 4);
    assert!(counter.tiled.is_empty());
}

#[test]
fn omitted_sides_leave_pixels_untouched() {
    let top = render(40, 40, PosFlags::TOP);
    let ring = render(40, 40, PosFlags::RING);
    for y in 0..40 {
        for x in 0..40 {
            let px = top.pixel(x, y);
            if y < 10 {
                assert_eq!(px.a, 255);
            } else {
                assert_eq!(px, Color::TRANSPARENT);
            }
        }
    }
    // The ring also paints the whole top band, plus more.
    assert_eq!(ring.pixel(20, 5).a, 255);
    assert_eq!(ring.pixel(20, 20), Color::TRANSPARENT);
    assert_eq!(ring.pixel(5, 20).a, 255);
}

#[test]
fn ring_calls_superset_of_top_calls() {
    let mut top = Counter::default();
    let mut ring = Counter::default();
    let r = Rect::new(3, 4, 70, 50);
    set().render(&mut top, r, PosFlags::TOP).unwrap();
    set().render(&mut ring, r, PosFlags::RING).unwrap();
    // Top alone stretches its edge over the full width; the ring draws the
    // same band as corners plus a narrower edge.
    assert_eq!(top.tiled, vec![Rect::new(3, 4, 70, 10)]);
    assert!(ring.tiled.contains(&Rect::new(13, 4, 50, 10)));
    assert!(ring.blits.len() + ring.tiled.len() > top.blits.len() + top.tiled.len());
}

#[test]
fn picture_matches_surface_for_opaque_template() {
    let pic = set().render_picture(Size::new(33, 28), PosFlags::FULL).unwrap();
    let out = render(33, 28, PosFlags::FULL);
    assert_eq!(pic.image(), &out.to_image().unwrap());
}

proptest! {
    #[test]
    fn rendering_is_deterministic(w in 0i32..70, h in 0i32..70, bits in 0u8..32) {
        let flags = PosFlags::from_bits_truncate(bits);
        let a = render(w, h, flags);
        let b = render(w, h, flags);
        prop_assert_eq!(a.buffer(), b.buffer());
    }

    #[test]
    fn shrunk_corners_cover_the_target(w in 1i32..20, h in 1i32..20) {
        // Every pixel of an undersized ring is covered exactly by corners.
        let out = render(w, h, PosFlags::RING);
        for y in 0..h {
            for x in 0..w {
                prop_assert_eq!(out.pixel(x, y).a, 255);
            }
        }
    }
}
