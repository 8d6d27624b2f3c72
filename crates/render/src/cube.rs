//! Procedural cube illustration drawn with 2D primitives.
//!
//! Everything is a pure function of the requested size: proportions are fixed
//! fractions of it, colours are constants, anti-aliasing is off and shapes are
//! written over the canvas instead of blended.
//!
//! Geometry is in pixel-centre coordinates: `(x, y)` names the middle of pixel
//! `x, y`, and dot boxes include their last row and column.

use log::debug;
use resvg::tiny_skia::{
    BlendMode, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};
use types::{FrameSet, RasterFrame};

use crate::{canvas, pixmap_to_frame, RenderError};

pub type Point = (f32, f32);

pub const PRIMARY: [u8; 4] = [59, 130, 246, 200];
pub const SECONDARY: [u8; 4] = [29, 78, 216, 150];
pub const OUTLINE: [u8; 4] = [59, 130, 246, 255];
pub const DOT: [u8; 4] = [255, 255, 255, 180];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f32,
}

impl Dot {
    /// Inclusive pixel box `[left, top, right, bottom]` the ellipse is inscribed in.
    pub fn bounds(&self) -> [f32; 4] {
        let (cx, cy) = self.center;
        let r = self.radius;
        [cx - r, cy - r, cx + r, cy + r]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CubeGeometry {
    pub size: u32,
    pub top: [Point; 4],
    pub left: [Point; 4],
    pub right: [Point; 4],
    /// Top, left and right face dots.
    pub dots: [Dot; 3],
}

impl CubeGeometry {
    pub fn for_size(size: u32) -> Result<Self, RenderError> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        let center = (size / 2) as f32;
        let cube = f64::from(size) * 0.6;
        let third = (cube / 3.0).floor() as f32;
        let sixth = (cube / 6.0).floor() as f32;

        let top_y = center - third;
        let bottom_y = center + third;
        let left_x = center - third;
        let right_x = center + third;
        let shoulder = center - sixth;
        let foot = bottom_y + sixth;

        let radius = (size / 16).max(1) as f32;
        let step8 = (size / 8) as f32;
        let step12 = (size / 12) as f32;

        Ok(Self {
            size,
            top: [
                (center, top_y),
                (right_x, shoulder),
                (center, center),
                (left_x, shoulder),
            ],
            left: [
                (center, center),
                (left_x, shoulder),
                (left_x, foot),
                (center, bottom_y),
            ],
            right: [
                (center, center),
                (right_x, shoulder),
                (right_x, foot),
                (center, bottom_y),
            ],
            dots: [
                Dot { center: (center, top_y + step8), radius },
                Dot { center: (left_x + step12, center + step12), radius },
                Dot { center: (right_x - step12, center + step12), radius },
            ],
        })
    }

    /// Faces in drawing order with their fill colours.
    pub fn faces(&self) -> [(&[Point; 4], [u8; 4]); 3] {
        [
            (&self.top, PRIMARY),
            (&self.left, SECONDARY),
            (&self.right, PRIMARY),
        ]
    }
}

fn paint(rgba: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::Source;
    paint
}

fn polygon(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for p in rest {
        pb.line_to(p.0, p.1);
    }
    pb.close();
    pb.finish()
}

/// Maps pixel-centre coordinates onto tiny-skia's pixel-corner grid.
fn pixel_centres() -> Transform {
    Transform::from_translate(0.5, 0.5)
}

fn ellipse(dot: &Dot) -> Option<Path> {
    let [l, t, r, b] = dot.bounds();
    // Outer edges of the boxed pixels, already on the corner grid.
    PathBuilder::from_oval(Rect::from_ltrb(l, t, r + 1.0, b + 1.0)?)
}

fn draw(pixmap: &mut Pixmap, geometry: &CubeGeometry) {
    let outline = paint(OUTLINE);
    let stroke = Stroke { width: 1.0, ..Stroke::default() };
    let centred = pixel_centres();

    for (points, fill) in geometry.faces() {
        let Some(path) = polygon(points) else {
            debug!("skipping degenerate face at {}px", geometry.size);
            continue;
        };
        pixmap.fill_path(&path, &paint(fill), FillRule::Winding, centred, None);
        pixmap.stroke_path(&path, &outline, &stroke, centred, None);
    }

    let dot_paint = paint(DOT);
    for dot in &geometry.dots {
        match ellipse(dot) {
            Some(path) => {
                pixmap.fill_path(&path, &dot_paint, FillRule::Winding, Transform::identity(), None);
            }
            None => debug!("skipping degenerate dot at {}px", geometry.size),
        }
    }
}

/// Draw the cube on a transparent `size` x `size` canvas.
pub fn draw_cube(size: u32) -> Result<RasterFrame, RenderError> {
    let geometry = CubeGeometry::for_size(size)?;
    let mut pixmap = canvas(size)?;
    draw(&mut pixmap, &geometry);
    debug!("drew cube at {size}x{size}");
    pixmap_to_frame(&pixmap)
}

pub fn draw_all(sizes: &[u32]) -> Result<FrameSet, RenderError> {
    let mut frames = FrameSet::new();
    for &size in sizes {
        frames.push(draw_cube(size)?)?;
    }
    Ok(frames)
}
