use image::{Rgba, RgbaImage};
use resvg::tiny_skia::Pixmap;
use thiserror::Error;
use types::{FrameError, RasterFrame};

pub mod cube;
pub mod vector;

pub use cube::{draw_all, draw_cube, CubeGeometry};
pub use vector::VectorSource;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("icon size must be positive, got {0}")]
    InvalidSize(u32),
    #[error("failed to parse vector source: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("failed to allocate a {0}x{0} canvas")]
    Canvas(u32),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Allocates a transparent square canvas.
pub(crate) fn canvas(size: u32) -> Result<Pixmap, RenderError> {
    if size == 0 {
        return Err(RenderError::InvalidSize(0));
    }
    Pixmap::new(size, size).ok_or(RenderError::Canvas(size))
}

/// tiny-skia stores premultiplied RGBA; frames carry straight alpha.
pub(crate) fn pixmap_to_frame(pixmap: &Pixmap) -> Result<RasterFrame, RenderError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut img = RgbaImage::new(width, height);
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(RasterFrame::new(img)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rejects_zero() {
        assert!(matches!(canvas(0), Err(RenderError::InvalidSize(0))));
    }

    #[test]
    fn test_pixmap_to_frame_demultiplies() {
        let mut pixmap = canvas(4).unwrap();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(200, 100, 50, 128));
        let frame = pixmap_to_frame(&pixmap).unwrap();
        assert_eq!(frame.dimensions(), (4, 4));
        let px = frame.image().get_pixel(1, 1);
        assert_eq!(px[3], 128);
        // Premultiplication rounds, so allow a one-step drift per channel.
        assert!((px[0] as i32 - 200).abs() <= 2);
        assert!((px[1] as i32 - 100).abs() <= 2);
        assert!((px[2] as i32 - 50).abs() <= 2);
    }
}
