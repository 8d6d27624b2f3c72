use std::sync::Arc;

use log::debug;
use resvg::tiny_skia::Transform;
use resvg::usvg::{Options, Tree};
use types::{FrameSet, RasterFrame};

use crate::{canvas, pixmap_to_frame, RenderError};

/// A parsed SVG document, rasterized on demand at any square size.
pub struct VectorSource {
    tree: Tree,
}

impl VectorSource {
    /// Parse SVG markup. System fonts are loaded so `<text>` elements render.
    pub fn parse(text: &str) -> Result<Self, RenderError> {
        let mut opt = Options::default();
        Arc::make_mut(&mut opt.fontdb).load_system_fonts();
        let tree = Tree::from_str(text, &opt)?;
        let size = tree.size();
        debug!("parsed vector source: {} x {}", size.width(), size.height());
        Ok(Self { tree })
    }

    /// Intrinsic `(width, height)` of the document in user units.
    pub fn intrinsic_size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    /// Render at exactly `size` x `size`, stretching each axis independently.
    pub fn rasterize(&self, size: u32) -> Result<RasterFrame, RenderError> {
        let mut pixmap = canvas(size)?;
        let (w, h) = self.intrinsic_size();
        let transform = Transform::from_scale(size as f32 / w, size as f32 / h);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        debug!("rasterized vector source at {size}x{size}");
        pixmap_to_frame(&pixmap)
    }

    pub fn rasterize_all(&self, sizes: &[u32]) -> Result<FrameSet, RenderError> {
        let mut frames = FrameSet::new();
        for &size in sizes {
            frames.push(self.rasterize(size)?)?;
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
        <rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn test_parse_reports_intrinsic_size() {
        let src = VectorSource::parse(SQUARE).unwrap();
        assert_eq!(src.intrinsic_size(), (10.0, 10.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            VectorSource::parse("this is not svg"),
            Err(RenderError::Svg(_))
        ));
    }

    #[test]
    fn test_rasterize_zero_is_rejected() {
        let src = VectorSource::parse(SQUARE).unwrap();
        assert!(matches!(src.rasterize(0), Err(RenderError::InvalidSize(0))));
    }

    #[test]
    fn test_rasterize_fills_whole_canvas() {
        let src = VectorSource::parse(SQUARE).unwrap();
        let frame = src.rasterize(48).unwrap();
        assert_eq!(frame.dimensions(), (48, 48));
        assert_eq!(frame.image().get_pixel(24, 24).0, [255, 0, 0, 255]);
        assert_eq!(frame.image().get_pixel(0, 47).0, [255, 0, 0, 255]);
    }
}
