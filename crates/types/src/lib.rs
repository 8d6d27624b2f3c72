use image::RgbaImage;
use thiserror::Error;

/// Side lengths requested by both pipelines, smallest first.
pub const ICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Frame exported as the standalone reference PNG.
pub const REFERENCE_SIZE: u32 = 128;

/// Largest side an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame has zero size")]
    Empty,
    #[error("frame is not square: {width}x{height}")]
    NotSquare { width: u32, height: u32 },
    #[error("frame sizes must be strictly increasing: {next} after {previous}")]
    OutOfOrder { previous: u32, next: u32 },
}

/// A square RGBA pixel grid (straight alpha) tagged with its side length.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFrame {
    size: u32,
    image: RgbaImage,
}

impl RasterFrame {
    pub fn new(image: RgbaImage) -> Result<Self, FrameError> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(FrameError::NotSquare { width, height });
        }
        if width == 0 {
            return Err(FrameError::Empty);
        }
        Ok(Self { size: width, image })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.size, self.size)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Frames awaiting assembly, kept in strictly increasing size order.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    frames: Vec<RasterFrame>,
}

impl FrameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: RasterFrame) -> Result<(), FrameError> {
        if let Some(last) = self.frames.last() {
            if frame.size() <= last.size() {
                return Err(FrameError::OutOfOrder {
                    previous: last.size(),
                    next: frame.size(),
                });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RasterFrame> {
        self.frames.iter()
    }

    pub fn get(&self, size: u32) -> Option<&RasterFrame> {
        self.frames.iter().find(|f| f.size() == size)
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.frames.iter().map(RasterFrame::size).collect()
    }

    /// `(width, height)` of every frame, in order.
    pub fn dimensions(&self) -> Vec<(u32, u32)> {
        self.frames.iter().map(RasterFrame::dimensions).collect()
    }

    /// True when the set holds exactly one frame per entry of [`ICON_SIZES`].
    pub fn is_complete(&self) -> bool {
        self.sizes() == ICON_SIZES
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a RasterFrame;
    type IntoIter = std::slice::Iter<'a, RasterFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Formats dimensions as `[(16, 16), (32, 32)]` for the confirmation line.
pub fn format_dimensions(dims: &[(u32, u32)]) -> String {
    let parts: Vec<String> = dims.iter().map(|(w, h)| format!("({}, {})", w, h)).collect();
    format!("[{}]", parts.join(", "))
}
