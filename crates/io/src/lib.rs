use anyhow::{bail, Context, Result};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use types::{FrameSet, RasterFrame, MAX_ICO_SIZE};

/// Read a vector source document as text.
pub fn read_vector_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read vector source {}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Encode every frame as a PNG-compressed ICO entry, keeping frame order.
pub fn encode_icon(frames: &FrameSet) -> Result<IconDir> {
    if frames.is_empty() {
        bail!("cannot build an icon without frames");
    }
    let mut dir = IconDir::new(ResourceType::Icon);
    for frame in frames {
        let size = frame.size();
        if size > MAX_ICO_SIZE {
            bail!("{size}x{size} frame exceeds the {MAX_ICO_SIZE}px ICO limit");
        }
        let image = IconImage::from_rgba_data(size, size, frame.image().as_raw().clone());
        let entry = IconDirEntry::encode_as_png(&image)
            .with_context(|| format!("failed to encode {size}x{size} icon entry"))?;
        debug!("encoded {size}x{size} icon entry");
        dir.add_entry(entry);
    }
    Ok(dir)
}

/// Write `frames` as a multi-resolution icon, replacing any existing file.
/// Frames are encoded before the destination is opened, so a rejected set
/// leaves the filesystem untouched.
pub fn write_icon(path: &Path, frames: &FrameSet) -> Result<()> {
    let dir = encode_icon(frames)?;
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    dir.write(&mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("failed to write icon {}", path.display()))?;
    info!("wrote {} ({} frames)", path.display(), frames.len());
    Ok(())
}

fn read_icon_dir(path: &Path) -> Result<IconDir> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    IconDir::read(file).with_context(|| format!("failed to read icon {}", path.display()))
}

/// `(width, height)` of every entry in an icon file, in file order.
pub fn read_icon_dimensions(path: &Path) -> Result<Vec<(u32, u32)>> {
    let dir = read_icon_dir(path)?;
    Ok(dir.entries().iter().map(|e| (e.width(), e.height())).collect())
}

/// Decode every entry of an icon file back into frames.
pub fn read_icon_frames(path: &Path) -> Result<Vec<RasterFrame>> {
    let dir = read_icon_dir(path)?;
    let mut frames = Vec::with_capacity(dir.entries().len());
    for entry in dir.entries() {
        let image = entry
            .decode()
            .with_context(|| format!("failed to decode {}x{} entry", entry.width(), entry.height()))?;
        let rgba = RgbaImage::from_raw(image.width(), image.height(), image.rgba_data().to_vec())
            .context("icon entry has an inconsistent pixel buffer")?;
        frames.push(RasterFrame::new(rgba)?);
    }
    Ok(frames)
}

/// Save one frame as a standalone PNG, replacing any existing file.
pub fn export_png(path: &Path, frame: &RasterFrame) -> Result<()> {
    ensure_parent_dir(path)?;
    frame
        .image()
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {} ({}x{})", path.display(), frame.size(), frame.size());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use types::ICON_SIZES;

    fn solid_set(sizes: &[u32]) -> FrameSet {
        let mut set = FrameSet::new();
        for &size in sizes {
            let img = RgbaImage::from_pixel(size, size, Rgba([10, 20, 30, 255]));
            set.push(RasterFrame::new(img).unwrap()).unwrap();
        }
        set
    }

    #[test]
    fn test_encode_keeps_order() {
        let dir = encode_icon(&solid_set(&ICON_SIZES)).unwrap();
        let dims: Vec<(u32, u32)> = dir.entries().iter().map(|e| (e.width(), e.height())).collect();
        assert_eq!(dims, vec![(16, 16), (32, 32), (48, 48), (64, 64), (128, 128), (256, 256)]);
    }

    #[test]
    fn test_encode_uses_png_for_every_size() {
        let dir = encode_icon(&solid_set(&ICON_SIZES)).unwrap();
        for entry in dir.entries() {
            assert!(entry.is_png(), "{}x{} entry is not PNG", entry.width(), entry.height());
        }
    }

    #[test]
    fn test_encode_rejects_empty() {
        assert!(encode_icon(&FrameSet::new()).is_err());
    }

    #[test]
    fn test_encode_rejects_oversized() {
        assert!(encode_icon(&solid_set(&[16, 512])).is_err());
    }

    #[test]
    fn test_rejected_set_does_not_create_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("favicon.ico");
        assert!(write_icon(&out, &FrameSet::new()).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_read_vector_source_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_vector_source(&tmp.path().join("nope.svg")).unwrap_err();
        assert!(err.to_string().contains("nope.svg"));
    }
}
