// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signature image files.
//!
//! This module loads signature images from disk into RGBA rasters and
//! writes rasters back out as PNG files.

use crate::io::encoding;
use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;

/// Load an image file into an RGBA raster.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let image = encoding::decode_image(&bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image)
}

/// Write a raster to `path` as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let png = encoding::encode_png(image)?;
    std::fs::write(path, png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signature.png");
        let image = RgbaImage::from_fn(6, 3, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));

        save_png(&image, &path).unwrap();
        assert_eq!(load_image(&path).unwrap(), image);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_image(Path::new("/nonexistent/signature.png")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/signature.png"));
    }
}
