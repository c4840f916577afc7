// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounding-box trimming of signature rasters.
//!
//! A signature is drawn on a surface much larger than the strokes
//! themselves. Trimming crops the raster to the smallest rectangle that
//! still contains every non-transparent pixel.

use image::RgbaImage;

/// Inclusive pixel bounds of the non-transparent region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Grow the box so it covers `(x, y)`.
    fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }
}

/// Scan the raster row by row and return the bounds of every pixel with a
/// nonzero alpha channel, or `None` when the raster is fully transparent.
pub fn bounding_box(image: &RgbaImage) -> Option<BoundingBox> {
    let width = image.width() as usize;
    if width == 0 {
        return None;
    }

    let mut bound: Option<BoundingBox> = None;

    for (index, pixel) in image.as_raw().chunks_exact(4).enumerate() {
        if pixel[3] == 0 {
            continue;
        }

        let x = (index % width) as u32;
        let y = (index / width) as u32;

        match bound.as_mut() {
            // Row-major order: the first hit fixes the top edge.
            None => {
                bound = Some(BoundingBox {
                    top: y,
                    left: x,
                    right: x,
                    bottom: y,
                })
            }
            Some(b) => b.include(x, y),
        }
    }

    bound
}

/// Copy the non-transparent region of `image` into a new raster.
///
/// A fully transparent raster is returned as an untouched copy rather than
/// a zero-sized image.
pub fn trim(image: &RgbaImage) -> RgbaImage {
    match bounding_box(image) {
        Some(bound) => crop(image, &bound),
        None => image.clone(),
    }
}

/// Copy the pixels inside `bound` into a new raster anchored at the origin.
fn crop(image: &RgbaImage, bound: &BoundingBox) -> RgbaImage {
    let mut trimmed = RgbaImage::new(bound.width(), bound.height());
    for y in 0..bound.height() {
        for x in 0..bound.width() {
            let pixel = *image.get_pixel(bound.left + x, bound.top + y);
            trimmed.put_pixel(x, y, pixel);
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    const INK: Rgba<u8> = Rgba([10, 20, 30, 255]);

    #[test]
    fn test_empty_image_has_no_bounds() {
        let image = RgbaImage::new(40, 30);
        assert_eq!(bounding_box(&image), None);
    }

    #[test]
    fn test_trim_empty_returns_original_size() {
        let image = RgbaImage::new(40, 30);
        let trimmed = trim(&image);
        assert_eq!(trimmed.dimensions(), (40, 30));
        assert_eq!(trimmed, image);
    }

    #[test]
    fn test_single_pixel_trims_to_one_by_one() {
        let mut image = RgbaImage::new(50, 50);
        image.put_pixel(17, 33, INK);

        let trimmed = trim(&image);
        assert_eq!(trimmed.dimensions(), (1, 1));
        assert_eq!(*trimmed.get_pixel(0, 0), INK);
    }

    #[test]
    fn test_fully_opaque_trim_is_identity() {
        let image = RgbaImage::from_fn(12, 7, |x, y| Rgba([x as u8, y as u8, 99, 255]));
        assert_eq!(trim(&image), image);
    }

    #[test]
    fn test_bounds_track_extremes() {
        let mut image = RgbaImage::new(100, 100);
        // Lower-left and upper-right points force left/right updates after top is set
        image.put_pixel(60, 10, INK);
        image.put_pixel(5, 80, INK);
        image.put_pixel(90, 40, INK);

        let bound = bounding_box(&image).unwrap();
        assert_eq!(
            bound,
            BoundingBox {
                top: 10,
                left: 5,
                right: 90,
                bottom: 80
            }
        );
        assert_eq!((bound.width(), bound.height()), (86, 71));
    }

    #[test]
    fn test_partial_alpha_counts_as_ink() {
        let mut image = RgbaImage::new(10, 10);
        image.put_pixel(3, 4, Rgba([0, 0, 0, 1]));
        assert_eq!(trim(&image).dimensions(), (1, 1));
    }

    #[test]
    fn test_color_without_alpha_is_ignored() {
        let mut image = RgbaImage::new(10, 10);
        image.put_pixel(3, 4, Rgba([255, 255, 255, 0]));
        assert_eq!(bounding_box(&image), None);
    }

    #[test]
    fn test_trim_preserves_pixel_content() {
        let mut image = RgbaImage::new(20, 20);
        image.put_pixel(4, 6, Rgba([1, 2, 3, 255]));
        image.put_pixel(8, 9, Rgba([4, 5, 6, 128]));

        let trimmed = trim(&image);
        assert_eq!(trimmed.dimensions(), (5, 4));
        assert_eq!(*trimmed.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(*trimmed.get_pixel(4, 3), Rgba([4, 5, 6, 128]));
        assert_eq!(*trimmed.get_pixel(4, 0), Rgba([0, 0, 0, 0]));
    }

    proptest! {
        /// Trimming never grows the raster and always keeps every inked pixel.
        #[test]
        fn trim_bounds_cover_all_ink(
            width in 1u32..48,
            height in 1u32..48,
            points in prop::collection::vec((0u32..48, 0u32..48), 0..12),
        ) {
            let mut image = RgbaImage::new(width, height);
            let inked: Vec<(u32, u32)> = points
                .into_iter()
                .filter(|&(x, y)| x < width && y < height)
                .collect();
            for &(x, y) in &inked {
                image.put_pixel(x, y, INK);
            }

            let trimmed = trim(&image);
            prop_assert!(trimmed.width() <= width);
            prop_assert!(trimmed.height() <= height);

            match bounding_box(&image) {
                None => {
                    prop_assert!(inked.is_empty());
                    prop_assert_eq!(trimmed.dimensions(), (width, height));
                }
                Some(bound) => {
                    let min_x = inked.iter().map(|p| p.0).min().unwrap();
                    let max_x = inked.iter().map(|p| p.0).max().unwrap();
                    let min_y = inked.iter().map(|p| p.1).min().unwrap();
                    let max_y = inked.iter().map(|p| p.1).max().unwrap();
                    prop_assert_eq!(bound, BoundingBox { top: min_y, left: min_x, right: max_x, bottom: max_y });
                    let ink_count = trimmed.pixels().filter(|p| p[3] != 0).count();
                    let mut unique = inked.clone();
                    unique.sort_unstable();
                    unique.dedup();
                    prop_assert_eq!(ink_count, unique.len());
                }
            }
        }
    }
}
