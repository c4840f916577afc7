// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signature capture surface.
//!
//! The surface owns an RGBA raster that pointer strokes are painted onto in
//! immediate mode. It can be cleared, checked for emptiness, resumed from a
//! previously exported image, and exported as a PNG data URI either whole
//! or trimmed to the drawn strokes.

use crate::error::{EncodeError, SurfaceError};
use crate::io::encoding;
use crate::models::history::History;
use crate::models::stroke::{Pen, Point};
use crate::util::geometry::{clip_line, line_pixels, pixel_of, PixelRect};
use crate::util::trim::{self, BoundingBox};
use image::{Rgba, RgbaImage};

/// Number of undo states kept when no explicit depth is given.
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Surface size used when none is configured.
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 200;

/// Largest width or height a surface may have.
pub const MAX_DIMENSION: u32 = 4096;

/// Freehand drawing surface for a single capture session.
#[derive(Debug, Clone)]
pub struct SignatureSurface {
    image: RgbaImage,
    pen: Pen,
    /// Last painted pixel of the stroke in progress
    last_pixel: Option<(i64, i64)>,
    history: History,
}

impl Default for SignatureSurface {
    fn default() -> Self {
        Self {
            image: RgbaImage::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            pen: Pen::default(),
            last_pixel: None,
            history: History::new(DEFAULT_HISTORY_DEPTH),
        }
    }
}

impl SignatureSurface {
    /// Create a transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbaImage::new(width, height),
            pen: Pen::default(),
            last_pixel: None,
            history: History::new(DEFAULT_HISTORY_DEPTH),
        })
    }

    /// Keep at most `depth` undo states, dropping any recorded so far.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = History::new(depth);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Current committed pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    /// True while a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        self.last_pixel.is_some()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.end_stroke();
        // Clearing a blank surface is not worth an undo step
        if !self.is_empty() {
            self.history.push(self.image.clone());
        }
        self.wipe();
    }

    /// True iff every pixel's alpha channel is zero.
    pub fn is_empty(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    /// Replace the surface contents with a previously exported image.
    ///
    /// Malformed input leaves the surface untouched; the failure is only
    /// logged so a bad resume payload never blocks new signing.
    pub fn load_from(&mut self, encoded: &str) {
        match encoding::decode_data_uri(encoded) {
            Ok(decoded) => self.paint_image(&decoded),
            Err(e) => log::warn!("Ignoring unreadable signature image: {}", e),
        }
    }

    /// Replace the surface contents with `source`, anchored at the origin and
    /// clipped to the surface bounds.
    pub fn paint_image(&mut self, source: &RgbaImage) {
        self.end_stroke();
        self.history.push(self.image.clone());
        self.wipe();

        let width = source.width().min(self.width());
        let height = source.height().min(self.height());
        for y in 0..height {
            for x in 0..width {
                self.image.put_pixel(x, y, *source.get_pixel(x, y));
            }
        }
        log::debug!("Painted {}x{} image onto surface", width, height);
    }

    /// Start a stroke at `point`, painting a single dab.
    pub fn begin_stroke(&mut self, point: Point) {
        self.history.push(self.image.clone());
        let pixel = pixel_of(&point);
        self.dab(pixel);
        self.last_pixel = Some(pixel);
    }

    /// Extend the stroke in progress to `point`.
    ///
    /// Without a stroke in progress this starts one. Only the part of the
    /// segment a dab can reach from is rasterized.
    pub fn stroke_to(&mut self, point: Point) {
        let pixel = pixel_of(&point);
        let Some(last) = self.last_pixel else {
            self.begin_stroke(point);
            return;
        };
        if let Some((from, to)) = clip_line(last, pixel, &self.reach()) {
            for p in line_pixels(from, to) {
                self.dab(p);
            }
        }
        self.last_pixel = Some(pixel);
    }

    /// Finish the stroke in progress, if any.
    pub fn end_stroke(&mut self) {
        self.last_pixel = None;
    }

    /// Paint a full stroke through `points`.
    pub fn draw_stroke(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_stroke(*first);
        for point in rest {
            self.stroke_to(*point);
        }
        self.end_stroke();
    }

    /// Reallocate the surface to a new size.
    ///
    /// With `preserve` the overlapping top-left region is kept, otherwise the
    /// resized surface starts out transparent.
    pub fn resize(&mut self, width: u32, height: u32, preserve: bool) -> Result<(), SurfaceError> {
        check_dimensions(width, height)?;
        if (width, height) == self.image.dimensions() {
            return Ok(());
        }

        self.end_stroke();
        let mut resized = RgbaImage::new(width, height);
        if preserve {
            let copy_width = width.min(self.width());
            let copy_height = height.min(self.height());
            for y in 0..copy_height {
                for x in 0..copy_width {
                    resized.put_pixel(x, y, *self.image.get_pixel(x, y));
                }
            }
        }
        self.image = resized;
        // Snapshots of another size cannot be restored
        self.history.clear();
        log::info!("Resized surface to {}x{} (preserve: {})", width, height, preserve);
        Ok(())
    }

    /// Bounds of the drawn strokes, if anything has been drawn.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        trim::bounding_box(&self.image)
    }

    /// Copy of the surface cropped to the drawn strokes.
    pub fn trimmed_image(&self) -> RgbaImage {
        trim::trim(&self.image)
    }

    /// Encode the trimmed strokes as a PNG data URI.
    ///
    /// An empty surface is encoded whole.
    pub fn export_trimmed(&self) -> Result<String, EncodeError> {
        encoding::encode_data_uri(&self.trimmed_image())
    }

    /// Encode the entire surface as a PNG data URI.
    pub fn export_full(&self) -> Result<String, EncodeError> {
        encoding::encode_data_uri(&self.image)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the state before the last change. Returns false if there was
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        match self.history.undo(self.image.clone()) {
            Some(previous) => {
                self.image = previous;
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone change. Returns false if there was nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        match self.history.redo(self.image.clone()) {
            Some(next) => {
                self.image = next;
                true
            }
            None => false,
        }
    }

    fn wipe(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Dab centers that can touch at least one surface pixel.
    fn reach(&self) -> PixelRect {
        let radius = self.pen.radius();
        PixelRect {
            left: -radius,
            top: -radius,
            right: i64::from(self.width()) - 1 + radius,
            bottom: i64::from(self.height()) - 1 + radius,
        }
    }

    /// Paint one pen dab centered on `center`, clipped to the surface.
    fn dab(&mut self, center: (i64, i64)) {
        if !self.reach().contains(center) {
            return;
        }
        let ink = self.pen.ink();
        let (width, height) = (i64::from(self.width()), i64::from(self.height()));
        for (dx, dy) in self.pen.dab_offsets() {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            self.image.put_pixel(x as u32, y as u32, ink);
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SurfaceError::TooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
