// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer samples and pen settings.

use serde::{Deserialize, Serialize};

/// Widest pen the surface paints with; wider settings are clamped.
pub const MAX_PEN_WIDTH: u32 = 24;

/// A pointer sample in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pen used to paint strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pen {
    /// RGBA color. The alpha channel is forced opaque when painting.
    pub color: [u8; 4],
    /// Stroke diameter in pixels, `1..=MAX_PEN_WIDTH` when painting.
    pub width: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Self::new([0, 0, 0, 255], 3)
    }
}

impl Pen {
    pub fn new(color: [u8; 4], width: u32) -> Self {
        Self { color, width }
    }

    /// Color as painted: always fully opaque.
    pub fn ink(&self) -> image::Rgba<u8> {
        let [r, g, b, _] = self.color;
        image::Rgba([r, g, b, 255])
    }

    /// Width as painted, clamped to `1..=MAX_PEN_WIDTH`.
    pub fn effective_width(&self) -> u32 {
        self.width.clamp(1, MAX_PEN_WIDTH)
    }

    /// Distance in pixels a dab reaches from its center.
    pub fn radius(&self) -> i64 {
        (i64::from(self.effective_width()) - 1) / 2
    }

    /// Pixel offsets covered by one round dab of this pen.
    pub fn dab_offsets(&self) -> Vec<(i64, i64)> {
        let radius = self.radius();
        let mut offsets = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}
