// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate mapping between the on-screen canvas
//! and surface pixels, and the line rasterization used to paint strokes.

use crate::models::stroke::Point;

/// Convert an offset inside the displayed canvas to surface pixel coordinates.
///
/// The displayed canvas may be scaled; `display_width`/`display_height` are
/// its on-screen size and `width`/`height` the surface size in pixels.
pub fn display_to_surface(
    offset_x: f32,
    offset_y: f32,
    display_width: f32,
    display_height: f32,
    width: u32,
    height: u32,
) -> Point {
    if display_width <= 0.0 || display_height <= 0.0 {
        return Point::new(offset_x, offset_y);
    }
    Point {
        x: offset_x * width as f32 / display_width,
        y: offset_y * height as f32 / display_height,
    }
}

/// Integer pixel that contains `point`.
///
/// Coordinates beyond the `i64` range saturate; NaN maps to 0.
pub fn pixel_of(point: &Point) -> (i64, i64) {
    (point.x.floor() as i64, point.y.floor() as i64)
}

/// Inclusive rectangle of pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PixelRect {
    pub fn contains(&self, (x, y): (i64, i64)) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Clip the segment `from`-`to` to `rect` (Liang-Barsky).
///
/// Returns the endpoints of the visible part, or `None` when the segment
/// misses the rectangle entirely.
pub fn clip_line(
    from: (i64, i64),
    to: (i64, i64),
    rect: &PixelRect,
) -> Option<((i64, i64), (i64, i64))> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let dx = to.0 as f64 - x0;
    let dy = to.1 as f64 - y0;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-dx, x0 - rect.left as f64),
        (dx, rect.right as f64 - x0),
        (-dy, y0 - rect.top as f64),
        (dy, rect.bottom as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        let x = (x0 + t * dx).round() as i64;
        let y = (y0 + t * dy).round() as i64;
        (x.clamp(rect.left, rect.right), y.clamp(rect.top, rect.bottom))
    };
    Some((at(t0), at(t1)))
}

/// Every pixel on the Bresenham line from `from` to `to`, endpoints included.
///
/// The result holds one entry per step, so callers clip far-away endpoints
/// with [`clip_line`] first.
pub fn line_pixels(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut pixels = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        pixels.push((x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    pixels
}
