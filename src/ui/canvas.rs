// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for signature capture.
//!
//! This module displays the signature surface and turns pointer drags on
//! it into stroke actions in surface pixel coordinates.

use crate::models::stroke::Point;
use crate::util::geometry::display_to_surface;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// A click without movement: a single dot
    Dot(Point),
    BeginStroke(Point),
    StrokeTo(Point),
    EndStroke,
}

/// Display the signature surface and handle pointer input.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    surface_size: (u32, u32),
    is_drawing: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    let (surface_width, surface_height) = surface_size;

    // Shrink to fit the panel, never enlarge past 1:1
    let available = ui.available_size();
    let scale = (available.x / surface_width as f32)
        .min(available.y / surface_height as f32)
        .min(1.0)
        .max(0.1);
    let display_size = egui::vec2(surface_width as f32 * scale, surface_height as f32 * scale);

    ui.vertical_centered(|ui| {
        let (rect, response) = ui.allocate_exact_size(display_size, egui::Sense::click_and_drag());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
        if let Some(texture) = texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(160)));

        let to_surface = |pos: egui::Pos2| {
            display_to_surface(
                pos.x - rect.min.x,
                pos.y - rect.min.y,
                rect.width(),
                rect.height(),
                surface_width,
                surface_height,
            )
        };

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::BeginStroke(to_surface(pos));
            }
        } else if response.dragged() && is_drawing {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::StrokeTo(to_surface(pos));
            }
        } else if response.drag_stopped() {
            action = CanvasAction::EndStroke;
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::Dot(to_surface(pos));
            }
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Canvas: {}x{}", surface_width, surface_height));
        ui.separator();
        ui.label(if is_drawing { "Drawing" } else { "Ready" });
    });

    action
}
