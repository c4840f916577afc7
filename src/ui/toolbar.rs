// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with pen and canvas controls.

use crate::models::stroke::{Pen, MAX_PEN_WIDTH};
use crate::models::surface::MAX_DIMENSION;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    PenChanged,
    Resize(u32, u32),
    Clear,
    Undo,
    Redo,
}

/// Display the toolbar.
///
/// `canvas_size` holds the size being edited; a change is reported as
/// [`ToolbarAction::Resize`] once the user stops dragging the value.
pub fn show(
    ui: &mut egui::Ui,
    pen: &mut Pen,
    canvas_size: &mut (u32, u32),
    can_undo: bool,
    can_redo: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Pen:");
        if ui.color_edit_button_srgba_unmultiplied(&mut pen.color).changed() {
            action = ToolbarAction::PenChanged;
        }
        if ui
            .add(egui::Slider::new(&mut pen.width, 1..=MAX_PEN_WIDTH).suffix(" px"))
            .changed()
        {
            action = ToolbarAction::PenChanged;
        }

        ui.separator();

        ui.label("Canvas:");
        let width = ui.add(egui::DragValue::new(&mut canvas_size.0).range(1..=MAX_DIMENSION).suffix(" w"));
        let height = ui.add(egui::DragValue::new(&mut canvas_size.1).range(1..=MAX_DIMENSION).suffix(" h"));
        let committed = |r: &egui::Response| r.drag_stopped() || r.lost_focus();
        if committed(&width) || committed(&height) {
            action = ToolbarAction::Resize(canvas_size.0, canvas_size.1);
        }

        ui.separator();

        if ui.button("🗑 Clear").clicked() {
            action = ToolbarAction::Clear;
        }
        if ui.add_enabled(can_undo, egui::Button::new("⟲ Undo")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(can_redo, egui::Button::new("⟳ Redo")).clicked() {
            action = ToolbarAction::Redo;
        }
    });

    action
}
