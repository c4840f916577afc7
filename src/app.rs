// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait, owning the signature surface for the capture
//! session and coordinating the canvas, toolbar and submission panel.

use crate::config::Settings;
use crate::io::upload::{self, DirectoryUploader, UploadKind, Uploader};
use crate::models::{
    submission::Submission,
    surface::SignatureSurface,
};
use crate::ui::{canvas, submission, toolbar};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of a background load.
enum Loaded {
    /// A decoded image to paint onto the surface
    Image(RgbaImage),
    /// A submission record whose signature is resumed onto the surface
    Record(Submission),
}

/// Main application state.
pub struct SigpadApp {
    settings: Settings,

    /// Surface for the current capture session
    surface: SignatureSurface,

    /// Texture mirroring the surface pixels
    texture: Option<egui::TextureHandle>,

    /// Set when the surface changed since the texture was uploaded
    texture_dirty: bool,

    /// Canvas size as edited in the toolbar
    canvas_size: (u32, u32),

    form: submission::SubmissionForm,

    /// Most recent successful submission
    last_submission: Option<Submission>,

    uploader: Box<dyn Uploader>,

    /// Receiver for background loading
    loader: Option<Receiver<Result<Loaded, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl SigpadApp {
    /// Create the application from settings.
    ///
    /// Invalid canvas dimensions in the settings fall back to the defaults.
    pub fn new(settings: Settings) -> Self {
        let mut surface = SignatureSurface::new(settings.canvas_width, settings.canvas_height)
            .unwrap_or_else(|e| {
                log::error!("{}; using default canvas size", e);
                SignatureSurface::default()
            })
            .with_history_depth(settings.history_depth);
        surface.set_pen(settings.pen);

        let uploader = Box::new(DirectoryUploader::new(settings.upload_dir.clone()));
        log::info!("Uploads are written to {}", uploader.root().display());
        Self::with_uploader(settings, surface, uploader)
    }

    fn with_uploader(settings: Settings, surface: SignatureSurface, uploader: Box<dyn Uploader>) -> Self {
        Self {
            canvas_size: (surface.width(), surface.height()),
            settings,
            surface,
            texture: None,
            texture_dirty: true,
            form: submission::SubmissionForm::default(),
            last_submission: None,
            uploader,
            loader: None,
            loading_message: None,
        }
    }

    fn mark_dirty(&mut self) {
        self.texture_dirty = true;
    }

    fn clear(&mut self) {
        self.surface.clear();
        self.mark_dirty();
        log::info!("Cleared signature");
    }

    fn undo(&mut self) {
        if self.surface.undo() {
            self.mark_dirty();
            log::info!("Undo");
        }
    }

    fn redo(&mut self) {
        if self.surface.redo() {
            self.mark_dirty();
            log::info!("Redo");
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self.surface.resize(width, height, !self.settings.clear_on_resize) {
            Ok(()) => {
                self.settings.canvas_width = width;
                self.settings.canvas_height = height;
                // A texture of the old size cannot be updated in place
                self.texture = None;
                self.mark_dirty();
            }
            Err(e) => {
                log::error!("Failed to resize canvas: {}", e);
                self.canvas_size = (self.surface.width(), self.surface.height());
            }
        }
    }

    /// Validate the form, export the trimmed signature and upload it.
    fn submit(&mut self) {
        self.form.field_errors.clear();
        // An empty surface still exports an image, so it is checked here
        let signature = if self.surface.is_empty() {
            String::new()
        } else {
            match self.surface.export_trimmed() {
                Ok(signature) => signature,
                Err(e) => {
                    log::error!("Failed to export signature: {}", e);
                    self.form.fail(format!("Failed to export signature: {}", e));
                    return;
                }
            }
        };

        let mut record = match Submission::new(&self.form.name, &self.form.code, &signature) {
            Ok(record) => record,
            Err(e) => {
                self.form.reject(e);
                return;
            }
        };

        let kind = if record.event_code.is_some() {
            UploadKind::AttendanceSignature
        } else {
            UploadKind::EvaluationSignature
        };
        let name = upload::upload_name(kind, &record.name, record.submitted_at);
        match upload::upload_data_uri(self.uploader.as_ref(), &name, &record.signature) {
            Ok(url) => record.signature_url = Some(url),
            Err(e) => {
                log::error!("Failed to upload signature: {}", e);
                self.form.fail(format!("Failed to upload signature: {}", e));
                return;
            }
        }

        if let Some(path) = self.form.proof.clone() {
            let name = upload::upload_name(UploadKind::EvaluationProof, &record.name, record.submitted_at);
            match upload::upload_file(self.uploader.as_ref(), &name, &path) {
                Ok(url) => record.proof_url = Some(url),
                Err(e) => {
                    log::error!("Failed to upload evaluation proof: {}", e);
                    self.form.field_errors.add("proof", e.to_string());
                    self.form.fail("Failed to upload files".to_string());
                    return;
                }
            }
        }

        log::info!("Submitted signature for {}", record.name);
        self.form.succeed(record.confirmation());
        self.last_submission = Some(record);
    }

    /// Save the trimmed or full signature as a PNG file.
    fn save_png(&self, path: PathBuf, trimmed: bool) {
        let image = if trimmed {
            self.surface.trimmed_image()
        } else {
            self.surface.image().clone()
        };
        match crate::io::media::save_png(&image, &path) {
            Ok(()) => log::info!("Saved signature to {}", path.display()),
            Err(e) => log::error!("Failed to save signature: {:#}", e),
        }
    }

    /// Encoded signature for the clipboard.
    fn signature_data_uri(&self, trimmed: bool) -> Option<String> {
        let encoded = if trimmed {
            self.surface.export_trimmed()
        } else {
            self.surface.export_full()
        };
        match encoded {
            Ok(uri) => Some(uri),
            Err(e) => {
                log::error!("Failed to encode signature: {}", e);
                None
            }
        }
    }

    /// Export the last submission record to a file.
    fn export_record(&self, path: PathBuf) {
        let Some(ref record) = self.last_submission else {
            return;
        };
        match crate::io::serialization::export(record, &path) {
            Ok(()) => log::info!("Exported record to {}", path.display()),
            Err(e) => log::error!("Failed to export record: {:#}", e),
        }
    }

    /// Load an image file onto the surface (asynchronously).
    fn open_image(&mut self, path: PathBuf) {
        self.load_in_background("Loading signature...", move || {
            let image = crate::io::media::load_image(&path)
                .map_err(|e| format!("Failed to load image: {:#}", e))?;
            log::info!("Loaded image: {} ({}x{})", path.display(), image.width(), image.height());
            Ok(Loaded::Image(image))
        });
    }

    /// Load a submission record and resume its signature (asynchronously).
    fn open_record(&mut self, path: PathBuf) {
        self.load_in_background("Loading record...", move || {
            let record: Submission = crate::io::serialization::import(&path)
                .map_err(|e| format!("Failed to import record: {:#}", e))?;
            log::info!("Imported record for {} from {}", record.name, path.display());
            Ok(Loaded::Record(record))
        });
    }

    fn load_in_background<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<Loaded, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    /// Apply a finished background load on the UI thread.
    fn apply_loaded(&mut self, result: Result<Loaded, String>) {
        match result {
            Ok(Loaded::Image(image)) => {
                self.surface.paint_image(&image);
                self.mark_dirty();
            }
            Ok(Loaded::Record(record)) => {
                self.surface.load_from(&record.signature);
                self.form.fill(&record);
                self.last_submission = Some(record);
                self.mark_dirty();
            }
            Err(e) => {
                log::error!("{}", e);
                self.form.fail(e);
            }
        }
    }

    /// Upload the surface pixels to the GPU texture if they changed.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty && self.texture.is_some() {
            return;
        }
        let image = self.surface.image();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        if let Some(texture) = self.texture.as_mut() {
            texture.set(color_image, egui::TextureOptions::NEAREST);
        } else {
            self.texture = Some(ctx.load_texture(
                "signature",
                color_image,
                egui::TextureOptions::NEAREST,
            ));
        }
        self.texture_dirty = false;
    }

    fn handle_canvas(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::Dot(point) => {
                self.surface.draw_stroke(&[point]);
                self.mark_dirty();
            }
            canvas::CanvasAction::BeginStroke(point) => {
                self.surface.begin_stroke(point);
                self.mark_dirty();
            }
            canvas::CanvasAction::StrokeTo(point) => {
                self.surface.stroke_to(point);
                self.mark_dirty();
            }
            canvas::CanvasAction::EndStroke => {
                self.surface.end_stroke();
                if let Some(bound) = self.surface.bounding_box() {
                    log::debug!("Signature bounds: {:?}", bound);
                }
            }
            canvas::CanvasAction::None => {}
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction, pen: crate::models::stroke::Pen) {
        match action {
            toolbar::ToolbarAction::PenChanged => {
                self.surface.set_pen(pen);
                self.settings.pen = pen;
            }
            toolbar::ToolbarAction::Resize(width, height) => self.resize(width, height),
            toolbar::ToolbarAction::Clear => self.clear(),
            toolbar::ToolbarAction::Undo => self.undo(),
            toolbar::ToolbarAction::Redo => self.redo(),
            toolbar::ToolbarAction::None => {}
        }
    }
}

impl eframe::App for SigpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loading
        if let Some(ref receiver) = self.loader {
            if let Ok(result) = receiver.try_recv() {
                self.loader = None;
                self.loading_message = None;
                self.apply_loaded(result);
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Signature Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png"])
                            .pick_file()
                        {
                            self.open_image(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Record...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Records", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_record(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save Trimmed PNG...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .set_file_name("signature.png")
                            .save_file()
                        {
                            self.save_png(path, true);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Full PNG...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .set_file_name("signature-full.png")
                            .save_file()
                        {
                            self.save_png(path, false);
                        }
                        ui.close_menu();
                    }
                    let has_record = self.last_submission.is_some();
                    ui.add_enabled_ui(has_record, |ui| {
                        ui.menu_button("Export Record", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("record.yaml")
                                    .save_file()
                                {
                                    self.export_record(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("record.json")
                                    .save_file()
                                {
                                    self.export_record(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.surface.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.surface.can_redo(), egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Copy Trimmed Data URI").clicked() {
                        if let Some(uri) = self.signature_data_uri(true) {
                            ctx.output_mut(|o| o.copied_text = uri);
                            log::info!("Copied trimmed signature to clipboard");
                        }
                        ui.close_menu();
                    }
                    if ui.button("Copy Full Data URI").clicked() {
                        if let Some(uri) = self.signature_data_uri(false) {
                            ctx.output_mut(|o| o.copied_text = uri);
                            log::info!("Copied full signature to clipboard");
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear").clicked() {
                        self.clear();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let mut pen = self.surface.pen();
        let can_undo = self.surface.can_undo();
        let can_redo = self.surface.can_redo();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut pen, &mut self.canvas_size, can_undo, can_redo)
            })
            .inner;
        self.handle_toolbar(toolbar_action, pen);

        // Submission panel (right side)
        let submission_action = egui::SidePanel::right("submission")
            .default_width(250.0)
            .show(ctx, |ui| {
                submission::show(ui, &mut self.form, self.last_submission.as_ref())
            })
            .inner;
        match submission_action {
            submission::SubmissionAction::ChooseProof => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png"])
                    .pick_file()
                {
                    self.form.proof = Some(path);
                }
            }
            submission::SubmissionAction::RemoveProof => self.form.proof = None,
            submission::SubmissionAction::Submit => self.submit(),
            submission::SubmissionAction::None => {}
        }

        // Keyboard shortcuts, unless a text field has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
                self.undo();
            }
            if ctx.input(|i| {
                (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                    || (i.modifiers.command && i.key_pressed(egui::Key::Y))
            }) {
                self.redo();
            }
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.surface.end_stroke();
        }

        self.refresh_texture(ctx);

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(
                        ui,
                        &self.texture,
                        (self.surface.width(), self.surface.height()),
                        self.surface.is_drawing(),
                    )
                }
            })
            .inner;
        self.handle_canvas(canvas_action);

        if self.texture_dirty {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::models::stroke::Point;

    fn app_in(dir: &std::path::Path) -> SigpadApp {
        SigpadApp::new(Settings {
            canvas_width: 100,
            canvas_height: 100,
            upload_dir: dir.to_path_buf(),
            ..Settings::default()
        })
    }

    #[test]
    fn test_invalid_settings_fall_back_to_default_size() {
        let app = SigpadApp::new(Settings {
            canvas_width: 0,
            ..Settings::default()
        });
        let defaults = Settings::default();
        assert_eq!(app.canvas_size, (defaults.canvas_width, defaults.canvas_height));
    }

    #[test]
    fn test_oversized_settings_fall_back_to_default_size() {
        let app = SigpadApp::new(Settings {
            canvas_width: u32::MAX,
            canvas_height: u32::MAX,
            ..Settings::default()
        });
        assert_eq!(app.surface.image().dimensions(), (500, 200));
        assert_eq!(app.canvas_size, (500, 200));
    }

    #[test]
    fn test_submit_uploads_trimmed_signature() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.surface.draw_stroke(&[Point::new(10.0, 10.0), Point::new(30.0, 20.0)]);
        app.form.name = "Ada".to_string();
        app.form.code = "12".to_string();

        app.submit();

        let record = app.last_submission.as_ref().unwrap();
        assert_eq!(record.event_code, Some(12));
        let url = record.signature_url.as_ref().unwrap();
        assert!(url.contains("signature-ada-"));
        assert!(app.form.status.as_ref().unwrap().success);

        let uploaded = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(uploaded, 1);

        let trimmed = crate::io::encoding::decode_data_uri(&record.signature).unwrap();
        assert_eq!(trimmed.dimensions(), app.surface.trimmed_image().dimensions());
        assert!(trimmed.width() < 100);
    }

    #[test]
    fn test_submit_empty_signature_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.form.name = "Ada".to_string();

        app.submit();

        assert!(app.last_submission.is_none());
        assert!(!app.form.status.as_ref().unwrap().success);
        assert_eq!(app.form.field_errors.field("signature"), ["Signature is required"]);
    }

    struct RejectingUploader;

    impl Uploader for RejectingUploader {
        fn upload(&self, _name: &str, _bytes: &[u8]) -> Result<String, UploadError> {
            Err(UploadError::Failed("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_submit_reports_upload_failure() {
        let surface = SignatureSurface::new(50, 50).unwrap();
        let mut app = SigpadApp::with_uploader(Settings::default(), surface, Box::new(RejectingUploader));
        app.surface.draw_stroke(&[Point::new(5.0, 5.0)]);
        app.form.name = "Grace".to_string();

        app.submit();

        assert!(app.last_submission.is_none());
        let status = app.form.status.as_ref().unwrap();
        assert!(!status.success);
        assert!(status.message.contains("quota exceeded"));
    }

    #[test]
    fn test_upload_failure_clears_earlier_field_errors() {
        let surface = SignatureSurface::new(50, 50).unwrap();
        let mut app = SigpadApp::with_uploader(Settings::default(), surface, Box::new(RejectingUploader));
        app.surface.draw_stroke(&[Point::new(5.0, 5.0)]);

        app.submit();
        assert_eq!(app.form.field_errors.field("name"), ["Name is required"]);

        app.form.name = "Grace".to_string();
        app.submit();
        assert!(app.form.field_errors.is_empty());
        assert!(!app.form.status.as_ref().unwrap().success);
    }

    #[test]
    fn test_submit_with_evaluation_proof() {
        let dir = tempfile::tempdir().unwrap();
        let proof = dir.path().join("proof.png");
        crate::io::media::save_png(&RgbaImage::new(8, 8), &proof).unwrap();

        let mut app = app_in(&dir.path().join("uploads"));
        app.surface.draw_stroke(&[Point::new(10.0, 10.0)]);
        app.form.name = "Ada".to_string();
        app.form.proof = Some(proof);

        app.submit();

        let record = app.last_submission.as_ref().unwrap();
        assert!(record.signature_url.as_ref().unwrap().contains("signature-eval-ada-"));
        assert!(record.proof_url.as_ref().unwrap().contains("eval-proof-ada-"));
    }

    #[test]
    fn test_submit_rejects_unreadable_proof() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.surface.draw_stroke(&[Point::new(10.0, 10.0)]);
        app.form.name = "Ada".to_string();
        app.form.proof = Some(dir.path().join("missing.png"));

        app.submit();

        assert!(app.last_submission.is_none());
        assert_eq!(app.form.status.as_ref().unwrap().message, "Failed to upload files");
        assert_eq!(app.form.field_errors.field("proof").len(), 1);
    }

    #[test]
    fn test_loaded_record_resumes_signature() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = app_in(dir.path());
        source.surface.draw_stroke(&[Point::new(3.0, 4.0), Point::new(9.0, 4.0)]);
        source.form.name = "Ada".to_string();
        source.submit();
        let record = source.last_submission.clone().unwrap();

        let mut app = app_in(dir.path());
        app.apply_loaded(Ok(Loaded::Record(record)));
        assert_eq!(app.form.name, "Ada");
        assert_eq!(app.surface.image(), &{
            let mut expected = RgbaImage::new(100, 100);
            let trimmed = source.surface.trimmed_image();
            for (x, y, p) in trimmed.enumerate_pixels() {
                expected.put_pixel(x, y, *p);
            }
            expected
        });
    }

    #[test]
    fn test_resize_follows_clear_on_resize() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.surface.draw_stroke(&[Point::new(5.0, 5.0)]);
        app.resize(80, 60);
        assert!(app.surface.is_empty());
        assert_eq!((app.settings.canvas_width, app.settings.canvas_height), (80, 60));

        app.settings.clear_on_resize = false;
        app.surface.draw_stroke(&[Point::new(5.0, 5.0)]);
        app.resize(70, 50);
        assert!(!app.surface.is_empty());

        app.canvas_size = (0, 0);
        app.resize(0, 10);
        assert_eq!(app.canvas_size, (70, 50));
    }
}
