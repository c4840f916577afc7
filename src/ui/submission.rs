// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Submission panel.
//!
//! Collects the signer's name and optional event code, and shows the
//! outcome of the last submission.

use crate::models::submission::{Submission, ValidationError};
use std::path::PathBuf;

/// Outcome message shown under the form.
pub struct Status {
    pub success: bool,
    pub message: String,
}

/// Editable form state.
#[derive(Default)]
pub struct SubmissionForm {
    pub name: String,
    pub code: String,
    /// Evaluation proof image to upload with the signature
    pub proof: Option<PathBuf>,
    pub status: Option<Status>,
    pub field_errors: ValidationError,
}

impl SubmissionForm {
    pub fn succeed(&mut self, message: String) {
        self.field_errors.clear();
        self.status = Some(Status {
            success: true,
            message,
        });
    }

    pub fn fail(&mut self, message: String) {
        self.status = Some(Status {
            success: false,
            message,
        });
    }

    pub fn reject(&mut self, error: ValidationError) {
        self.fail(error.to_string());
        self.field_errors = error;
    }

    /// Fill the form from a loaded record.
    pub fn fill(&mut self, submission: &Submission) {
        self.name = submission.name.clone();
        self.code = submission
            .event_code
            .map(|c| c.to_string())
            .unwrap_or_default();
        self.proof = None;
        self.field_errors.clear();
        self.status = None;
    }
}

/// Result of submission panel interaction.
pub enum SubmissionAction {
    None,
    ChooseProof,
    RemoveProof,
    Submit,
}

/// Display the submission panel.
pub fn show(
    ui: &mut egui::Ui,
    form: &mut SubmissionForm,
    last: Option<&Submission>,
) -> SubmissionAction {
    let mut action = SubmissionAction::None;

    ui.heading("Sign");
    ui.separator();

    ui.label("Name");
    ui.text_edit_singleline(&mut form.name);
    show_errors(ui, form, "name");

    ui.add_space(6.0);
    ui.label("Event code (optional)");
    ui.text_edit_singleline(&mut form.code);
    show_errors(ui, form, "code");

    ui.add_space(6.0);
    ui.label("Evaluation proof (optional)");
    ui.horizontal(|ui| {
        match &form.proof {
            Some(path) => {
                let file = path.file_name().map(|f| f.to_string_lossy()).unwrap_or_default();
                ui.label(egui::RichText::new(file).weak());
                if ui.small_button("✖").clicked() {
                    action = SubmissionAction::RemoveProof;
                }
            }
            None => {
                if ui.button("Choose image...").clicked() {
                    action = SubmissionAction::ChooseProof;
                }
            }
        }
    });
    show_errors(ui, form, "proof");

    show_errors(ui, form, "signature");

    ui.add_space(10.0);
    if ui.button("Submit").clicked() {
        action = SubmissionAction::Submit;
    }

    if let Some(status) = &form.status {
        ui.add_space(10.0);
        let color = if status.success {
            egui::Color32::from_rgb(80, 180, 100)
        } else {
            egui::Color32::from_rgb(220, 80, 80)
        };
        ui.label(egui::RichText::new(&status.message).color(color));
    }

    if let Some(submission) = last {
        ui.add_space(16.0);
        ui.separator();
        ui.label(egui::RichText::new("Last submission").strong());
        ui.label(format!("Name: {}", submission.name));
        if let Some(code) = submission.event_code {
            ui.label(format!("Event: {}", code));
        }
        for url in [&submission.signature_url, &submission.proof_url].into_iter().flatten() {
            ui.label(egui::RichText::new(url).small().weak());
        }
    }

    action
}

fn show_errors(ui: &mut egui::Ui, form: &SubmissionForm, field: &str) {
    for message in form.field_errors.field(field) {
        ui.label(
            egui::RichText::new(message)
                .small()
                .color(egui::Color32::from_rgb(220, 80, 80)),
        );
    }
}
