// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SIGPAD - Signature pad
//!
//! A cross-platform desktop application for capturing hand-drawn
//! signatures, trimming them to the drawn strokes and exporting them as
//! PNG data URIs.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::SigpadApp;
use config::Settings;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = Settings::load();
    log::info!(
        "Starting with a {}x{} canvas",
        settings.canvas_width,
        settings.canvas_height
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 480.0])
            .with_min_inner_size([640.0, 320.0])
            .with_title("SIGPAD - Signature Pad"),
        ..Default::default()
    };

    eframe::run_native(
        "SIGPAD",
        options,
        Box::new(move |_cc| Ok(Box::new(SigpadApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
