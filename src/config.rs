// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read from the YAML or JSON file named by `SIGPAD_CONFIG`.
//! Missing fields take their defaults; a missing or unreadable file falls
//! back to the defaults entirely.

use crate::io::serialization;
use crate::models::stroke::{Pen, MAX_PEN_WIDTH};
use crate::models::surface::{DEFAULT_HEIGHT, DEFAULT_HISTORY_DEPTH, DEFAULT_WIDTH};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "SIGPAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Surface width in pixels
    pub canvas_width: u32,
    /// Surface height in pixels
    pub canvas_height: u32,
    pub pen: Pen,
    /// Clear the surface when its size changes instead of keeping the
    /// overlapping strokes
    pub clear_on_resize: bool,
    /// Number of undo steps kept
    pub history_depth: usize,
    /// Directory that signature uploads are written to
    pub upload_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            pen: Pen::default(),
            clear_on_resize: true,
            history_depth: DEFAULT_HISTORY_DEPTH,
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

impl Settings {
    /// Read settings from a YAML or JSON file.
    ///
    /// A pen width outside `1..=MAX_PEN_WIDTH` is clamped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut settings: Self = serialization::import(path)?;
        let width = settings.pen.effective_width();
        if width != settings.pen.width {
            log::warn!("Pen width {} out of range; using {}", settings.pen.width, width);
            settings.pen.width = width;
        }
        Ok(settings)
    }

    /// Settings from `SIGPAD_CONFIG`, or defaults.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Settings from `path`, logging and falling back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("Failed to load settings from {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }
}
