// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload of signature images.
//!
//! Hosting is behind the [`Uploader`] trait: it takes a named byte buffer
//! and returns the URL the file can be fetched from. [`DirectoryUploader`]
//! stores files in a local directory and hands back `file://` URLs.

use crate::error::UploadError;
use crate::io::encoding;
use std::path::{Path, PathBuf};

/// Something that can host a named file and return its URL.
pub trait Uploader {
    fn upload(&self, name: &str, bytes: &[u8]) -> Result<String, UploadError>;
}

/// Kind of image being uploaded; decides the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Signature given when registering attendance
    AttendanceSignature,
    /// Signature given with an evaluation
    EvaluationSignature,
    /// Evaluation proof image
    EvaluationProof,
}

impl UploadKind {
    fn prefix(&self) -> &'static str {
        match self {
            UploadKind::AttendanceSignature => "signature",
            UploadKind::EvaluationSignature => "signature-eval",
            UploadKind::EvaluationProof => "eval-proof",
        }
    }
}

/// File name for an upload, e.g. `signature-eval-ada-1700000000000.png`.
///
/// Characters outside `[A-Za-z0-9_-]` in `subject` become `-`.
pub fn upload_name(kind: UploadKind, subject: &str, millis: u64) -> String {
    let subject: String = subject
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("{}-{}-{}.png", kind.prefix(), subject, millis)
}

/// Decode a data URI and upload its bytes under `name`.
pub fn upload_data_uri(
    uploader: &dyn Uploader,
    name: &str,
    data_uri: &str,
) -> Result<String, UploadError> {
    let bytes = encoding::data_uri_bytes(data_uri)?;
    let url = uploader.upload(name, &bytes)?;
    log::info!("Uploaded {} ({} bytes) to {}", name, bytes.len(), url);
    Ok(url)
}

/// Upload an image file from disk under `name`.
///
/// The file must decode as an image.
pub fn upload_file(uploader: &dyn Uploader, name: &str, path: &Path) -> Result<String, UploadError> {
    let bytes = std::fs::read(path)?;
    encoding::decode_image(&bytes)?;
    let url = uploader.upload(name, &bytes)?;
    log::info!("Uploaded {} as {} to {}", path.display(), name, url);
    Ok(url)
}

/// Uploader that writes files into a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    root: PathBuf,
}

impl DirectoryUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Uploader for DirectoryUploader {
    fn upload(&self, name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(UploadError::Failed(format!("Invalid file name: {:?}", name)));
        }
        if bytes.is_empty() {
            return Err(UploadError::Failed(format!("Refusing to upload empty file {}", name)));
        }

        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);
        std::fs::write(&path, bytes)?;

        let path = path.canonicalize().unwrap_or(path);
        Ok(format!("file://{}", path.display()))
    }
}
