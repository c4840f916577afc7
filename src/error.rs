// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by the signature surface and its collaborators.

use thiserror::Error;

/// Failures when building or resizing a signature surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Surface {width}x{height} exceeds the {max}x{max} limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Failures when encoding or decoding signature images.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Empty image payload")]
    EmptyPayload,
}

/// Failures reported by an upload collaborator.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload failed: {0}")]
    Failed(String),

    #[error("Invalid upload payload: {0}")]
    Payload(#[from] EncodeError),

    #[error("Upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}
