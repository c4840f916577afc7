// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for signature images, records and uploads.

pub mod encoding;
pub mod media;
pub mod serialization;
pub mod upload;
