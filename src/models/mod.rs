// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: the signature surface, its pen and history, and submission
//! records.

pub mod history;
pub mod stroke;
pub mod submission;
pub mod surface;
