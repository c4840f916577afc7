// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the signature pad.

pub mod canvas;
pub mod submission;
pub mod toolbar;
