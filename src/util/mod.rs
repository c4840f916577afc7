// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry and raster helpers.

pub mod geometry;
pub mod trim;
