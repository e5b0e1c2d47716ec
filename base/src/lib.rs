//! Base primitives shared by the quickplot crates: geometry and colors.
// Quickplot is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Quickplot contributors

pub mod color;
pub mod geom;

pub use color::ColorU8;
