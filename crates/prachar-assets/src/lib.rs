// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset generation for Prachar: image/video/audio wrappers with soft
//! failure semantics, prompt construction, and logo compositing.

pub mod composite;
pub mod generator;
pub mod prompt;

pub use composite::{composite_images, composite_logo, composite_logo_b64, Corner};
pub use generator::AssetGenerator;
pub use prompt::{aspect_for, image_prompt, payload_context, video_prompt};
