// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Prachar generation pipeline.
//!
//! Wires the request builder, response normalizer, and usage limiter into a
//! single entry point, [`GenerationOrchestrator::generate`], used by every
//! content-producing action (initial generation, regeneration, and
//! edit-and-regenerate from history).

pub mod instruction;
pub mod normalize;
pub mod orchestrator;
pub mod quota;
pub mod request;

pub use normalize::{extract_json, normalize, NormalizeError};
pub use orchestrator::GenerationOrchestrator;
pub use quota::UsageLimiter;
pub use request::build_request;
