// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the external collaborators of the content engine.
//!
//! Each generative capability (text, image, video, audio) and the
//! profile/history store is an adapter behind a trait, so the pipeline can
//! be exercised against mocks and the concrete backends stay swappable.

pub mod adapter;
pub mod capability;
pub mod store;

pub use adapter::Adapter;
pub use capability::{AudioCapability, ImageCapability, TextCapability, VideoCapability};
pub use store::StoreAdapter;
