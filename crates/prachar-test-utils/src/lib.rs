// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Prachar workspace.
//!
//! Mock capability adapters with scripted outcomes and call counting, plus an
//! in-memory store, enabling fast CI-runnable tests with no external services.

pub mod mock_capability;
pub mod mock_store;

pub use mock_capability::{
    MockAudioCapability, MockImageCapability, MockTextCapability, MockVideoCapability,
    ScriptedReply,
};
pub use mock_store::MockStore;
