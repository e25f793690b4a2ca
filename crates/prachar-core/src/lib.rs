// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Prachar content engine.
//!
//! This crate provides the foundational trait definitions, error types, the
//! response envelope contract, and the canonical per-feature payload shapes
//! used throughout the Prachar workspace. All adapters (capability clients,
//! store backends, test mocks) implement traits defined here.

pub mod envelope;
pub mod error;
pub mod payload;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use envelope::{ErrorCode, ResponseEnvelope, WireEnvelope};
pub use error::PracharError;
pub use payload::FeaturePayload;
pub use types::{FeatureType, FormInput, PlanTier};

// Re-export all adapter traits at crate root.
pub use traits::{
    Adapter, AudioCapability, ImageCapability, StoreAdapter, TextCapability, VideoCapability,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prachar_error_has_all_variants() {
        let _config = PracharError::Config("test".into());
        let _store = PracharError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _capability = PracharError::Capability {
            message: "test".into(),
            source: None,
        };
        let _timeout = PracharError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = PracharError::Internal("test".into());
    }

    #[test]
    fn capability_shorthand_has_no_source() {
        let err = PracharError::capability("boom");
        assert_eq!(err.to_string(), "capability error: boom");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // If any adapter trait is missing or fails to compile, this test
        // won't build.
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_text<T: TextCapability>() {}
        fn _assert_image<T: ImageCapability>() {}
        fn _assert_video<T: VideoCapability>() {}
        fn _assert_audio<T: AudioCapability>() {}
        fn _assert_store<T: StoreAdapter>() {}
    }
}
