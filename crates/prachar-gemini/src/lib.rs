// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini capability adapter for Prachar.
//!
//! One [`GeminiClient`] serves all four generative capabilities: text
//! (`generateContent` with JSON response mime type), image, long-running
//! video (`predictLongRunning` + bounded operation polling), and TTS audio.

pub mod client;
pub mod types;

pub use client::GeminiClient;
