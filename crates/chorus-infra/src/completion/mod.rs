//! Gemini completion client.
//!
//! Provides [`GeminiClient`], the concrete
//! [`CompletionClient`](chorus_core::client::CompletionClient)
//! implementation over the Gemini `generateContent` API.

pub mod client;
pub mod types;

pub use client::GeminiClient;
