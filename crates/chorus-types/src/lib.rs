//! Shared domain types for Chorus.
//!
//! This crate contains the types used across the Chorus agent runner:
//! agent configuration, channel messages, reply results, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod agent;
pub mod error;
pub mod message;
pub mod reply;
