//! The Chorus agent engine.
//!
//! This crate defines the "ports" (client traits) that the infrastructure
//! layer implements, and the engine built on top of them: the reply
//! generation strategy chain, the per-agent worker state machine, and the
//! supervisor that runs one worker per configured agent. It depends only on
//! `chorus-types` -- never on `chorus-infra` or any HTTP crate.

pub mod client;
pub mod corpus;
pub mod generate;
pub mod identity;
pub mod supervisor;
pub mod worker;
