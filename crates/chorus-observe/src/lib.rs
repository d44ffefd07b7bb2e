//! Observability setup for the `chorus` binary.

pub mod tracing_setup;
