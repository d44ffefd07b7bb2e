//! Discord channel client.
//!
//! Provides [`DiscordClient`], the concrete
//! [`ChannelClient`](chorus_core::client::ChannelClient) implementation over
//! the Discord REST API.

pub mod client;
pub mod types;

pub use client::DiscordClient;
