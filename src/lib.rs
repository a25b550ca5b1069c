//! wormnetd - a minimal WormNET server for the legacy Worms Armageddon
//! client.
//!
//! The binary in `main.rs` wires these modules together; they are exposed
//! as a library so the integration tests can run the server in-process on
//! an ephemeral port.

pub mod config;
pub mod handlers;
pub mod network;
pub mod state;
