//! Network layer: the listener and per-connection session handling.

mod connection;
mod gateway;

pub use connection::{Connection, Session};
pub use gateway::Gateway;
