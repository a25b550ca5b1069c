//! Wire-level protocol support for the WormNET matchmaking server.
//!
//! The legacy Worms Armageddon client speaks a small, frozen subset of IRC
//! and parses server replies rigidly. This crate keeps everything that
//! touches the wire in one place: the line codec, command parsing, the
//! nickname rules, and the reply builders whose output must match the
//! historical server byte for byte.

mod command;
mod line;
mod nick;
pub mod reply;

pub use command::Command;
pub use line::LineCodec;
pub use nick::{NickExt, MAX_NICK_LEN};
