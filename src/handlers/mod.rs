//! Command dispatch and per-command handlers.
//!
//! Parsing already happened by the time a command reaches this module;
//! handlers only apply effects and queue replies. Every reply format
//! lives in `wormnet_proto::reply`.

mod channel;
mod connection;
mod messaging;
mod server_query;
mod user_query;

pub use connection::cleanup;

use crate::config::Config;
use crate::network::Session;
use crate::state::Directory;
use wormnet_proto::Command;

/// Everything a handler needs for one command.
pub struct Context<'a> {
    pub session: &'a mut Session,
    pub directory: &'a Directory,
    pub config: &'a Config,
}

/// Outcome of processing one command.
pub enum DispatchResult {
    /// Keep reading from the connection.
    Continue,
    /// Tear the session down: QUIT, or the registration rejection.
    Quit,
}

/// Route a parsed command to its handler.
///
/// PASS, NICK, and USER drive the registration state machine and are
/// always processed; PING is answered unconditionally; QUIT always ends
/// the session. Every other command is a silent no-op until registration
/// completes - no error numeral, matching what the legacy client expects.
pub fn dispatch(ctx: &mut Context<'_>, command: Command) -> DispatchResult {
    match command {
        Command::Pass(token) => {
            connection::pass(ctx, token);
            DispatchResult::Continue
        }
        Command::Nick(nick) => connection::nick(ctx, nick),
        Command::User { username, realname } => connection::user(ctx, username, realname),
        Command::Ping => {
            connection::ping(ctx);
            DispatchResult::Continue
        }
        Command::Quit => DispatchResult::Quit,
        _ if !ctx.session.registered => DispatchResult::Continue,
        Command::Join(names) => {
            channel::join(ctx, &names);
            DispatchResult::Continue
        }
        Command::Part(name) => {
            channel::part(ctx, &name);
            DispatchResult::Continue
        }
        Command::Privmsg { target, text } => {
            messaging::privmsg(ctx, &target, &text);
            DispatchResult::Continue
        }
        Command::Who(target) => {
            user_query::who(ctx, target.as_deref());
            DispatchResult::Continue
        }
        Command::Names(name) => {
            channel::names(ctx, &name);
            DispatchResult::Continue
        }
        Command::List => {
            channel::list(ctx);
            DispatchResult::Continue
        }
        Command::Mode(target) => {
            channel::mode(ctx, &target);
            DispatchResult::Continue
        }
        Command::Motd => {
            server_query::motd(ctx);
            DispatchResult::Continue
        }
    }
}
