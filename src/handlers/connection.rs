//! Registration handshake: PASS, NICK, USER, PING, and session cleanup.

use super::{server_query, Context, DispatchResult};
use crate::network::Session;
use crate::state::{Directory, User};
use tracing::info;
use wormnet_proto::{reply, NickExt};

/// PASS stores the credential verbatim, in any order relative to NICK and
/// USER, and never produces a reply. A bare PASS clears it.
pub fn pass(ctx: &mut Context<'_>, token: Option<String>) {
    ctx.session.password = token;
}

/// NICK silently drops an illegal nickname - no rejection numeral, ever.
/// A legal one is stored and may complete registration; on an already
/// registered session it renames, keeping the member sets consistent.
pub fn nick(ctx: &mut Context<'_>, nick: String) -> DispatchResult {
    if !nick.is_valid_nick() {
        return DispatchResult::Continue;
    }
    if ctx.session.registered {
        ctx.directory.rename(ctx.session.id, &nick);
        ctx.session.nickname = Some(nick);
        return DispatchResult::Continue;
    }
    ctx.session.nickname = Some(nick);
    try_register(ctx)
}

/// USER stores the username and the byte-for-byte realname payload. A
/// repeat USER without a realname keeps the previously stored payload.
pub fn user(ctx: &mut Context<'_>, username: String, realname: Option<String>) -> DispatchResult {
    if realname.is_some() {
        ctx.session.realname = realname;
    }
    if ctx.session.registered {
        ctx.directory.update_identity(
            ctx.session.id,
            &username,
            ctx.session.realname.as_deref(),
        );
        ctx.session.username = Some(username);
        return DispatchResult::Continue;
    }
    ctx.session.username = Some(username);
    try_register(ctx)
}

/// PING is answered unconditionally, even before registration. The token
/// the client sent is ignored; the reply carries the host identity.
pub fn ping(ctx: &mut Context<'_>) {
    ctx.session.send(reply::pong(&ctx.config.server.name));
}

/// Re-evaluate promotion after a NICK or USER update. Promotion happens
/// the moment nickname and username are both set; that is also the one
/// point where the password is checked. A mismatch (or missing PASS) is
/// the protocol's single rejection path: numeral 464, then the connection
/// is closed without processing anything further.
fn try_register(ctx: &mut Context<'_>) -> DispatchResult {
    if ctx.session.registered {
        return DispatchResult::Continue;
    }
    let (Some(nickname), Some(username)) =
        (ctx.session.nickname.clone(), ctx.session.username.clone())
    else {
        return DispatchResult::Continue;
    };
    // An empty username token is stored but does not count as set.
    if username.is_empty() {
        return DispatchResult::Continue;
    }

    if ctx.session.password.as_deref() != Some(ctx.config.server.password.as_str()) {
        ctx.session.send(reply::password_mismatch(&ctx.config.server.name));
        return DispatchResult::Quit;
    }

    ctx.session.registered = true;
    ctx.directory.insert(User {
        id: ctx.session.id,
        nickname: nickname.clone(),
        username,
        realname: ctx.session.realname.clone(),
        ip: ctx.session.addr.ip(),
        channels: Default::default(),
        tx: ctx.session.sender(),
    });
    info!(addr = %ctx.session.addr, nick = %nickname, "Client registered");

    let host = ctx.config.server.name.clone();
    ctx.session.send(reply::welcome(&host, &nickname));
    ctx.session.send(reply::your_host(&host, &nickname));
    ctx.session.send(reply::created(&host, &nickname));
    ctx.session.send(reply::my_info(&host, &nickname));
    ctx.session.send(reply::isupport(&host, &nickname));
    server_query::motd(ctx);

    DispatchResult::Continue
}

/// Tear a session down: broadcast the quit notice to every channel it
/// belonged to, then drop it from the directory - member sets and session
/// list in one critical section. Runs exactly once per connection, on
/// every exit path. Sessions that never registered leave silently.
pub fn cleanup(session: &Session, directory: &Directory) {
    if !session.registered {
        return;
    }
    let Some(nickname) = session.nickname.as_deref() else {
        return;
    };
    let line = reply::quit_broadcast(nickname);
    for recipients in directory.remove(session.id) {
        for tx in &recipients {
            let _ = tx.send(line.clone());
        }
    }
}
