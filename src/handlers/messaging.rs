//! PRIVMSG delivery.

use super::Context;
use wormnet_proto::reply;

/// Deliver a message to every other member of a channel the sender
/// belongs to. Non-channel targets and channels the sender is not in are
/// dropped without a reply, and the sender never sees its own message
/// echoed back.
pub fn privmsg(ctx: &mut Context<'_>, target: &str, text: &str) {
    if !target.starts_with('#') {
        return;
    }
    if !ctx.directory.is_member(ctx.session.id, target) {
        return;
    }
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    ctx.directory
        .broadcast(target, ctx.session.id, &reply::privmsg(nickname, target, text));
}
