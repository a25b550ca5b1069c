//! MOTD.

use super::Context;
use wormnet_proto::reply;

/// Send the full MOTD block: numeral 375, one 372 per line, numeral 376.
/// Also used for the post-registration welcome burst. The MOTD file, when
/// configured, is re-read on every send.
pub fn motd(ctx: &mut Context<'_>) {
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    let host = &ctx.config.server.name;
    ctx.session.send(reply::motd_start(host, nickname));
    for line in ctx.config.motd.load_lines() {
        ctx.session.send(reply::motd_line(host, nickname, &line));
    }
    ctx.session.send(reply::motd_end(host, nickname));
}
