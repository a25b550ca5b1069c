//! WHO queries.

use super::Context;
use wormnet_proto::reply;

/// WHO against a known channel lists that channel's members, the channel
/// column carrying the real channel name - the legacy client refuses to
/// populate its player list from wildcard rows. Any other form lists
/// every registered session and normalizes the terminator target to `*`.
pub fn who(ctx: &mut Context<'_>, target: Option<&str>) {
    let Some(nickname) = ctx.session.nickname.clone() else {
        return;
    };
    let host = ctx.config.server.name.clone();

    let (rows, end_target) = match target {
        Some(t) if t.starts_with('#') => match ctx.directory.who_channel(t) {
            Some(rows) => (rows, t.to_string()),
            None => (ctx.directory.who_all(), "*".to_string()),
        },
        _ => (ctx.directory.who_all(), "*".to_string()),
    };

    for row in rows {
        ctx.session.send(reply::who_reply(
            &host,
            &nickname,
            &row.channel,
            &row.username,
            row.ip,
            &row.nickname,
            &row.realname,
        ));
    }
    ctx.session.send(reply::who_end(&host, &nickname, &end_target));
}
