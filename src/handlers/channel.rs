//! Channel membership and channel queries: JOIN, PART, NAMES, LIST, MODE.

use super::Context;
use wormnet_proto::reply;

/// JOIN accepts a comma-separated channel list. Unknown channels and
/// repeat joins are skipped without a reply; channels are never created
/// dynamically. For each join, the JOIN line goes to the joiner and every
/// existing member, then the joiner gets the topic and a NAMES pair.
pub fn join(ctx: &mut Context<'_>, names: &[String]) {
    let Some(nickname) = ctx.session.nickname.clone() else {
        return;
    };
    let host = ctx.config.server.name.clone();
    let username = ctx.session.username.clone().unwrap_or_default();
    let ip = ctx.session.addr.ip();

    for name in names {
        let Some(snapshot) = ctx.directory.join(ctx.session.id, name) else {
            continue;
        };

        let join_line = reply::join(&nickname, &username, ip, name);
        ctx.session.send(join_line.clone());
        for tx in &snapshot.others {
            let _ = tx.send(join_line.clone());
        }

        ctx.session.send(reply::topic(&host, &nickname, name, &snapshot.topic));
        ctx.session.send(reply::names_reply(&host, &nickname, name, &snapshot.names));
        ctx.session.send(reply::names_end(&host, &nickname, name));
    }
}

/// PART requires membership. The notice reaches the leaver and every
/// member present before the removal.
pub fn part(ctx: &mut Context<'_>, name: &str) {
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    let Some(others) = ctx.directory.part(ctx.session.id, name) else {
        return;
    };

    let line = reply::part(nickname, name);
    ctx.session.send(line.clone());
    for tx in &others {
        let _ = tx.send(line.clone());
    }
}

/// NAMES for one channel; an unknown name is silently ignored.
pub fn names(ctx: &mut Context<'_>, name: &str) {
    let Some(joined) = ctx.directory.names(name) else {
        return;
    };
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    let host = &ctx.config.server.name;
    ctx.session.send(reply::names_reply(host, nickname, name, &joined));
    ctx.session.send(reply::names_end(host, nickname, name));
}

/// LIST enumerates every configured channel with its member count.
pub fn list(ctx: &mut Context<'_>) {
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    let host = &ctx.config.server.name;
    ctx.session.send(reply::list_start(host, nickname));
    for summary in ctx.directory.list() {
        ctx.session.send(reply::list_entry(
            host,
            nickname,
            &summary.name,
            summary.member_count,
            &summary.topic,
        ));
    }
    ctx.session.send(reply::list_end(host, nickname));
}

/// MODE always reports the bare `+` flag set; the legacy client only
/// needs the acknowledgement.
pub fn mode(ctx: &mut Context<'_>, target: &str) {
    let Some(nickname) = ctx.session.nickname.as_deref() else {
        return;
    };
    ctx.session
        .send(reply::channel_mode_is(&ctx.config.server.name, nickname, target));
}
