//! Server-to-client line construction.
//!
//! The legacy game client parses these replies rigidly - a reordered
//! field, a missing colon, or an empty slot makes it hang or silently
//! fail to navigate the lobby. Every format in this module is frozen.

use std::net::IpAddr;

/// 001 RPL_WELCOME
pub fn welcome(host: &str, nick: &str) -> String {
    format!(":{host} 001 {nick} :Welcome {nick}")
}

/// 002 RPL_YOURHOST
pub fn your_host(host: &str, nick: &str) -> String {
    format!(":{host} 002 {nick} :Your host is {host}")
}

/// 003 RPL_CREATED
pub fn created(host: &str, nick: &str) -> String {
    format!(":{host} 003 {nick} :This server was created today")
}

/// 004 RPL_MYINFO
pub fn my_info(host: &str, nick: &str) -> String {
    format!(":{host} 004 {nick} {host} WormNET 0 0 0")
}

/// 005 RPL_ISUPPORT
pub fn isupport(host: &str, nick: &str) -> String {
    format!(":{host} 005 {nick} CHANTYPES=# :are supported by this server")
}

/// 315 RPL_ENDOFWHO - `target` is the channel asked about, or `*` when the
/// query was not a known channel.
pub fn who_end(host: &str, asker: &str, target: &str) -> String {
    format!(":{host} 315 {asker} {target} :End of /WHO list")
}

/// 321 RPL_LISTSTART
pub fn list_start(host: &str, nick: &str) -> String {
    format!(":{host} 321 {nick} Channel :Users Name")
}

/// 322 RPL_LIST
pub fn list_entry(host: &str, nick: &str, chan: &str, count: usize, topic: &str) -> String {
    format!(":{host} 322 {nick} {chan} {count} :{topic}")
}

/// 323 RPL_LISTEND
pub fn list_end(host: &str, nick: &str) -> String {
    format!(":{host} 323 {nick} :End of /LIST")
}

/// 324 RPL_CHANNELMODEIS - the flag string is always the bare `+`.
pub fn channel_mode_is(host: &str, nick: &str, target: &str) -> String {
    format!(":{host} 324 {nick} {target} +")
}

/// 332 RPL_TOPIC
pub fn topic(host: &str, nick: &str, chan: &str, topic: &str) -> String {
    format!(":{host} 332 {nick} {chan} :{topic}")
}

/// 352 RPL_WHOREPLY - the trailing field carries the user's realname
/// payload verbatim (the client packs version and locale flags into it).
/// `chan` must be the real channel name when a channel was asked about,
/// never a wildcard.
pub fn who_reply(
    host: &str,
    asker: &str,
    chan: &str,
    username: &str,
    ip: IpAddr,
    nick: &str,
    realname: &str,
) -> String {
    format!(":{host} 352 {asker} {chan} ~{username} {ip} {host} {nick} H :0 {realname}")
}

/// 353 RPL_NAMREPLY
pub fn names_reply(host: &str, nick: &str, chan: &str, nicks: &str) -> String {
    format!(":{host} 353 {nick} = {chan} :{nicks}")
}

/// 366 RPL_ENDOFNAMES
pub fn names_end(host: &str, nick: &str, chan: &str) -> String {
    format!(":{host} 366 {nick} {chan} :End of /NAMES list")
}

/// 372 RPL_MOTD
pub fn motd_line(host: &str, nick: &str, line: &str) -> String {
    format!(":{host} 372 {nick} :- {line}")
}

/// 375 RPL_MOTDSTART
pub fn motd_start(host: &str, nick: &str) -> String {
    format!(":{host} 375 {nick} :- {host} Message of the Day -")
}

/// 376 RPL_ENDOFMOTD
pub fn motd_end(host: &str, nick: &str) -> String {
    format!(":{host} 376 {nick} :End of /MOTD command.")
}

/// 464 ERR_PASSWDMISMATCH - the only rejection the protocol ever sends.
pub fn password_mismatch(host: &str) -> String {
    format!(":{host} 464 * :Password incorrect")
}

/// PONG - the client's token is not echoed; only the host identity is.
pub fn pong(host: &str) -> String {
    format!("PONG {host}")
}

/// JOIN as seen by channel members. The colon before the channel name is
/// mandatory.
pub fn join(nick: &str, username: &str, ip: IpAddr, chan: &str) -> String {
    format!(":{nick}!~{username}@{ip} JOIN :{chan}")
}

/// PART as broadcast to the channel, leaver included.
pub fn part(nick: &str, chan: &str) -> String {
    format!(":{nick} PART {chan}")
}

/// PRIVMSG as delivered to the other members.
pub fn privmsg(nick: &str, chan: &str, text: &str) -> String {
    format!(":{nick} PRIVMSG {chan} :{text}")
}

/// QUIT as broadcast to each channel the session belonged to.
pub fn quit_broadcast(nick: &str) -> String {
    format!(":{nick} QUIT :Client disconnected")
}
