//! The process-wide registry of registered sessions and channel
//! membership, guarded by a single mutex.
//!
//! Membership is denormalized: each channel keeps a set of member
//! nicknames, and each session record keeps the set of channels it is in.
//! Both sides of the relation are always edited in the same critical
//! section. Nickname uniqueness is not enforced, so member sets are
//! nickname sets - a nickname leaves a member set only when no remaining
//! session with that nickname is still in the channel.
//!
//! No I/O happens under the lock. Operations that fan lines out snapshot
//! the recipients' queue handles while holding the lock and push onto the
//! queues after releasing it.

use crate::config::Config;
use crate::state::{SessionId, User, WhoRow};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::mpsc::UnboundedSender;

/// A statically configured chat room. Created once at startup, never
/// destroyed; only the member set changes.
struct Channel {
    topic: String,
    members: BTreeSet<String>,
}

struct Inner {
    /// Registered sessions, in registration order. A session appears here
    /// iff it has completed registration.
    sessions: Vec<User>,
    /// Channel map keyed by name with the leading `#`.
    channels: BTreeMap<String, Channel>,
}

/// Shared directory of registered sessions and channels.
pub struct Directory {
    inner: Mutex<Inner>,
}

/// Everything a JOIN needs, snapshotted in one critical section.
pub struct JoinSnapshot {
    /// Channel topic for the 332 reply.
    pub topic: String,
    /// Space-joined member nicknames, the joiner included.
    pub names: String,
    /// Queue handles of every other member at join time.
    pub others: Vec<UnboundedSender<String>>,
}

/// One row of a LIST response.
pub struct ChannelSummary {
    pub name: String,
    pub member_count: usize,
    pub topic: String,
}

impl Directory {
    /// Build the channel map from configuration. Called once at startup.
    pub fn new(config: &Config) -> Self {
        let channels = config
            .channels
            .iter()
            .map(|(name, ch)| {
                (
                    format!("#{name}"),
                    Channel {
                        topic: ch.display_topic(),
                        members: BTreeSet::new(),
                    },
                )
            })
            .collect();
        Self {
            inner: Mutex::new(Inner {
                sessions: Vec::new(),
                channels,
            }),
        }
    }

    /// Insert a freshly registered session.
    pub fn insert(&self, user: User) {
        self.inner.lock().sessions.push(user);
    }

    /// Add a session to a channel. `None` means the join was a silent
    /// no-op: unknown channel, unregistered session, or already a member.
    pub fn join(&self, id: SessionId, chan: &str) -> Option<JoinSnapshot> {
        let mut inner = self.inner.lock();
        let Inner { sessions, channels } = &mut *inner;
        let channel = channels.get_mut(chan)?;

        let nickname = {
            let user = sessions.iter_mut().find(|u| u.id == id)?;
            if !user.channels.insert(chan.to_string()) {
                return None;
            }
            user.nickname.clone()
        };
        channel.members.insert(nickname);

        let topic = channel.topic.clone();
        let names = channel
            .members
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let others = sessions
            .iter()
            .filter(|u| u.id != id && u.channels.contains(chan))
            .map(|u| u.tx.clone())
            .collect();
        Some(JoinSnapshot {
            topic,
            names,
            others,
        })
    }

    /// Remove a session from a channel it is a member of, returning the
    /// remaining members' queue handles (snapshotted before the edit is
    /// visible to anyone else). `None` if the session was not a member.
    pub fn part(&self, id: SessionId, chan: &str) -> Option<Vec<UnboundedSender<String>>> {
        let mut inner = self.inner.lock();
        let Inner { sessions, channels } = &mut *inner;

        let nickname = {
            let user = sessions.iter_mut().find(|u| u.id == id)?;
            if !user.channels.remove(chan) {
                return None;
            }
            user.nickname.clone()
        };

        let others: Vec<_> = sessions
            .iter()
            .filter(|u| u.id != id && u.channels.contains(chan))
            .map(|u| u.tx.clone())
            .collect();

        let still_present = sessions
            .iter()
            .any(|u| u.nickname == nickname && u.channels.contains(chan));
        if !still_present {
            if let Some(channel) = channels.get_mut(chan) {
                channel.members.remove(&nickname);
            }
        }
        Some(others)
    }

    /// Drop a session entirely: out of every member set and out of the
    /// session list. Returns, per channel the session belonged to, the
    /// queue handles of the members left behind, for the quit broadcast.
    /// Unknown ids (never registered) return nothing.
    pub fn remove(&self, id: SessionId) -> Vec<Vec<UnboundedSender<String>>> {
        let mut inner = self.inner.lock();
        let Inner { sessions, channels } = &mut *inner;
        let Some(pos) = sessions.iter().position(|u| u.id == id) else {
            return Vec::new();
        };
        let user = sessions.remove(pos);

        let mut recipients = Vec::with_capacity(user.channels.len());
        for chan in &user.channels {
            recipients.push(
                sessions
                    .iter()
                    .filter(|u| u.channels.contains(chan))
                    .map(|u| u.tx.clone())
                    .collect(),
            );
            let still_present = sessions
                .iter()
                .any(|u| u.nickname == user.nickname && u.channels.contains(chan));
            if !still_present {
                if let Some(channel) = channels.get_mut(chan) {
                    channel.members.remove(&user.nickname);
                }
            }
        }
        recipients
    }

    /// Rename a registered session, rewriting every affected member set in
    /// the same critical section so membership stays consistent.
    pub fn rename(&self, id: SessionId, new_nick: &str) {
        let mut inner = self.inner.lock();
        let Inner { sessions, channels } = &mut *inner;
        let Some(pos) = sessions.iter().position(|u| u.id == id) else {
            return;
        };
        let old_nick = std::mem::replace(&mut sessions[pos].nickname, new_nick.to_string());
        let joined: Vec<String> = sessions[pos].channels.iter().cloned().collect();
        for chan in joined {
            let Some(channel) = channels.get_mut(&chan) else {
                continue;
            };
            let old_still_present = sessions
                .iter()
                .any(|u| u.nickname == old_nick && u.channels.contains(&chan));
            if !old_still_present {
                channel.members.remove(&old_nick);
            }
            channel.members.insert(new_nick.to_string());
        }
    }

    /// Refresh username/realname after a repeat USER command. A realname
    /// of `None` leaves the stored payload untouched.
    pub fn update_identity(&self, id: SessionId, username: &str, realname: Option<&str>) {
        let mut inner = self.inner.lock();
        if let Some(user) = inner.sessions.iter_mut().find(|u| u.id == id) {
            user.username = username.to_string();
            if let Some(realname) = realname {
                user.realname = Some(realname.to_string());
            }
        }
    }

    /// Deliver a pre-formatted line to every member of a channel except
    /// `exclude`. Recipients are snapshotted under the lock; pushes happen
    /// after release, and a torn-down recipient is skipped without
    /// affecting the rest.
    pub fn broadcast(&self, chan: &str, exclude: SessionId, line: &str) {
        let targets: Vec<UnboundedSender<String>> = {
            let inner = self.inner.lock();
            inner
                .sessions
                .iter()
                .filter(|u| u.id != exclude && u.channels.contains(chan))
                .map(|u| u.tx.clone())
                .collect()
        };
        for tx in targets {
            let _ = tx.send(line.to_string());
        }
    }

    /// Whether a session is currently a member of a channel.
    pub fn is_member(&self, id: SessionId, chan: &str) -> bool {
        self.inner
            .lock()
            .sessions
            .iter()
            .any(|u| u.id == id && u.channels.contains(chan))
    }

    /// Space-joined member nicknames, or `None` for an unknown channel.
    pub fn names(&self, chan: &str) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .channels
            .get(chan)
            .map(|c| c.members.iter().cloned().collect::<Vec<_>>().join(" "))
    }

    /// Every configured channel with its current member count.
    pub fn list(&self) -> Vec<ChannelSummary> {
        let inner = self.inner.lock();
        inner
            .channels
            .iter()
            .map(|(name, channel)| ChannelSummary {
                name: name.clone(),
                member_count: channel.members.len(),
                topic: channel.topic.clone(),
            })
            .collect()
    }

    /// WHO rows for one channel, or `None` if the channel is unknown.
    /// The channel column carries the real channel name.
    pub fn who_channel(&self, chan: &str) -> Option<Vec<WhoRow>> {
        let inner = self.inner.lock();
        if !inner.channels.contains_key(chan) {
            return None;
        }
        Some(
            inner
                .sessions
                .iter()
                .filter(|u| u.channels.contains(chan))
                .map(|u| u.who_row(chan.to_string()))
                .collect(),
        )
    }

    /// WHO rows for every registered session. The channel column shows one
    /// channel the session is in, or `*` when it is in none.
    pub fn who_all(&self) -> Vec<WhoRow> {
        let inner = self.inner.lock();
        inner
            .sessions
            .iter()
            .map(|u| {
                let channel = u
                    .channels
                    .iter()
                    .next()
                    .cloned()
                    .unwrap_or_else(|| "*".to_string());
                u.who_row(channel)
            })
            .collect()
    }
}
