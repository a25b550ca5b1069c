//! Registered-session records as the directory sees them.

use crate::state::SessionId;
use std::collections::BTreeSet;
use std::net::IpAddr;
use tokio::sync::mpsc::UnboundedSender;

/// A registered session. Created when registration completes, dropped on
/// disconnect. The owning connection task keeps its own working copy of
/// the identity fields; this record is what cross-session queries and
/// broadcasts read, always under the directory lock.
pub struct User {
    pub id: SessionId,
    pub nickname: String,
    pub username: String,
    /// Opaque payload from the USER command; echoed verbatim in WHO.
    pub realname: Option<String>,
    pub ip: IpAddr,
    /// Channels this session is a member of. The matching channel member
    /// sets are updated in the same critical section, always.
    pub channels: BTreeSet<String>,
    /// Outbound queue of this session's writer task.
    pub tx: UnboundedSender<String>,
}

/// One row of a WHO response, with the empty-field fallbacks already
/// applied: a missing realname becomes the nickname, a missing username
/// becomes the literal `user`. The wire format never carries an empty
/// field.
pub struct WhoRow {
    pub channel: String,
    pub username: String,
    pub ip: IpAddr,
    pub nickname: String,
    pub realname: String,
}

impl User {
    pub(super) fn who_row(&self, channel: String) -> WhoRow {
        let realname = match self.realname.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => self.nickname.clone(),
        };
        let username = if self.username.is_empty() {
            "user".to_string()
        } else {
            self.username.clone()
        };
        WhoRow {
            channel,
            username,
            ip: self.ip,
            nickname: self.nickname.clone(),
            realname,
        }
    }
}
