//! Nickname legality.
//!
//! The rules match what the historical WormNET population was allowed to
//! register: an ASCII letter first, then up to fourteen characters drawn
//! from letters, digits, and a small set of specials. Note the set differs
//! from RFC 2812 - a backslash is not permitted, and neither is a special
//! in first position.

/// Maximum nickname length, first character included.
pub const MAX_NICK_LEN: usize = 15;

/// Specials permitted after the first character: `` - ` | [ ] { } _ ^ ``
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '-' | '`' | '|' | '[' | ']' | '{' | '}' | '_' | '^')
}

/// Extension trait for checking nickname legality.
pub trait NickExt {
    /// Check whether this string is a legal nickname. Illegal values are
    /// silently dropped by the registration logic - no reply numeral ever
    /// tells the client its nickname was refused.
    fn is_valid_nick(&self) -> bool;
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        if self.is_empty() || self.len() > MAX_NICK_LEN {
            return false;
        }

        let mut chars = self.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c))
    }
}
