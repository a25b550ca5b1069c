//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines out of an arbitrarily fragmented byte
//! stream and writes outgoing lines with CRLF termination. Decoding is
//! deliberately permissive: a lone LF terminates a line, a trailing CR is
//! stripped, and invalid UTF-8 is replaced rather than rejected - the
//! legacy client must never be able to kill its own connection with a
//! stray byte. Partial fragments stay buffered until a terminator arrives.

use bytes::{BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

/// Newline-delimited line codec.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Index of the next byte to scan for a newline, so already-scanned
    /// prefixes are not re-scanned on the next read.
    next_index: usize,
}

impl LineCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            let text = String::from_utf8_lossy(&line);
            Ok(Some(
                text.trim_end_matches(&['\r', '\n'][..]).to_string(),
            ))
        } else {
            // No complete line yet - remember where we stopped.
            self.next_index = src.len();
            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> io::Result<()> {
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
