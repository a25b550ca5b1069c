//! Line-oriented test client.
//!
//! Speaks the raw wire protocol so tests can assert byte-exact replies.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// A test client on a raw TCP connection.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send one raw line; CRLF is appended if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. Fails on EOF.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Read lines until the predicate matches, returning everything read
    /// (the matching line included).
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Complete the PASS/NICK/USER handshake with the default password and
    /// drain through the end of the MOTD block, returning the whole burst.
    pub async fn register(
        &mut self,
        nick: &str,
        username: &str,
        realname: &str,
    ) -> anyhow::Result<Vec<String>> {
        self.send_raw("PASS ELSILRACLIHP").await?;
        self.send_raw(&format!("NICK {nick}")).await?;
        self.send_raw(&format!("USER {username} host server :{realname}"))
            .await?;
        self.recv_until(|line| line.contains(" 376 ")).await
    }

    /// PING/PONG round trip. Commands are dispatched in order on the
    /// session's own task and replies are queued in order behind this
    /// PONG, so whatever came back before the PONG is everything the
    /// earlier commands produced. Returns those earlier lines.
    pub async fn barrier(&mut self) -> anyhow::Result<Vec<String>> {
        self.send_raw("PING sync").await?;
        let mut lines = self.recv_until(|line| line.starts_with("PONG ")).await?;
        lines.pop(); // the PONG itself
        Ok(lines)
    }

    /// Assert the server closed the connection.
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
        if n == 0 {
            Ok(())
        } else {
            anyhow::bail!("expected closed connection, got: {line:?}")
        }
    }
}
