//! Connection - handles an individual client connection.
//!
//! Each connection runs in its own tokio task. The socket is split: this
//! task owns the read side and dispatches one line at a time; a dedicated
//! writer task drains the session's outbound queue, so no lock is ever
//! held across a socket write and a stalled peer only ever stalls itself.
//!
//! The session ends on EOF, on a transport error, on QUIT, or on the one
//! registration rejection (numeral 464). All four paths converge on the
//! same cleanup.

use crate::config::Config;
use crate::handlers::{self, Context, DispatchResult};
use crate::state::{Directory, SessionId};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tokio_util::codec::{FramedRead, FramedWrite};
use wormnet_proto::{Command, LineCodec};

/// Per-connection state, owned exclusively by the connection's task.
/// Identity fields are read and written without any lock; everything that
/// crosses sessions goes through the directory.
pub struct Session {
    pub id: SessionId,
    pub addr: SocketAddr,
    pub nickname: Option<String>,
    pub username: Option<String>,
    /// Opaque USER payload, forwarded verbatim in WHO replies.
    pub realname: Option<String>,
    /// Credential presented via PASS, held until the registration check.
    pub password: Option<String>,
    pub registered: bool,
    tx: mpsc::UnboundedSender<String>,
}

impl Session {
    fn new(id: SessionId, addr: SocketAddr, tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            addr,
            nickname: None,
            username: None,
            realname: None,
            password: None,
            registered: false,
            tx,
        }
    }

    /// Queue a line for this session's writer. A torn-down writer is
    /// ignored; the read side observes the broken transport and cleans up.
    pub fn send(&self, line: String) {
        let _ = self.tx.send(line);
    }

    /// Queue handle for the directory's session record.
    pub fn sender(&self) -> mpsc::UnboundedSender<String> {
        self.tx.clone()
    }
}

/// A client connection handler.
pub struct Connection {
    id: SessionId,
    stream: TcpStream,
    addr: SocketAddr,
    config: Arc<Config>,
    directory: Arc<Directory>,
}

impl Connection {
    pub fn new(
        id: SessionId,
        stream: TcpStream,
        addr: SocketAddr,
        config: Arc<Config>,
        directory: Arc<Directory>,
    ) -> Self {
        Self {
            id,
            stream,
            addr,
            config,
            directory,
        }
    }

    /// Run the connection read loop until the session ends, then clean up.
    pub async fn run(self) -> anyhow::Result<()> {
        let Connection {
            id,
            stream,
            addr,
            config,
            directory,
        } = self;

        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::new());
        let mut writer = FramedWrite::new(write_half, LineCodec::new());

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                debug!(%addr, line = %line, "Line sent");
                if writer.send(line).await.is_err() {
                    break;
                }
            }
        });

        let mut session = Session::new(id, addr, tx);

        while let Some(item) = reader.next().await {
            let line = match item {
                Ok(line) => line,
                Err(e) => {
                    debug!(%addr, error = %e, "Transport error");
                    break;
                }
            };
            if line.is_empty() {
                continue;
            }
            debug!(%addr, line = %line, "Line received");

            let Some(command) = Command::parse(&line) else {
                continue;
            };
            let mut ctx = Context {
                session: &mut session,
                directory: &directory,
                config: &config,
            };
            if let DispatchResult::Quit = handlers::dispatch(&mut ctx, command) {
                break;
            }
        }

        if session.registered {
            info!(%addr, nick = ?session.nickname, "Client disconnecting");
        } else {
            info!(%addr, "Client disconnected before registering");
        }
        handlers::cleanup(&session, &directory);
        Ok(())
    }
}
