//! # Transport Session
//!
//! Owns the physical connection to the chat server. Each `open` creates
//! a fresh TCP stream and spawns a read loop that reports inbound lines
//! and connection lifecycle through a [`SessionEvent`] channel; `close`
//! aborts the read loop first, so locally requested closes never
//! surface as unsolicited-close events.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::repl::events::SessionEvent;

/// Transport collaborator required by the command router.
///
/// `open` and `send` fail with ordinary I/O errors; `close` is
/// best-effort and every caller in this crate swallows its result.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Open a connection to `host:port`, replacing any previous one.
    async fn open(&mut self, host: &str, port: u16) -> io::Result<()>;

    /// Close the connection. Idempotent; closing an already-closed
    /// transport succeeds.
    async fn close(&mut self) -> io::Result<()>;

    /// Send one payload line to the peer, verbatim, newline-terminated.
    async fn send(&mut self, line: &str) -> io::Result<()>;
}

/// TCP transport with an asynchronous read loop.
pub struct TcpTransport {
    events: mpsc::Sender<SessionEvent>,
    writer: Option<OwnedWriteHalf>,
    read_loop: Option<JoinHandle<()>>,
}

impl TcpTransport {
    /// Create a transport that reports inbound traffic on `events`.
    /// No connection is opened until [`Transport::open`] is called.
    pub fn new(events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            events,
            writer: None,
            read_loop: None,
        }
    }

    fn discard_connection(&mut self) -> Option<OwnedWriteHalf> {
        if let Some(handle) = self.read_loop.take() {
            handle.abort();
        }
        self.writer.take()
    }
}

impl Transport for TcpTransport {
    async fn open(&mut self, host: &str, port: u16) -> io::Result<()> {
        // Stale halves from an earlier connection are discarded; the
        // stream is recreated on every open.
        self.discard_connection();

        let stream = TcpStream::connect((host, port)).await?;
        tracing::info!("Connected to {host}:{port}");

        let (read_half, write_half) = stream.into_split();
        self.writer = Some(write_half);
        self.read_loop = Some(tokio::spawn(read_loop(read_half, self.events.clone())));
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        match self.discard_connection() {
            Some(mut writer) => writer.shutdown().await,
            None => Ok(()),
        }
    }

    async fn send(&mut self, line: &str) -> io::Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "transport is not open",
            ));
        };
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    }
}

/// Waits for peer data and turns it into [`SessionEvent`]s.
///
/// Runs until the peer closes, the read fails, or the task is aborted
/// by a local close.
async fn read_loop(read_half: OwnedReadHalf, events: mpsc::Sender<SessionEvent>) {
    let mut lines = BufReader::new(read_half).lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => SessionEvent::Inbound(line),
            Ok(None) => {
                tracing::debug!("Peer closed the connection");
                let _ = events.send(SessionEvent::Closed).await;
                return;
            }
            Err(err) => {
                tracing::debug!("Read loop failed: {err}");
                let _ = events
                    .send(SessionEvent::Error {
                        message: err.to_string(),
                    })
                    .await;
                return;
            }
        };
        if events.send(event).await.is_err() {
            // Receiver dropped; the client is shutting down.
            return;
        }
    }
}
