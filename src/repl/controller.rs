//! # Application Controller
//!
//! Wires user input and transport events into the command router and
//! runs the main loop. Both paths are handled on this one task, so
//! session state and the transport handle never see concurrent access.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::cmd_args::CommandLineArgs;
use crate::config;
use crate::repl::command::{CommandRouter, Disposition};
use crate::repl::events::SessionEvent;
use crate::repl::services::TcpTransport;
use crate::repl::session::SessionState;
use crate::repl::views::{ConsoleRenderer, ViewRenderer};

/// The main application controller.
pub struct AppController<V: ViewRenderer> {
    router: CommandRouter<TcpTransport, V>,
    events: mpsc::Receiver<SessionEvent>,
    should_quit: bool,
}

impl AppController<ConsoleRenderer> {
    /// Create a controller rendering onto the console.
    pub fn new(args: CommandLineArgs) -> Result<Self> {
        Self::with_view(args, ConsoleRenderer::new())
    }
}

impl<V: ViewRenderer> AppController<V> {
    /// Create a controller with an injected display surface.
    pub fn with_view(args: CommandLineArgs, view: V) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let store = config::IniProfileStore::new(&profile_path);
        let profile = match store.get_profile(args.profile())? {
            Some(profile) => profile,
            None => {
                tracing::debug!(
                    "Profile '{}' not found, using blank profile",
                    args.profile()
                );
                Default::default()
            }
        };

        let (host, port) = config::resolve_endpoint(&args, &profile);
        if args.verbose() {
            println!("Using endpoint {host}:{port} (profile '{}')", args.profile());
        }

        let (events_tx, events_rx) = mpsc::channel(10);
        let transport = TcpTransport::new(events_tx);
        let session = SessionState::new(host, port);

        Ok(Self {
            router: CommandRouter::new(session, transport, view),
            events: events_rx,
            should_quit: false,
        })
    }

    /// Run the main loop until the router requests termination.
    ///
    /// The connection is opened eagerly before any input is read; a
    /// failure at this point is a startup error rather than a routed
    /// one.
    pub async fn run(&mut self) -> Result<()> {
        let host = self.router.session().host().to_string();
        let port = self.router.session().port();
        self.router
            .connect()
            .await
            .with_context(|| format!("Failed to connect to {host}:{port}"))?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while !self.should_quit {
            self.router.view_mut().show_prompt();
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.router.handle(&line).await == Disposition::Quit {
                            self.should_quit = true;
                        }
                    }
                    None => {
                        // End of input: leave the same way #quit does.
                        self.router.handle("#quit").await;
                        self.should_quit = true;
                    }
                },
                event = self.events.recv() => {
                    if let Some(event) = event {
                        if self.router.on_event(event).await == Disposition::Quit {
                            self.should_quit = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
