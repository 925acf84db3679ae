//! # Command Router
//!
//! The heart of the client: decides, for every line of user input,
//! whether it is a session-control directive or a payload for the
//! peer, and enforces which directives are legal in which connection
//! state.
//!
//! ## Design Principles
//!
//! - **Exclusive ownership**: the router owns [`SessionState`] and the
//!   transport handle; nothing else reads or writes them.
//! - **Side effects only**: handling a line produces display calls and
//!   transport calls. The returned [`Disposition`] tells the caller
//!   whether to keep running, so tests can observe termination without
//!   the process exiting.
//! - **Errors stop here**: every transport failure is converted to
//!   display output at this boundary. The only intentional swallows
//!   are the best-effort closes during quit and logoff.

use crate::repl::events::SessionEvent;
use crate::repl::services::Transport;
use crate::repl::session::SessionState;
use crate::repl::views::ViewRenderer;

/// A recognized session-control directive.
///
/// The first whitespace-delimited token decides the directive,
/// case-sensitively. Lines that match nothing here are payloads,
/// including unrecognized `#` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Quit,
    Logoff,
    Login,
    GetHost,
    GetPort,
    SetHost(Option<String>),
    SetPort(Option<String>),
}

impl Directive {
    /// Parse one input line; `None` means the line is a payload.
    pub fn parse(line: &str) -> Option<Directive> {
        let mut tokens = line.split_whitespace();
        let directive = match tokens.next()? {
            "#quit" => Directive::Quit,
            "#logoff" => Directive::Logoff,
            "#login" => Directive::Login,
            "#gethost" => Directive::GetHost,
            "#getport" => Directive::GetPort,
            "#sethost" => Directive::SetHost(tokens.next().map(str::to_string)),
            "#setport" => Directive::SetPort(tokens.next().map(str::to_string)),
            _ => return None,
        };
        Some(directive)
    }
}

/// Whether the caller should keep running after handling a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Continue,
    Quit,
}

/// Routes user input and transport events; owns the session state.
pub struct CommandRouter<T: Transport, V: ViewRenderer> {
    session: SessionState,
    transport: T,
    view: V,
}

impl<T: Transport, V: ViewRenderer> CommandRouter<T, V> {
    pub fn new(session: SessionState, transport: T, view: V) -> Self {
        Self {
            session,
            transport,
            view,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Eagerly open the connection to the configured endpoint. Called
    /// once at startup; a failure here is a bootstrap error, not a
    /// routing concern.
    pub async fn connect(&mut self) -> std::io::Result<()> {
        self.transport
            .open(self.session.host(), self.session.port())
            .await
    }

    /// Handle one line of user input.
    pub async fn handle(&mut self, line: &str) -> Disposition {
        match Directive::parse(line) {
            Some(Directive::Quit) => self.quit().await,
            Some(Directive::Logoff) => self.logoff().await,
            Some(Directive::Login) => self.login().await,
            Some(Directive::GetHost) => {
                self.view
                    .display(&format!("Host is {}", self.session.host()));
                Disposition::Continue
            }
            Some(Directive::GetPort) => {
                self.view
                    .display(&format!("Port is {}", self.session.port()));
                Disposition::Continue
            }
            Some(Directive::SetHost(value)) => {
                self.set_host(value);
                Disposition::Continue
            }
            Some(Directive::SetPort(value)) => {
                self.set_port(value);
                Disposition::Continue
            }
            None => self.forward(line).await,
        }
    }

    /// Handle one asynchronous transport event.
    pub async fn on_event(&mut self, event: SessionEvent) -> Disposition {
        match event {
            SessionEvent::Inbound(payload) => {
                self.view.display(&payload);
                Disposition::Continue
            }
            SessionEvent::Closed => {
                self.view.display("Connection has been closed");
                Disposition::Continue
            }
            SessionEvent::Error { message } => {
                tracing::error!("Receive loop failed: {message}");
                self.view.display("The server has shut down.\n> I am quitting.");
                self.quit().await
            }
        }
    }

    async fn quit(&mut self) -> Disposition {
        self.close_best_effort("quit").await;
        Disposition::Quit
    }

    async fn logoff(&mut self) -> Disposition {
        self.close_best_effort("logoff").await;
        self.session.mark_logged_off();
        self.view.display("Logged off");
        Disposition::Continue
    }

    async fn login(&mut self) -> Disposition {
        if !self.session.is_logged_out() {
            self.view
                .display("Error: Please log out first before logging in");
            return Disposition::Continue;
        }
        match self.connect().await {
            // Only a successful open moves the session back to the
            // connected state.
            Ok(()) => self.session.mark_logged_in(),
            Err(err) => self.view.display(&format!("Error connecting {err}")),
        }
        Disposition::Continue
    }

    fn set_host(&mut self, value: Option<String>) {
        if !self.session.is_logged_out() {
            self.view
                .display("Error: Please log off first to change host");
            return;
        }
        match value {
            Some(host) => {
                let message = format!("Host set to {host}");
                self.session.set_host(host);
                self.view.display(&message);
            }
            None => self.view.display("Error: #sethost requires a value"),
        }
    }

    fn set_port(&mut self, value: Option<String>) {
        if !self.session.is_logged_out() {
            self.view
                .display("Error: Please log off first to change port");
            return;
        }
        let Some(raw) = value else {
            self.view.display("Error: #setport requires a value");
            return;
        };
        match raw.parse::<u16>() {
            Ok(port) => {
                self.session.set_port(port);
                self.view.display(&format!("Port set to {port}"));
            }
            Err(_) => self.view.display("Error: Port must be an integer"),
        }
    }

    async fn forward(&mut self, line: &str) -> Disposition {
        if self.session.is_logged_out() {
            self.view
                .display("Error: Please log in first to send messages");
            return Disposition::Continue;
        }
        match self.transport.send(line).await {
            Ok(()) => Disposition::Continue,
            Err(err) => {
                tracing::error!("Send failed: {err}");
                self.view
                    .display("Could not send message to server. Terminating client.");
                self.quit().await
            }
        }
    }

    async fn close_best_effort(&mut self, reason: &str) {
        if let Err(err) = self.transport.close().await {
            tracing::debug!("Ignoring close failure during {reason}: {err}");
        }
    }
}
