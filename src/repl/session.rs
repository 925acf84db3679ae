//! # Session State
//!
//! The logical connection state owned exclusively by the command
//! router: the target endpoint and whether the client considers itself
//! logged off.

/// Client-side connection state.
///
/// `host` and `port` may only change while the session is logged off;
/// the router enforces that precondition before calling the setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    host: String,
    port: u16,
    logged_out: bool,
}

impl SessionState {
    /// Create a session for the given endpoint. A fresh session is
    /// considered connected, matching the eager open at startup.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            logged_out: false,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_logged_out(&self) -> bool {
        self.logged_out
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn mark_logged_off(&mut self) {
        self.logged_out = true;
    }

    pub fn mark_logged_in(&mut self) {
        self.logged_out = false;
    }
}
