//! # Chatline - Command-Driven Terminal Chat Client
//!
//! A terminal client that keeps a single logical connection to a chat
//! server, routes user input either to local session control or to the
//! remote peer, and reflects peer messages back onto the console.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  lines   ┌───────────────┐  open/close/send  ┌───────────┐
//! │  stdin   │─────────►│ CommandRouter │──────────────────►│ Transport │
//! └──────────┘          │               │                   │  (TCP)    │
//! ┌──────────┐  display │ - directives  │   SessionEvents   └───────────┘
//! │ Renderer │◄─────────│ - SessionState│◄──────────────────── read loop
//! └──────────┘          └───────────────┘    (mpsc channel)
//! ```
//!
//! Lines starting with a recognized `#` directive mutate session state
//! locally; everything else is forwarded verbatim to the peer. Inbound
//! traffic and connection lifecycle notifications arrive as
//! [`SessionEvent`]s over a channel, so the router never needs
//! callbacks or locks.

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
