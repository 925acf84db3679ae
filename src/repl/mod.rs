//! # REPL Implementation
//!
//! This module contains the interactive client loop and its
//! collaborators. All components are designed with clear separation of
//! concerns and testability: the router owns session state, the
//! transport and renderer sit behind traits, and inbound traffic
//! arrives as events over a channel.

pub mod command;
pub mod controller;
pub mod events;
pub mod services;
pub mod session;
pub mod views;

// Re-export core types
pub use command::{CommandRouter, Directive, Disposition};
pub use controller::AppController;
pub use events::SessionEvent;
pub use services::{TcpTransport, Transport};
pub use session::SessionState;
pub use views::{ConsoleRenderer, ViewRenderer};
