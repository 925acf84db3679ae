//! # Services Module
//!
//! External collaborators of the command router, behind trait seams so
//! tests can substitute fakes.

pub mod connection;

pub use connection::{TcpTransport, Transport};
