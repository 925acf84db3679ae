//! # Views Module
//!
//! The display surface the router renders feedback and peer messages
//! onto.

pub mod renderer;

pub use renderer::{ConsoleRenderer, ViewRenderer};
