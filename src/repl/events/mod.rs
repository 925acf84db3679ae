//! # Events Module
//!
//! Events delivered from the transport's read loop to the controller.
//! Using a plain enum over an mpsc channel keeps the router free of
//! callbacks and virtual dispatch.

pub mod session_events;

pub use session_events::SessionEvent;
