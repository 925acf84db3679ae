//! # View Renderer
//!
//! Display seam between the command router and the terminal. The
//! router only ever hands over finished strings; rendering never fails
//! back into the caller.

/// A surface that accepts a string and renders it.
pub trait ViewRenderer {
    /// Render one message. Fire-and-forget from the router's
    /// perspective.
    fn display(&mut self, message: &str);

    /// Hook for interactive prompts; non-interactive surfaces ignore
    /// it.
    fn show_prompt(&mut self) {}
}

/// Renders onto stdout, with a `> ` prompt when stdin is a terminal.
pub struct ConsoleRenderer {
    interactive: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin),
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for ConsoleRenderer {
    fn display(&mut self, message: &str) {
        println!("{message}");
    }

    fn show_prompt(&mut self) {
        if self.interactive {
            use std::io::Write;
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    }
}
