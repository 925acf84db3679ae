//! # Chatline Main Entry Point
//!
//! Command-driven chat client over a single TCP connection.

use anyhow::Result;
use chatline::cmd_args::CommandLineArgs;
use chatline::AppController;

/// Environment variable controlling log verbosity (error/warn/info/debug/trace).
const LOG_LEVEL_ENV_VAR: &str = "CHATLINE_LOG_LEVEL";

fn init_tracing() {
    let log_level = std::env::var(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR, // Default to ERROR to keep the console clean
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing first before any other logs
    init_tracing();

    let args = CommandLineArgs::parse();

    // Create the application controller; the connection is opened in run()
    let mut app = AppController::new(args)?;

    // Print welcome message before starting
    println!("Chatline terminal chat client");
    println!("Session commands: #quit, #logoff, #login, #gethost, #getport");
    println!("                  #sethost <host>, #setport <port>");
    println!("Anything else is sent to the server as-is.\n");

    // Run the application
    app.run().await?;

    Ok(())
}
