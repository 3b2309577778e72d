//! # Storefront Console Entry Point
//!
//! Reads commands from stdin, one per line, and prints results to stdout.
//! Logs go to stderr; set `RUST_LOG` to adjust them.
//!
//! ## Startup Sequence
//! 1. Load configuration from `SIGNBOARD_*` environment variables
//! 2. Initialize tracing
//! 3. Connect to the database and run migrations
//! 4. Loop: read a line, parse, execute, print

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use signboard_storefront::config::StorefrontConfig;
use signboard_storefront::console::{self, ConsoleCommand};
use signboard_storefront::{init_tracing, Storefront};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::load()?;
    init_tracing();

    let app = Storefront::start(config).await?;

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout
        .write_all(b"Signboard storefront. Type `help` for commands.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let output = match ConsoleCommand::parse(&line) {
            Ok(None) => None,
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(command)) => match console::execute(&app, command).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(code = ?e.code, "Command failed");
                    Some(format!("error: {}", e))
                }
            },
            Err(message) => Some(message),
        };

        if let Some(text) = output {
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    info!("Console closed");
    app.shutdown().await;
    Ok(())
}
