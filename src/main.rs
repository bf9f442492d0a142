use anyhow::Result;
use clap::Parser;
use marcador::app::App;
use marcador::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .init();

    // Subcommands run without the TUI
    if let Some(command) = cli.command.take() {
        return cli::handle_command(command, cli.dry_run);
    }

    // Create and initialize the application
    let mut app = App::new(&cli)?;

    // Resolve and load the bookmark collection
    app.initialize_collection(&cli)?;

    // Run the application
    app.run().await?;

    Ok(())
}
