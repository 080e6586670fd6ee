//! mygo - A unified MySQL-style client for MySQL and PostgreSQL.

use mygo::cli::Cli;
use mygo::config::Config;
use mygo::connection::ConnectionManager;
use mygo::error::Result;
use mygo::logging;
use mygo::repl::{error_line, Repl};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_file_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // Precedence:
    // 1. CLI arguments (highest)
    // 2. Named connection from config
    // 3. Default connection from config
    // 4. Environment variables
    // 5. Backend defaults
    let connection = cli.resolve_connection(&config)?;
    info!("Connection: {}", connection.display_string());

    let database = connection.database.clone();
    let backend = connection.backend;
    let display = connection.display_string();
    let manager = ConnectionManager::connect(connection).await?;

    let mut repl = Repl::new(manager, database);

    let outcome = match cli.execute.as_deref() {
        Some(command) => repl.run_once(command).await,
        None => {
            println!("Welcome to mygo, the unified database client.");
            println!("Connected to {backend} at {display}");
            println!("Type 'help' or '\\?' for help. Type 'quit' or '\\q' to exit.");
            println!();
            repl.run_interactive().await
        }
    };

    if let Err(e) = repl.target().close().await {
        warn!("Error closing connection: {}", e);
    }

    outcome
}
