use std::process::ExitCode;

use cart_admin::{Cli, Config, init_logger, run};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    init_logger(&config.log_level, config.log_dir.as_deref());

    match run(cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
