use clap::Parser;
use std::process;

mod commands;
mod config;
mod utils;

use commands::*;
use config::*;
use gasless_payroll_cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    // Load configuration
    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    let format = cli.format;
    let result = match cli.command {
        Commands::Status => status_command(&config, format).await,
        Commands::Roster => roster_command(&config, format).await,
        Commands::AddEmployee { wallet, salary } => {
            add_employee_command(wallet, salary, &config, format).await
        }
        Commands::RemoveEmployee { wallet } => remove_employee_command(wallet, &config, format).await,
        Commands::Fund { amount } => fund_command(amount, &config, format).await,
        Commands::Claim => claim_command(&config, format).await,
        Commands::History { start, limit } => history_command(start, limit, &config, format).await,
        Commands::Remaining { seconds } => remaining_command(seconds, format).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
