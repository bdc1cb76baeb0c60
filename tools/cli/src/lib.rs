use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use payroll_session::format::format_amount;
use payroll_session::mock_data::NetworkInfo;
use payroll_session::WalletProfile;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "gasless-payroll")]
#[command(about = "Simulated gasless payroll: manage a roster, fund a treasury, claim salaries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.gasless-payroll/config.toml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show configuration and simulation parameters
    Status,

    /// List the roster with weekly burn and treasury runway
    Roster,

    /// Add an employee to the roster
    AddEmployee {
        /// Employee wallet address
        #[arg(long)]
        wallet: String,

        /// Weekly salary in USN, e.g. 750.00
        #[arg(long, allow_hyphen_values = true)]
        salary: String,
    },

    /// Remove an employee from the roster
    RemoveEmployee {
        /// Employee wallet address
        #[arg(long)]
        wallet: String,
    },

    /// Add USN to the payroll treasury
    Fund {
        /// Amount in USN
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Claim this week's salary for the connected wallet, fee-free
    Claim,

    /// Show the connected wallet's claim history, newest first
    History {
        /// Number of records to skip
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum number of records to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Describe how long until a claim opens, given seconds from now
    Remaining {
        /// Seconds until the claim opens (negative means already open)
        #[arg(long, allow_hyphen_values = true)]
        seconds: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub wallet: WalletConfig,
    pub simulation: SimulationConfig,
    pub treasury: TreasuryConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub address: String,
    pub balance: String,
    pub usn_balance: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub connect_delay_ms: u64,
    pub settlement_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    pub initial_balance: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let network = NetworkInfo::neura_testnet();
        Self {
            name: network.name,
            chain_id: network.chain_id,
            rpc_url: network.rpc_url,
            explorer: network.explorer,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        let profile = WalletProfile::demo();
        Self {
            address: profile.address,
            balance: format_amount(profile.balance),
            usn_balance: format_amount(profile.usn_balance),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            connect_delay_ms: 1500,
            settlement_delay_ms: 2000,
        }
    }
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            initial_balance: "15000".to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.settlement_delay_ms)
    }
}

impl NetworkConfig {
    pub fn info(&self) -> NetworkInfo {
        NetworkInfo {
            name: self.name.clone(),
            chain_id: self.chain_id,
            rpc_url: self.rpc_url.clone(),
            symbol: NetworkInfo::neura_testnet().symbol,
            explorer: self.explorer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("settlement_delay_ms = 2000"));
        assert!(text.contains("chain_id = 267"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.wallet.usn_balance, "5000");
        assert_eq!(parsed.wallet.balance, "1.234");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let parsed: Config = toml::from_str("[simulation]\nsettlement_delay_ms = 0\n").unwrap();
        assert_eq!(parsed.simulation.settlement_delay(), Duration::ZERO);
        assert_eq!(parsed.simulation.connect_delay(), Duration::from_millis(1500));
        assert_eq!(parsed.network.name, "Neura Testnet");
    }

    #[test]
    fn test_cli_parses_negative_amounts() {
        let cli = Cli::try_parse_from(["gasless-payroll", "fund", "--amount", "-50"]).unwrap();
        match cli.command {
            Commands::Fund { amount } => assert_eq!(amount, "-50"),
            _ => panic!("expected fund command"),
        }
        assert_eq!(cli.format, OutputFormat::Table);
    }
}
