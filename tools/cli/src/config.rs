use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use gasless_payroll_cli::Config;
use log::debug;
use payroll_session::format::parse_amount;
use payroll_session::{Amount, MockSettlement, PayrollSession, WalletProfile};
use tokio::fs;

/// Environment variable overriding the configured wallet address.
pub const WALLET_ENV: &str = "GASLESS_PAYROLL_WALLET";

fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if !path.starts_with("~") {
        return Ok(path.to_path_buf());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let rest = path.strip_prefix("~").unwrap_or(path);
    Ok(home_dir.join(rest))
}

pub async fn load_config(config_path: &Path) -> Result<Config> {
    let expanded_path = expand_tilde(config_path)?;

    if !expanded_path.exists() {
        let default_config = Config::default();
        create_config_file(&expanded_path, &default_config).await?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&expanded_path).await?;
    let config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", expanded_path.display(), e))?;
    debug!("Loaded config from {}", expanded_path.display());

    Ok(config)
}

async fn create_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let config_content = toml::to_string_pretty(config)?;
    fs::write(path, config_content).await?;

    eprintln!("Created default config file at: {}", path.display());

    Ok(())
}

pub fn wallet_address(config: &Config) -> String {
    match std::env::var(WALLET_ENV) {
        Ok(address) if !address.trim().is_empty() => address.trim().to_string(),
        _ => config.wallet.address.clone(),
    }
}

fn parse_config_amount(field: &str, value: &str) -> Result<Amount> {
    parse_amount(value).map_err(|e| anyhow::anyhow!("Invalid {} in config: {}", field, e))
}

pub fn wallet_profile(config: &Config) -> Result<WalletProfile> {
    Ok(WalletProfile {
        address: wallet_address(config),
        chain_id: Some(config.network.chain_id),
        balance: parse_config_amount("wallet.balance", &config.wallet.balance)?,
        usn_balance: parse_config_amount("wallet.usn_balance", &config.wallet.usn_balance)?,
    })
}

/// Opening treasury balance; must not be negative.
pub fn initial_treasury(config: &Config) -> Result<Amount> {
    let balance = parse_config_amount("treasury.initial_balance", &config.treasury.initial_balance)?;
    if balance < 0 {
        anyhow::bail!(
            "Invalid treasury.initial_balance in config: {} is negative",
            config.treasury.initial_balance.trim()
        );
    }
    Ok(balance)
}

pub fn build_session(config: &Config) -> PayrollSession {
    PayrollSession::builder()
        .settlement(Arc::new(MockSettlement::new(
            config.simulation.settlement_delay(),
        )))
        .connect_delay(config.simulation.connect_delay())
        .build()
}
