use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use gasless_payroll_cli::{Config, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use payroll_session::eligibility::describe_remaining;
use payroll_session::format::{format_amount, format_amount_fixed, format_date, parse_amount, short_address};
use payroll_session::mock_data::{CONTRACT_ADDRESS, USN_TOKEN_ADDRESS};
use payroll_session::{Amount, Employee, PayrollSession, RosterSummary, TxHash, CLAIM_PERIOD_SECS};
use serde::Serialize;

use crate::config::{build_session, initial_treasury, wallet_profile};
use crate::utils::{colorize_status, format_table, render_structured};

#[derive(Serialize)]
struct RosterOutput<'a> {
    employees: &'a [Employee],
    summary: &'a RosterSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RosterChangeOutput<'a> {
    tx_hash: &'a TxHash,
    summary: &'a RosterSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FundOutput<'a> {
    tx_hash: &'a TxHash,
    amount: Amount,
    treasury_balance: Amount,
}

#[derive(Serialize)]
struct RemainingOutput {
    target: u64,
    remaining: String,
}

async fn with_spinner<T>(message: &str, operation: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = operation.await;
    spinner.finish_and_clear();
    result
}

/// Fresh session: connect the configured wallet, then seed the demo data.
async fn open_session(config: &Config) -> Result<PayrollSession> {
    let session = build_session(config);
    let profile = wallet_profile(config)?;

    with_spinner("Connecting wallet...", session.connect_wallet(profile)).await?;
    session.load_demo_data()?;
    session.store().set_treasury_balance(initial_treasury(config)?);
    Ok(session)
}

fn print_summary(summary: &RosterSummary) {
    println!("Employees:  {} ({} active, {} can claim now)", summary.headcount, summary.active_headcount, summary.claimable_now);
    println!("Weekly burn: {} USN", format_amount_fixed(summary.weekly_burn, 2));
    println!("Treasury:    {} USN", format_amount_fixed(summary.treasury_balance, 2));
    println!("Runway:      {}", summary.runway);
}

pub async fn status_command(config: &Config, format: OutputFormat) -> Result<()> {
    if let Some(output) = render_structured(config, format)? {
        println!("{}", output);
        return Ok(());
    }

    println!("Gasless Payroll Status");
    println!("======================");
    println!();
    println!("Network:");
    println!("  Name: {} (chain {})", config.network.name, config.network.chain_id);
    println!("  RPC URL: {}", config.network.rpc_url);
    println!("  Explorer: {}", config.network.explorer);
    println!("  Payroll contract: {}", CONTRACT_ADDRESS);
    println!("  USN token: {}", USN_TOKEN_ADDRESS);
    println!();
    println!("Wallet:");
    println!("  Address: {}", crate::config::wallet_address(config));
    println!("  USN balance: {}", config.wallet.usn_balance);
    println!();
    println!("Simulation:");
    println!("  Connect delay: {} ms", config.simulation.connect_delay_ms);
    println!("  Settlement delay: {} ms", config.simulation.settlement_delay_ms);
    println!("  Claim period: {} days", CLAIM_PERIOD_SECS / 86_400);
    println!("  Clock: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

pub async fn roster_command(config: &Config, format: OutputFormat) -> Result<()> {
    let session = open_session(config).await?;
    let state = session.snapshot();
    let summary = session.roster_summary();
    let now = Utc::now().timestamp().max(0) as u64;

    let structured = RosterOutput {
        employees: &state.employees,
        summary: &summary,
    };
    if let Some(output) = render_structured(&structured, format)? {
        println!("{}", output);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = state
        .employees
        .iter()
        .map(|employee| {
            let status = if !employee.is_active {
                "inactive"
            } else if employee.can_claim(now) {
                "claimable"
            } else {
                "waiting"
            };
            vec![
                short_address(&employee.wallet),
                format_amount_fixed(employee.weekly_salary, 2),
                format_amount_fixed(employee.total_claimed, 2),
                describe_remaining(employee.next_claim_time, now),
                colorize_status(status),
            ]
        })
        .collect();

    println!(
        "{}",
        format_table(&["Wallet", "Weekly Salary", "Total Claimed", "Next Claim", "Status"], &rows)
    );
    print_summary(&summary);
    Ok(())
}

pub async fn add_employee_command(wallet: String, salary: String, config: &Config, format: OutputFormat) -> Result<()> {
    let salary = parse_amount(&salary)?;
    let session = open_session(config).await?;

    let tx_hash = with_spinner("Adding employee...", session.add_employee(&wallet, salary)).await?;
    info!("Added {} at {} USN/week", wallet, format_amount(salary));

    let summary = session.roster_summary();
    let structured = RosterChangeOutput {
        tx_hash: &tx_hash,
        summary: &summary,
    };
    if let Some(output) = render_structured(&structured, format)? {
        println!("{}", output);
        return Ok(());
    }

    println!("✅ Employee added: {}", wallet.trim());
    println!("Weekly salary: {} USN", format_amount_fixed(salary, 2));
    println!("Transaction: {}", tx_hash);
    print_summary(&summary);
    Ok(())
}

pub async fn remove_employee_command(wallet: String, config: &Config, format: OutputFormat) -> Result<()> {
    let session = open_session(config).await?;

    let tx_hash = with_spinner("Removing employee...", session.remove_employee(&wallet)).await?;

    let summary = session.roster_summary();
    let structured = RosterChangeOutput {
        tx_hash: &tx_hash,
        summary: &summary,
    };
    if let Some(output) = render_structured(&structured, format)? {
        println!("{}", output);
        return Ok(());
    }

    println!("✅ Employee removed: {}", wallet.trim());
    println!("Transaction: {}", tx_hash);
    print_summary(&summary);
    Ok(())
}

pub async fn fund_command(amount: String, config: &Config, format: OutputFormat) -> Result<()> {
    let amount = parse_amount(&amount)?;
    let session = open_session(config).await?;

    let tx_hash = with_spinner("Funding treasury...", session.fund_treasury(amount)).await?;
    let balance = session.snapshot().treasury_balance;

    let structured = FundOutput {
        tx_hash: &tx_hash,
        amount,
        treasury_balance: balance,
    };
    if let Some(output) = render_structured(&structured, format)? {
        println!("{}", output);
        return Ok(());
    }

    println!("✅ Treasury funded with {} USN", format_amount_fixed(amount, 2));
    println!("Transaction: {}", tx_hash);
    println!("Treasury balance: {} USN", format_amount_fixed(balance, 2));
    println!("Runway: {}", session.roster_summary().runway);
    Ok(())
}

pub async fn claim_command(config: &Config, format: OutputFormat) -> Result<()> {
    let session = open_session(config).await?;

    let receipt = with_spinner("Claiming salary (gasless)...", session.claim()).await?;
    let network = config.network.info();

    if let Some(output) = render_structured(&receipt, format)? {
        println!("{}", output);
        return Ok(());
    }

    let status = session.eligibility()?;
    println!("✅ Claimed {} USN with zero gas fees", format_amount_fixed(receipt.record.amount, 2));
    println!("Transaction: {}", receipt.tx_hash);
    println!("Explorer: {}", network.tx_url(&receipt.tx_hash));
    println!("Total claimed: {} USN", format_amount_fixed(receipt.employee.total_claimed, 2));
    println!("Next claim: {} ({})", format_date(status.next_claim_time), status.remaining);
    Ok(())
}

pub async fn history_command(start: usize, limit: usize, config: &Config, format: OutputFormat) -> Result<()> {
    let session = open_session(config).await?;
    let page = session.claim_history_page(start, limit);

    if let Some(output) = render_structured(&page, format)? {
        println!("{}", output);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = page
        .iter()
        .map(|record| {
            vec![
                format_date(record.timestamp / 1000),
                format_amount_fixed(record.amount, 2),
                colorize_status(if record.gasless { "gasless" } else { "paid gas" }),
                short_address(record.tx_hash.as_str()),
            ]
        })
        .collect();

    println!("{}", format_table(&["Date", "Amount", "Fee", "Transaction"], &rows));
    Ok(())
}

pub async fn remaining_command(seconds: i64, format: OutputFormat) -> Result<()> {
    let now = Utc::now().timestamp().max(0) as u64;
    let target = now.saturating_add_signed(seconds);
    let structured = RemainingOutput {
        target,
        remaining: describe_remaining(target, now),
    };

    if let Some(output) = render_structured(&structured, format)? {
        println!("{}", output);
        return Ok(());
    }

    println!("{}", structured.remaining);
    Ok(())
}
