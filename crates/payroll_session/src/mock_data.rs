//! Built-in demo dataset used to populate a fresh session.

use serde::{Deserialize, Serialize};

use crate::types::{
    Amount, ClaimRecord, Employee, Timestamp, TimestampMillis, TxHash, UNIT,
};

/// Payroll contract address shown by the dashboard.
pub const CONTRACT_ADDRESS: &str = "0x1234567890abcdef1234567890abcdef12345678";

/// USN token contract address.
pub const USN_TOKEN_ADDRESS: &str = "0xabcdef1234567890abcdef1234567890abcdef12";

/// Wallet the demo connects as. It is also the first roster entry.
pub const DEMO_WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fE21";

/// Treasury balance seeded alongside the demo roster: 15,000 USN.
pub const DEMO_TREASURY_BALANCE: Amount = 15_000 * UNIT;

const DAY: u64 = 24 * 60 * 60;
const DAY_MILLIS: u64 = DAY * 1000;

/// Network the simulated wallet claims to be connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub symbol: String,
    pub explorer: String,
}

impl NetworkInfo {
    pub fn neura_testnet() -> Self {
        Self {
            name: "Neura Testnet".to_string(),
            chain_id: 267,
            rpc_url: "https://rpc.neura.network".to_string(),
            symbol: "NEURA".to_string(),
            explorer: "https://explorer.neura.network".to_string(),
        }
    }

    /// Explorer link for a settled transaction.
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer.trim_end_matches('/'), tx_hash)
    }
}

/// What a wallet reports when it connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletProfile {
    pub address: String,
    pub chain_id: Option<u64>,
    pub balance: Amount,
    pub usn_balance: Amount,
}

impl WalletProfile {
    /// 1.234 native tokens and 5,000 USN on Neura Testnet.
    pub fn demo() -> Self {
        Self {
            address: DEMO_WALLET.to_string(),
            chain_id: Some(NetworkInfo::neura_testnet().chain_id),
            balance: 12_340_000,
            usn_balance: 5_000 * UNIT,
        }
    }
}

/// Three employees in different claim states relative to `now`.
pub fn demo_employees(now: Timestamp) -> Vec<Employee> {
    vec![
        Employee {
            wallet: DEMO_WALLET.to_string(),
            weekly_salary: 500 * UNIT,
            last_claim_time: now.saturating_sub(8 * DAY),
            next_claim_time: now.saturating_sub(DAY),
            total_claimed: 2_000 * UNIT,
            is_active: true,
        },
        Employee {
            wallet: "0x8ba1f109551bD432803012645Ac136ddd64DBA72".to_string(),
            weekly_salary: 750 * UNIT,
            last_claim_time: now.saturating_sub(3 * DAY),
            next_claim_time: now + 4 * DAY,
            total_claimed: 3_000 * UNIT,
            is_active: true,
        },
        Employee {
            wallet: "0xdD2FD4581271e230360230F9337D5c0430Bf44C0".to_string(),
            weekly_salary: 1_000 * UNIT,
            last_claim_time: now.saturating_sub(7 * DAY),
            next_claim_time: now,
            total_claimed: 8_000 * UNIT,
            is_active: true,
        },
    ]
}

/// Four weekly claims of 500 USN, newest first. The third predates the
/// gasless relayer.
pub fn demo_claim_history(now_millis: TimestampMillis) -> Vec<ClaimRecord> {
    let hashes = [
        "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
        "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890",
        "0x567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234",
        "0x890abcdef1234567890abcdef1234567890abcdef1234567890abcdef123456",
    ];

    hashes
        .iter()
        .enumerate()
        .map(|(i, hash)| {
            let weeks_ago = (i as u64 + 1) * 7;
            let mut record = ClaimRecord::gasless(
                500 * UNIT,
                now_millis.saturating_sub(weeks_ago * DAY_MILLIS),
                TxHash::new(*hash),
            );
            record.gasless = i != 2;
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;

    const NOW: Timestamp = 1_700_000_000;

    #[test]
    fn test_demo_roster_claim_states() {
        let employees = demo_employees(NOW);
        assert_eq!(employees.len(), 3);
        assert!(employees[0].can_claim(NOW));
        assert!(!employees[1].can_claim(NOW));
        assert!(employees[2].can_claim(NOW));
        assert_eq!(roster::total_weekly_burn(&employees), 2_250 * UNIT);
    }

    #[test]
    fn test_demo_wallet_is_on_roster() {
        let employees = demo_employees(NOW);
        assert!(roster::find(&employees, &DEMO_WALLET.to_lowercase()).is_some());
    }

    #[test]
    fn test_demo_history_is_newest_first() {
        let history = demo_claim_history(NOW * 1000);
        assert_eq!(history.len(), 4);
        assert!(history.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
        assert_eq!(history.iter().filter(|r| r.gasless).count(), 3);
    }

    #[test]
    fn test_tx_url() {
        let hash = TxHash::new("0xabc");
        assert_eq!(
            NetworkInfo::neura_testnet().tx_url(&hash),
            "https://explorer.neura.network/tx/0xabc"
        );
    }
}
