//! Core data types shared by the store, the claim rules and the session flows.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed-point token amount in base units.
pub type Amount = i128;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Milliseconds since the Unix epoch.
pub type TimestampMillis = u64;

/// Number of fractional digits carried by an [`Amount`].
pub const AMOUNT_DECIMALS: u32 = 7;

/// Base units in one whole USN.
pub const UNIT: Amount = 10_000_000;

/// Length of a claim period: seven days, in seconds.
pub const CLAIM_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Converts a whole number of USN into base units.
pub const fn usn(whole: i64) -> Amount {
    whole as Amount * UNIT
}

/// Employee on the payroll roster.
///
/// Eligibility is not stored: call [`Employee::can_claim`] with the current
/// time to find out whether a claim may proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub wallet: String,
    pub weekly_salary: Amount,
    pub last_claim_time: Timestamp,
    pub next_claim_time: Timestamp,
    pub total_claimed: Amount,
    pub is_active: bool,
}

impl Employee {
    /// Builds a freshly enrolled employee whose first claim is available at `now`.
    pub fn enrolled(wallet: impl Into<String>, weekly_salary: Amount, now: Timestamp) -> Self {
        Self {
            wallet: wallet.into(),
            weekly_salary,
            last_claim_time: now.saturating_sub(CLAIM_PERIOD_SECS),
            next_claim_time: now,
            total_claimed: 0,
            is_active: true,
        }
    }

    /// Case-insensitive wallet comparison.
    pub fn matches_wallet(&self, wallet: &str) -> bool {
        self.wallet.eq_ignore_ascii_case(wallet)
    }

    pub fn can_claim(&self, now: Timestamp) -> bool {
        crate::eligibility::is_eligible(self, now)
    }
}

/// Opaque identifier of a settled transaction (`0x` + 64 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in an employee's claim history. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: Uuid,
    pub amount: Amount,
    pub timestamp: TimestampMillis,
    pub tx_hash: TxHash,
    pub gasless: bool,
}

impl ClaimRecord {
    /// Record for a claim settled through the gasless flow.
    pub fn gasless(amount: Amount, timestamp: TimestampMillis, tx_hash: TxHash) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            timestamp,
            tx_hash,
            gasless: true,
        }
    }
}

/// Dashboard role held by the connected wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employer,
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employer => f.write_str("employer"),
            Role::Employee => f.write_str("employee"),
        }
    }
}

/// Role flags granted on connect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roles {
    pub is_employer: bool,
    pub is_employee: bool,
}

impl Roles {
    /// Demo policy: every connected wallet may act as both employer and employee.
    pub const fn both() -> Self {
        Self {
            is_employer: true,
            is_employee: true,
        }
    }

    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Employer => self.is_employer,
            Role::Employee => self.is_employee,
        }
    }
}

/// Dashboard tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Employer,
    Employee,
}

impl ActiveTab {
    /// Role that must be held for the tab to be reachable.
    pub fn required_role(self) -> Role {
        match self {
            ActiveTab::Employer => Role::Employer,
            ActiveTab::Employee => Role::Employee,
        }
    }
}
