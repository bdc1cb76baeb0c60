//! Session state and claim rules for a gasless payroll dashboard.
//!
//! An employer keeps a roster of employee wallets with weekly salaries and
//! funds a treasury; employees claim their salary once per seven-day period
//! without paying a transaction fee. Settlement is simulated: a delay
//! followed by a random transaction hash.
//!
//! Start from [`PayrollSession`], which wires the [`SessionStore`] to a
//! [`Settlement`] backend and a [`Clock`].

pub mod clock;
pub mod eligibility;
pub mod error;
pub mod format;
pub mod mock_data;
pub mod roster;
pub mod session;
pub mod settlement;
pub mod store;
pub mod treasury;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{PayrollError, Result, SettlementError};
pub use mock_data::{NetworkInfo, WalletProfile};
pub use roster::RosterSummary;
pub use session::{ClaimReceipt, EligibilityStatus, PayrollSession, PayrollSessionBuilder};
pub use settlement::{MockSettlement, Settlement};
pub use store::{SessionState, SessionStore};
pub use treasury::Runway;
pub use types::{
    usn, ActiveTab, Amount, ClaimRecord, Employee, Role, Roles, Timestamp, TimestampMillis, TxHash,
    CLAIM_PERIOD_SECS, UNIT,
};
