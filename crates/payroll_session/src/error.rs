//! Error types for payroll session flows.

use crate::types::{Amount, Role, Timestamp};

/// Failure reported by a settlement layer.
///
/// The mock settlement never produces one, but any real relayer or RPC
/// backend plugged in through [`Settlement`](crate::settlement::Settlement)
/// reports its failures through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    /// The submission was rejected before it was settled.
    #[error("settlement rejected: {0}")]
    Rejected(String),

    /// The settlement layer could not be reached.
    #[error("settlement layer unavailable")]
    Unavailable,
}

/// Error returned by roster, treasury, claim and session operations.
///
/// Every variant is a local, recoverable condition. None of them leaves the
/// session in a partially-updated state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayrollError {
    /// An employee with the same wallet (case-insensitive) is already on the roster.
    #[error("wallet {0} is already on the roster")]
    DuplicateWallet(String),

    /// No employee with this wallet is on the roster.
    #[error("wallet {0} is not on the roster")]
    NotFound(String),

    /// A claim was attempted before the next claim time.
    #[error("claim not available until {next_claim_time}")]
    IneligibleClaim {
        /// Second timestamp at which the claim becomes available.
        next_claim_time: Timestamp,
    },

    /// A funding or salary amount was zero, negative or overflowed.
    #[error("invalid amount: {0}")]
    InvalidAmount(Amount),

    /// The wallet address was empty.
    #[error("wallet address cannot be empty")]
    InvalidWallet,

    /// A flow that needs a connected wallet ran without one.
    #[error("wallet is not connected")]
    NotConnected,

    /// The connected wallet lacks the role the flow requires.
    #[error("connected wallet does not hold the {0} role")]
    MissingRole(Role),

    /// Another operation is still in flight.
    #[error("another operation is in progress: {0}")]
    Busy(String),

    /// The settlement layer failed.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_wallet_display() {
        let err = PayrollError::DuplicateWallet("0xB".to_string());
        assert_eq!(err.to_string(), "wallet 0xB is already on the roster");
    }

    #[test]
    fn test_ineligible_claim_carries_next_claim_time() {
        let err = PayrollError::IneligibleClaim {
            next_claim_time: 1_700_000_000,
        };
        assert_eq!(err.to_string(), "claim not available until 1700000000");
    }

    #[test]
    fn test_settlement_error_is_transparent() {
        let err: PayrollError = SettlementError::Unavailable.into();
        assert_eq!(err.to_string(), "settlement layer unavailable");
    }

    #[test]
    fn test_missing_role_display() {
        let err = PayrollError::MissingRole(Role::Employer);
        assert_eq!(err.to_string(), "connected wallet does not hold the employer role");
    }

    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<PayrollError>();
        }
    };
}
