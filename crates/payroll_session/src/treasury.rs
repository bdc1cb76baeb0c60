//! Treasury funding and runway.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, Result};
use crate::types::Amount;

/// How many full pay periods the treasury covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "weeks")]
pub enum Runway {
    /// Whole weeks of salaries the treasury can pay.
    Weeks(u64),
    /// Nothing is being spent, so the treasury never runs out.
    Unbounded,
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Weeks(1) => f.write_str("1 week"),
            Runway::Weeks(weeks) => write!(f, "{} weeks", weeks),
            Runway::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Adds `amount` to the treasury balance.
///
/// # Errors
/// [`PayrollError::InvalidAmount`] when `amount` is not positive or the sum
/// overflows.
pub fn fund_treasury(balance: Amount, amount: Amount) -> Result<Amount> {
    if amount <= 0 {
        return Err(PayrollError::InvalidAmount(amount));
    }
    balance
        .checked_add(amount)
        .ok_or(PayrollError::InvalidAmount(amount))
}

/// Whole weeks of runway at the given weekly burn.
pub fn runway(balance: Amount, weekly_burn: Amount) -> Runway {
    if weekly_burn <= 0 {
        return Runway::Unbounded;
    }
    // A negative balance (only reachable through the raw setters) has no runway.
    let weeks = (balance.max(0) / weekly_burn).min(u64::MAX as i128);
    Runway::Weeks(weeks as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::usn;

    #[test]
    fn test_fund_treasury_adds_amount() {
        assert_eq!(fund_treasury(usn(1000), usn(250)), Ok(usn(1250)));
    }

    #[test]
    fn test_fund_treasury_rejects_non_positive() {
        let balance = usn(1000);
        assert_eq!(
            fund_treasury(balance, -usn(50)),
            Err(PayrollError::InvalidAmount(-usn(50)))
        );
        assert_eq!(fund_treasury(balance, 0), Err(PayrollError::InvalidAmount(0)));
    }

    #[test]
    fn test_fund_treasury_rejects_overflow() {
        assert!(fund_treasury(i128::MAX, 1).is_err());
    }

    #[test]
    fn test_funding_composes() {
        let once = fund_treasury(usn(10), usn(3)).unwrap();
        let twice = fund_treasury(once, usn(4)).unwrap();
        assert_eq!(twice, fund_treasury(usn(10), usn(7)).unwrap());
    }

    #[test]
    fn test_runway() {
        assert_eq!(runway(usn(15_000), usn(2_250)), Runway::Weeks(6));
        assert_eq!(runway(usn(100), usn(2_250)), Runway::Weeks(0));
        assert_eq!(runway(usn(15_000), 0), Runway::Unbounded);
        assert_eq!(runway(-usn(5), usn(1)), Runway::Weeks(0));
        assert_ne!(runway(0, 0), Runway::Weeks(0));
    }

    #[test]
    fn test_runway_display() {
        assert_eq!(Runway::Weeks(6).to_string(), "6 weeks");
        assert_eq!(Runway::Weeks(1).to_string(), "1 week");
        assert_eq!(Runway::Unbounded.to_string(), "unbounded");
    }
}
