//! Claim eligibility rules.
//!
//! Everything here is pure: callers pass the current time in, nothing reads
//! a clock or touches the session store.

use crate::error::{PayrollError, Result};
use crate::types::{Employee, Timestamp, CLAIM_PERIOD_SECS};

const SECS_PER_DAY: u64 = 24 * 60 * 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

/// Returns true once `now` has reached the employee's next claim time.
pub fn is_eligible(employee: &Employee, now: Timestamp) -> bool {
    now >= employee.next_claim_time
}

/// Human-readable time left until `target`.
///
/// Uses the coarsest non-zero pair of units: days and hours, then hours and
/// minutes, then minutes alone.
pub fn describe_remaining(target: Timestamp, now: Timestamp) -> String {
    if now >= target {
        return "available now".to_string();
    }

    let diff = target - now;
    let days = diff / SECS_PER_DAY;
    let hours = (diff % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (diff % SECS_PER_HOUR) / SECS_PER_MINUTE;

    if days > 0 {
        format!("{}d {}h remaining", days, hours)
    } else if hours > 0 {
        format!("{}h {}m remaining", hours, minutes)
    } else {
        format!("{}m remaining", minutes)
    }
}

/// Applies a successful claim and returns the updated record.
///
/// # Errors
/// [`PayrollError::IneligibleClaim`] when `now` is before the next claim
/// time. [`PayrollError::InvalidAmount`] if the running total would overflow.
pub fn apply_claim(employee: &Employee, now: Timestamp) -> Result<Employee> {
    if !is_eligible(employee, now) {
        return Err(PayrollError::IneligibleClaim {
            next_claim_time: employee.next_claim_time,
        });
    }

    let total_claimed = employee
        .total_claimed
        .checked_add(employee.weekly_salary)
        .ok_or(PayrollError::InvalidAmount(employee.weekly_salary))?;

    Ok(Employee {
        total_claimed,
        last_claim_time: now,
        next_claim_time: now.saturating_add(CLAIM_PERIOD_SECS),
        ..employee.clone()
    })
}
