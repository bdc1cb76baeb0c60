//! Employer-side roster operations.
//!
//! These functions validate their inputs and return a new roster; the store
//! setters they feed into do not validate anything.

use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, Result};
use crate::treasury::{runway, Runway};
use crate::types::{Amount, Employee, Timestamp};

/// Looks up an employee by wallet, ignoring case.
pub fn find<'a>(roster: &'a [Employee], wallet: &str) -> Option<&'a Employee> {
    roster.iter().find(|employee| employee.matches_wallet(wallet))
}

/// Appends a newly enrolled employee to the roster.
///
/// The new entry can claim immediately: its last claim time is set one
/// period in the past and its next claim time to `now`.
///
/// # Errors
/// - [`PayrollError::InvalidWallet`] for an empty wallet
/// - [`PayrollError::InvalidAmount`] for a zero or negative salary, or one
///   that would overflow the roster's weekly burn
/// - [`PayrollError::DuplicateWallet`] if the wallet is already enrolled
pub fn add_employee(
    roster: &[Employee],
    wallet: &str,
    weekly_salary: Amount,
    now: Timestamp,
) -> Result<Vec<Employee>> {
    let wallet = wallet.trim();
    if wallet.is_empty() {
        return Err(PayrollError::InvalidWallet);
    }
    if weekly_salary <= 0 || total_weekly_burn(roster).checked_add(weekly_salary).is_none() {
        return Err(PayrollError::InvalidAmount(weekly_salary));
    }
    if let Some(existing) = find(roster, wallet) {
        return Err(PayrollError::DuplicateWallet(existing.wallet.clone()));
    }

    let mut updated = roster.to_vec();
    updated.push(Employee::enrolled(wallet, weekly_salary, now));
    Ok(updated)
}

/// Removes the employee with the given wallet.
///
/// # Errors
/// [`PayrollError::NotFound`] when no entry matches.
pub fn remove_employee(roster: &[Employee], wallet: &str) -> Result<Vec<Employee>> {
    let wallet = wallet.trim();
    if find(roster, wallet).is_none() {
        return Err(PayrollError::NotFound(wallet.to_string()));
    }

    Ok(roster
        .iter()
        .filter(|employee| !employee.matches_wallet(wallet))
        .cloned()
        .collect())
}

/// Replaces the entry matching `updated.wallet` in place.
///
/// # Errors
/// [`PayrollError::NotFound`] when no entry matches.
pub fn replace_employee(roster: &[Employee], updated: Employee) -> Result<Vec<Employee>> {
    let position = roster
        .iter()
        .position(|employee| employee.matches_wallet(&updated.wallet))
        .ok_or_else(|| PayrollError::NotFound(updated.wallet.clone()))?;

    let mut roster = roster.to_vec();
    roster[position] = updated;
    Ok(roster)
}

/// Sum of weekly salaries over active employees, saturating at
/// `Amount::MAX` for rosters written through the raw store setters.
pub fn total_weekly_burn(roster: &[Employee]) -> Amount {
    roster
        .iter()
        .filter(|employee| employee.is_active)
        .fold(0, |burn: Amount, employee| burn.saturating_add(employee.weekly_salary))
}

/// Employer dashboard figures derived from the roster and treasury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub headcount: usize,
    pub active_headcount: usize,
    pub claimable_now: usize,
    pub weekly_burn: Amount,
    pub treasury_balance: Amount,
    pub runway: Runway,
}

pub fn summarize(roster: &[Employee], treasury_balance: Amount, now: Timestamp) -> RosterSummary {
    let weekly_burn = total_weekly_burn(roster);
    RosterSummary {
        headcount: roster.len(),
        active_headcount: roster.iter().filter(|e| e.is_active).count(),
        claimable_now: roster
            .iter()
            .filter(|e| e.is_active && e.can_claim(now))
            .count(),
        weekly_burn,
        treasury_balance,
        runway: runway(treasury_balance, weekly_burn),
    }
}
