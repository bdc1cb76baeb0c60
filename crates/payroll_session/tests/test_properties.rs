use payroll_session::eligibility::{apply_claim, describe_remaining, is_eligible};
use payroll_session::roster::{add_employee, remove_employee};
use payroll_session::treasury::fund_treasury;
use payroll_session::{Employee, CLAIM_PERIOD_SECS};
use proptest::prelude::*;

const MAX_TIME: u64 = 4_000_000_000;
const MAX_AMOUNT: i128 = 1_000_000_000_000_000;

fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        "0x[0-9a-f]{4,40}",
        1..MAX_AMOUNT,
        0..MAX_TIME,
        0..MAX_AMOUNT,
    )
        .prop_map(|(wallet, weekly_salary, next_claim_time, total_claimed)| Employee {
            wallet,
            weekly_salary,
            last_claim_time: next_claim_time.saturating_sub(CLAIM_PERIOD_SECS),
            next_claim_time,
            total_claimed,
            is_active: true,
        })
}

fn roster_strategy() -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec(employee_strategy(), 0..8).prop_map(|mut employees| {
        // Keep wallets unique, as the roster operations guarantee.
        let mut seen = std::collections::HashSet::new();
        employees.retain(|e| seen.insert(e.wallet.to_lowercase()));
        employees
    })
}

proptest! {
    #[test]
    fn test_claim_adds_one_salary_and_one_period(employee in employee_strategy(), offset in 0..MAX_TIME) {
        let now = employee.next_claim_time + offset;
        let claimed = apply_claim(&employee, now).unwrap();

        prop_assert_eq!(claimed.total_claimed, employee.total_claimed + employee.weekly_salary);
        prop_assert_eq!(claimed.next_claim_time, now + CLAIM_PERIOD_SECS);
        prop_assert_eq!(claimed.last_claim_time, now);
    }

    #[test]
    fn test_eligibility_returns_only_after_next_period(employee in employee_strategy(), later in 0..(2 * CLAIM_PERIOD_SECS)) {
        let now = employee.next_claim_time;
        let claimed = apply_claim(&employee, now).unwrap();

        prop_assert!(!is_eligible(&claimed, now));
        prop_assert_eq!(is_eligible(&claimed, now + later), later >= CLAIM_PERIOD_SECS);
    }

    #[test]
    fn test_early_claim_always_fails(employee in employee_strategy(), early in 1..CLAIM_PERIOD_SECS) {
        prop_assume!(employee.next_claim_time >= early);
        prop_assert!(apply_claim(&employee, employee.next_claim_time - early).is_err());
    }

    #[test]
    fn test_add_then_remove_round_trips(roster in roster_strategy(), salary in 1..MAX_AMOUNT, now in 0..MAX_TIME) {
        let wallet = "0xfresh-wallet";
        let added = add_employee(&roster, wallet, salary, now).unwrap();
        prop_assert_eq!(added.len(), roster.len() + 1);
        prop_assert_eq!(remove_employee(&added, wallet).unwrap(), roster);
    }

    #[test]
    fn test_funding_is_associative(balance in 0..MAX_AMOUNT, a1 in 1..MAX_AMOUNT, a2 in 1..MAX_AMOUNT) {
        let stepwise = fund_treasury(fund_treasury(balance, a1).unwrap(), a2).unwrap();
        prop_assert_eq!(stepwise, fund_treasury(balance, a1 + a2).unwrap());
    }

    #[test]
    fn test_non_positive_funding_rejected(balance in 0..MAX_AMOUNT, amount in -MAX_AMOUNT..=0) {
        prop_assert!(fund_treasury(balance, amount).is_err());
    }

    #[test]
    fn test_describe_remaining_never_negative(target in 0..MAX_TIME, now in 0..MAX_TIME) {
        let text = describe_remaining(target, now);
        prop_assert!(!text.contains('-'));
        prop_assert_eq!(text == "available now", now >= target);
    }
}
