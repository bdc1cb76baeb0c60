//! Payroll session flows.
//!
//! [`PayrollSession`] is the context object a front end holds. It owns the
//! [`SessionStore`], a [`Settlement`] backend and a [`Clock`], and runs the
//! employer and employee flows on top of them.
//!
//! Only one flow may be in flight at a time. A flow that starts while
//! another is pending fails immediately with [`PayrollError::Busy`] and
//! leaves the state untouched. The guard is released when the flow returns
//! or when its future is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};
use crate::eligibility::{apply_claim, describe_remaining, is_eligible};
use crate::error::{PayrollError, Result};
use crate::mock_data::{demo_claim_history, demo_employees, WalletProfile, DEMO_TREASURY_BALANCE};
use crate::roster::{self, RosterSummary};
use crate::settlement::{MockSettlement, Settlement};
use crate::store::{SessionState, SessionStore};
use crate::treasury;
use crate::types::{ActiveTab, Amount, ClaimRecord, Employee, Role, Roles, Timestamp, TxHash};

/// Default simulated wallet connection latency.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(1500);

const CONNECTING: &str = "Connecting wallet...";
const ADDING_EMPLOYEE: &str = "Adding employee...";
const REMOVING_EMPLOYEE: &str = "Removing employee...";
const FUNDING_TREASURY: &str = "Funding treasury...";
const CLAIMING_SALARY: &str = "Claiming salary...";

/// Result of a successful salary claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub tx_hash: TxHash,
    pub record: ClaimRecord,
    pub employee: Employee,
}

/// Claim status of the connected employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityStatus {
    pub eligible: bool,
    pub next_claim_time: Timestamp,
    pub remaining: String,
}

pub struct PayrollSessionBuilder {
    settlement: Option<Arc<dyn Settlement>>,
    clock: Option<Arc<dyn Clock>>,
    connect_delay: Duration,
}

impl PayrollSessionBuilder {
    pub fn settlement(mut self, settlement: Arc<dyn Settlement>) -> Self {
        self.settlement = Some(settlement);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn build(self) -> PayrollSession {
        PayrollSession {
            store: SessionStore::new(),
            settlement: self
                .settlement
                .unwrap_or_else(|| Arc::new(MockSettlement::default())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            connect_delay: self.connect_delay,
            in_flight: AtomicBool::new(false),
        }
    }
}

pub struct PayrollSession {
    store: SessionStore,
    settlement: Arc<dyn Settlement>,
    clock: Arc<dyn Clock>,
    connect_delay: Duration,
    in_flight: AtomicBool,
}

/// Held for the duration of a flow; clears the in-flight flag on drop.
struct InFlightGuard<'a> {
    session: &'a PayrollSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.store.set_loading(false, None);
        self.session.in_flight.store(false, Ordering::SeqCst);
    }
}

impl PayrollSession {
    pub fn builder() -> PayrollSessionBuilder {
        PayrollSessionBuilder {
            settlement: None,
            clock: None,
            connect_delay: DEFAULT_CONNECT_DELAY,
        }
    }

    /// Session with the default mock settlement and the system clock.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn snapshot(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self, action: &str) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let pending = self
                .store
                .read(|state| state.processing_action.clone())
                .unwrap_or_default();
            warn!("Rejected '{}' while '{}' is in flight", action, pending);
            return Err(PayrollError::Busy(pending));
        }
        self.store.set_loading(true, Some(action.to_string()));
        Ok(InFlightGuard { session: self })
    }

    fn require_role(&self, role: Role) -> Result<String> {
        self.store.read(|state| {
            let address = match (&state.address, state.is_connected) {
                (Some(address), true) => address.clone(),
                _ => return Err(PayrollError::NotConnected),
            };
            if !state.roles.has(role) {
                return Err(PayrollError::MissingRole(role));
            }
            Ok(address)
        })
    }

    async fn settle(&self) -> Result<TxHash> {
        Ok(self.settlement.settle().await?)
    }

    // ------------------------------------------------------------------
    // Connection
    // ------------------------------------------------------------------

    /// Connects the wallet after the simulated handshake delay, granting
    /// both dashboard roles.
    pub async fn connect_wallet(&self, profile: WalletProfile) -> Result<()> {
        self.connect_wallet_with_roles(profile, Roles::both()).await
    }

    pub async fn connect_wallet_with_roles(&self, profile: WalletProfile, roles: Roles) -> Result<()> {
        let _guard = self.begin(CONNECTING)?;
        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }

        self.store
            .connect_with_roles(profile.address.clone(), profile.balance, profile.usn_balance, roles);
        self.store.set_chain_id(profile.chain_id);
        info!("Wallet connected: {}", profile.address);
        Ok(())
    }

    /// Drops every piece of session state.
    pub fn disconnect(&self) -> Result<()> {
        let _guard = self.begin("Disconnecting...")?;
        self.store.reset();
        info!("Wallet disconnected, session reset");
        Ok(())
    }

    /// Seeds the demo roster, treasury and claim history.
    ///
    /// The roster and treasury are only seeded when the roster is empty, so
    /// calling this again keeps earlier changes.
    pub fn load_demo_data(&self) -> Result<()> {
        let _guard = self.begin("Loading demo data...")?;
        if !self.store.read(|state| state.is_connected) {
            return Err(PayrollError::NotConnected);
        }

        if self.store.read(|state| state.employees.is_empty()) {
            self.store.set_employees(demo_employees(self.clock.now_secs()));
            self.store.set_treasury_balance(DEMO_TREASURY_BALANCE);
            debug!("Seeded demo roster and treasury");
        }
        self.refresh_employee_view();
        if self.store.read(|state| state.claim_history.is_empty() && state.employee_data.is_some()) {
            self.store
                .set_claim_history(demo_claim_history(self.clock.now_millis()));
        }
        Ok(())
    }

    /// Points the employee view at the connected wallet's roster entry.
    fn refresh_employee_view(&self) {
        let employee = self.store.read(|state| {
            state
                .address
                .as_deref()
                .and_then(|address| roster::find(&state.employees, address).cloned())
        });
        self.store.set_employee_data(employee);
    }

    // ------------------------------------------------------------------
    // Employer flows
    // ------------------------------------------------------------------

    pub async fn add_employee(&self, wallet: &str, weekly_salary: Amount) -> Result<TxHash> {
        let _guard = self.begin(ADDING_EMPLOYEE)?;
        self.require_role(Role::Employer)?;

        // Validate before paying for a settlement.
        let employees = self.store.read(|state| state.employees.clone());
        roster::add_employee(&employees, wallet, weekly_salary, self.clock.now_secs())?;

        let tx_hash = self.settle().await?;

        let updated = roster::add_employee(&employees, wallet, weekly_salary, self.clock.now_secs())?;
        self.store.set_employees(updated);
        self.refresh_employee_view();
        info!("Employee {} added ({})", wallet.trim(), tx_hash);
        Ok(tx_hash)
    }

    pub async fn remove_employee(&self, wallet: &str) -> Result<TxHash> {
        let _guard = self.begin(REMOVING_EMPLOYEE)?;
        self.require_role(Role::Employer)?;

        let employees = self.store.read(|state| state.employees.clone());
        let updated = roster::remove_employee(&employees, wallet)?;

        let tx_hash = self.settle().await?;

        self.store.set_employees(updated);
        self.refresh_employee_view();
        info!("Employee {} removed ({})", wallet.trim(), tx_hash);
        Ok(tx_hash)
    }

    pub async fn fund_treasury(&self, amount: Amount) -> Result<TxHash> {
        let _guard = self.begin(FUNDING_TREASURY)?;
        self.require_role(Role::Employer)?;

        let balance = self.store.read(|state| state.treasury_balance);
        let updated = treasury::fund_treasury(balance, amount)?;

        let tx_hash = self.settle().await?;

        self.store.set_treasury_balance(updated);
        info!("Treasury funded with {} ({})", amount, tx_hash);
        Ok(tx_hash)
    }

    pub fn roster_summary(&self) -> RosterSummary {
        let now = self.clock.now_secs();
        self.store
            .read(|state| roster::summarize(&state.employees, state.treasury_balance, now))
    }

    // ------------------------------------------------------------------
    // Employee flows
    // ------------------------------------------------------------------

    fn connected_employee(&self) -> Result<Employee> {
        let address = self.require_role(Role::Employee)?;
        self.store.read(|state| {
            state
                .employee_data
                .clone()
                .or_else(|| roster::find(&state.employees, &address).cloned())
                .ok_or(PayrollError::NotFound(address))
        })
    }

    /// Claims one week of salary for the connected wallet.
    ///
    /// Updates the employee view and the matching roster entry, and
    /// prepends a gasless record to the claim history.
    pub async fn claim(&self) -> Result<ClaimReceipt> {
        let _guard = self.begin(CLAIMING_SALARY)?;
        let employee = self.connected_employee()?;

        if !is_eligible(&employee, self.clock.now_secs()) {
            return Err(PayrollError::IneligibleClaim {
                next_claim_time: employee.next_claim_time,
            });
        }

        let tx_hash = self.settle().await?;

        let updated = apply_claim(&employee, self.clock.now_secs())?;
        let record = ClaimRecord::gasless(employee.weekly_salary, self.clock.now_millis(), tx_hash.clone());

        self.store.update(|state| {
            match roster::replace_employee(&state.employees, updated.clone()) {
                Ok(employees) => state.employees = employees,
                Err(err) => warn!("Claim recorded without a roster entry: {}", err),
            }
            state.employee_data = Some(updated.clone());
            state.claim_history.insert(0, record.clone());
        });
        info!(
            "Gasless claim of {} for {} settled ({})",
            employee.weekly_salary, employee.wallet, tx_hash
        );

        Ok(ClaimReceipt {
            tx_hash,
            record,
            employee: updated,
        })
    }

    pub fn eligibility(&self) -> Result<EligibilityStatus> {
        let employee = self.connected_employee()?;
        let now = self.clock.now_secs();
        Ok(EligibilityStatus {
            eligible: is_eligible(&employee, now),
            next_claim_time: employee.next_claim_time,
            remaining: describe_remaining(employee.next_claim_time, now),
        })
    }

    /// A page of claim history, newest first. `start` is a zero-based offset.
    pub fn claim_history_page(&self, start: usize, limit: usize) -> Vec<ClaimRecord> {
        self.store.read(|state| {
            state
                .claim_history
                .iter()
                .skip(start)
                .take(limit)
                .cloned()
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    pub fn available_tabs(&self) -> Vec<ActiveTab> {
        self.store.read(|state| {
            if !state.is_connected {
                return Vec::new();
            }
            [ActiveTab::Employer, ActiveTab::Employee]
                .into_iter()
                .filter(|tab| state.roles.has(tab.required_role()))
                .collect()
        })
    }

    pub fn switch_tab(&self, tab: ActiveTab) -> Result<()> {
        self.require_role(tab.required_role())?;
        self.store.set_active_tab(tab);
        Ok(())
    }
}

impl Default for PayrollSession {
    fn default() -> Self {
        Self::new()
    }
}
