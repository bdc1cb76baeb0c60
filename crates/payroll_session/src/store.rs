//! Session state store.
//!
//! [`SessionStore`] owns the one copy of [`SessionState`] for a session and
//! publishes every committed change through a `tokio::sync::watch` channel,
//! so subscribers always read the latest snapshot.
//!
//! Setters are plain replace-style assignments. They do not validate
//! amounts or roster uniqueness; that is the job of the roster, treasury
//! and claim operations that compute the new values.

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::types::{ActiveTab, Amount, ClaimRecord, Employee, Roles};

/// Everything the dashboard knows about the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    // Connection
    pub is_connected: bool,
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    pub balance: Amount,
    pub usn_balance: Amount,

    // Roles
    #[serde(flatten)]
    pub roles: Roles,

    // Employer side
    pub employees: Vec<Employee>,
    pub treasury_balance: Amount,

    // Employee side
    pub employee_data: Option<Employee>,
    /// Newest first.
    pub claim_history: Vec<ClaimRecord>,

    // UI
    pub active_tab: ActiveTab,
    pub is_loading: bool,
    pub processing_action: Option<String>,
}

#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::default());
        Self { tx }
    }

    /// Clone of the latest committed state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Reads from the latest state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Receiver notified on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Marks the wallet connected and grants both dashboard roles.
    pub fn connect(&self, address: impl Into<String>, balance: Amount, usn_balance: Amount) {
        self.connect_with_roles(address, balance, usn_balance, Roles::both());
    }

    pub fn connect_with_roles(
        &self,
        address: impl Into<String>,
        balance: Amount,
        usn_balance: Amount,
        roles: Roles,
    ) {
        let address = address.into();
        debug!("Store: connect {} with {:?}", address, roles);
        self.tx.send_modify(|state| {
            state.is_connected = true;
            state.address = Some(address);
            state.balance = balance;
            state.usn_balance = usn_balance;
            state.roles = roles;
        });
    }

    /// Same as [`reset`](Self::reset).
    pub fn disconnect(&self) {
        self.reset();
    }

    /// Restores the initial state in a single commit.
    pub fn reset(&self) {
        debug!("Store: reset");
        self.tx.send_replace(SessionState::default());
    }

    pub fn set_chain_id(&self, chain_id: Option<u64>) {
        self.tx.send_modify(|state| state.chain_id = chain_id);
    }

    pub fn set_employees(&self, employees: Vec<Employee>) {
        debug!("Store: roster now has {} entries", employees.len());
        self.tx.send_modify(|state| state.employees = employees);
    }

    pub fn set_treasury_balance(&self, balance: Amount) {
        debug!("Store: treasury balance {}", balance);
        self.tx.send_modify(|state| state.treasury_balance = balance);
    }

    pub fn set_employee_data(&self, employee: Option<Employee>) {
        self.tx.send_modify(|state| state.employee_data = employee);
    }

    pub fn set_claim_history(&self, history: Vec<ClaimRecord>) {
        self.tx.send_modify(|state| state.claim_history = history);
    }

    pub fn set_active_tab(&self, tab: ActiveTab) {
        self.tx.send_modify(|state| state.active_tab = tab);
    }

    pub fn set_loading(&self, is_loading: bool, action: Option<String>) {
        self.tx.send_modify(|state| {
            state.is_loading = is_loading;
            state.processing_action = action;
        });
    }

    /// Applies several field updates as one commit.
    pub(crate) fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(f);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{usn, TxHash};

    fn populated_store() -> SessionStore {
        let store = SessionStore::new();
        store.connect("0xA", usn(1), usn(5000));
        store.set_chain_id(Some(267));
        store.set_employees(vec![Employee::enrolled("0xA", usn(500), 1_000)]);
        store.set_treasury_balance(usn(15_000));
        store.set_employee_data(Some(Employee::enrolled("0xA", usn(500), 1_000)));
        store.set_claim_history(vec![ClaimRecord::gasless(
            usn(500),
            1,
            TxHash::new("0x01"),
        )]);
        store.set_active_tab(ActiveTab::Employee);
        store.set_loading(true, Some("Claiming salary...".to_string()));
        store
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = SessionStore::new().snapshot();
        assert!(!state.is_connected);
        assert!(state.address.is_none());
        assert_eq!(state.balance, 0);
        assert_eq!(state.roles, Roles::default());
        assert!(state.employees.is_empty());
        assert_eq!(state.active_tab, ActiveTab::Employer);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_connect_grants_both_roles() {
        let store = SessionStore::new();
        store.connect("0xA", usn(1), usn(5000));

        let state = store.snapshot();
        assert!(state.is_connected);
        assert_eq!(state.address.as_deref(), Some("0xA"));
        assert_eq!(state.usn_balance, usn(5000));
        assert!(state.roles.is_employer);
        assert!(state.roles.is_employee);
    }

    #[test]
    fn test_connect_with_explicit_roles() {
        let store = SessionStore::new();
        store.connect_with_roles(
            "0xA",
            0,
            0,
            Roles {
                is_employer: false,
                is_employee: true,
            },
        );
        assert!(!store.read(|s| s.roles.is_employer));
        assert!(store.read(|s| s.roles.is_employee));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let store = populated_store();
        assert_ne!(store.snapshot(), SessionState::default());

        store.disconnect();
        assert_eq!(store.snapshot(), SessionState::default());
    }

    #[test]
    fn test_switching_tabs_has_no_side_effects() {
        let store = populated_store();
        let before = store.snapshot();

        store.set_active_tab(ActiveTab::Employer);
        let after = store.snapshot();

        assert_eq!(after.active_tab, ActiveTab::Employer);
        assert_eq!(SessionState { active_tab: before.active_tab, ..after }, before);
    }

    #[test]
    fn test_setters_do_not_validate() {
        let store = SessionStore::new();
        store.set_treasury_balance(-usn(10));
        store.set_employees(vec![
            Employee::enrolled("0xA", usn(1), 0),
            Employee::enrolled("0xa", usn(2), 0),
        ]);
        assert_eq!(store.read(|s| s.treasury_balance), -usn(10));
        assert_eq!(store.read(|s| s.employees.len()), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_snapshot() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set_treasury_balance(usn(7));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().treasury_balance, usn(7));

        store.reset();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::default());
    }

    #[test]
    fn test_state_serializes_role_flags_at_top_level() {
        let json = serde_json::to_value(populated_store().snapshot()).unwrap();
        assert_eq!(json["isEmployer"], serde_json::json!(true));
        assert_eq!(json["isEmployee"], serde_json::json!(true));
        assert_eq!(json["activeTab"], serde_json::json!("employee"));
    }
}
