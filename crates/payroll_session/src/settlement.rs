//! Transaction settlement.
//!
//! [`MockSettlement`] stands in for a relayer that submits the transaction
//! and pays its fee: it sleeps for a fixed latency and hands back a random
//! transaction hash.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rand::RngCore;

use crate::error::SettlementError;
use crate::types::TxHash;

/// Number of hex characters in a transaction hash, excluding the `0x` prefix.
pub const TX_HASH_HEX_LEN: usize = 64;

/// Default simulated settlement latency.
pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_millis(2000);

#[async_trait]
pub trait Settlement: Send + Sync {
    /// Submits a transaction and waits until it is final.
    async fn settle(&self) -> Result<TxHash, SettlementError>;
}

#[derive(Debug, Clone)]
pub struct MockSettlement {
    delay: Duration,
}

impl MockSettlement {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockSettlement {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_DELAY)
    }
}

#[async_trait]
impl Settlement for MockSettlement {
    async fn settle(&self) -> Result<TxHash, SettlementError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let tx_hash = random_tx_hash();
        debug!("Simulated settlement finished: {}", tx_hash);
        Ok(tx_hash)
    }
}

/// Generates a `0x`-prefixed, 64-character lowercase hex hash.
pub fn random_tx_hash() -> TxHash {
    let mut bytes = [0u8; TX_HASH_HEX_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    TxHash::new(format!("0x{}", hex::encode(bytes)))
}

/// Checks the `0x` + 64 hex character format.
pub fn is_valid_tx_hash(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => {
            digits.len() == TX_HASH_HEX_LEN && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
