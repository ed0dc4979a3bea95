//! Hard-coded checkpoint anchors and sync-progress metadata.
//!
//! Checkpoints are a veto signal: a candidate chain whose block at an
//! anchored height differs from the anchor is invalid, full stop. The
//! sync-progress metadata rides along so user interfaces can estimate
//! how much history remains to verify; it is not consensus-critical.

mod list;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Duration, Utc};

use masterstake_chain::{block, parameters::Network};

pub use list::CheckpointList;

/// The checkpoint list for a network, together with aggregate
/// statistics about the chain at the last checkpoint.
#[derive(Clone, Debug)]
pub struct CheckpointData {
    list: CheckpointList,
    last_checkpoint_time: DateTime<Utc>,
    transaction_count: u64,
    estimated_tx_per_day: u64,
}

impl CheckpointData {
    /// Returns the hard-coded checkpoint data for `network`.
    pub fn new(network: Network) -> Self {
        let list = CheckpointList::new(network);

        // The transaction totals recorded when each list was last
        // extended; the unit-test network shares the mainnet data.
        let (transaction_count, estimated_tx_per_day) = match network {
            Network::Mainnet | Network::UnitTest => (104, 480),
            Network::Testnet | Network::Regtest => (0, 250),
        };

        CheckpointData {
            list,
            last_checkpoint_time: DateTime::from_timestamp(1_656_967_050, 0)
                .expect("hard-coded checkpoint time is in range"),
            transaction_count,
            estimated_tx_per_day,
        }
    }

    /// The checkpoint list itself.
    pub fn list(&self) -> &CheckpointList {
        &self.list
    }

    /// The timestamp of the last checkpoint block.
    pub fn last_checkpoint_time(&self) -> DateTime<Utc> {
        self.last_checkpoint_time
    }

    /// The total number of transactions between genesis and the last
    /// checkpoint.
    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    /// Estimate the total number of transactions in the chain at
    /// `height`, extrapolating linearly past the last checkpoint.
    ///
    /// `target_spacing` is the network's target time between blocks.
    /// This feeds sync-progress displays only; it is not used for any
    /// validity decision.
    pub fn estimated_transactions(&self, height: block::Height, target_spacing: Duration) -> u64 {
        let last_height = self.list.max_height();
        if height <= last_height {
            return self.transaction_count;
        }

        let spacing_secs = target_spacing.num_seconds().max(1) as u64;
        let blocks_per_day = (86_400 / spacing_secs).max(1);
        let blocks_past_checkpoint = u64::from(height.0 - last_height.0);

        self.transaction_count
            .saturating_add(blocks_past_checkpoint * self.estimated_tx_per_day / blocks_per_day)
    }
}
