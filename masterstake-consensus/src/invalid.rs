//! Ledger of permanently rejected zerocoin spends and outputs.
//!
//! Forged zerocoin spends minted from an exploited accumulator proof
//! cannot be rolled back once they are buried in the chain, so the
//! network blacklists them instead: their serial numbers can never be
//! spent again, and the transparent outputs they funded can never be
//! used as inputs. The bundled blacklists are part of consensus — two
//! nodes with different ledgers would split on the first transaction
//! touching a listed record.
//!
//! The ledger is append-only and shared across verification tasks, so
//! lookups take a read lock and inserts are idempotent.

use std::collections::HashSet;
use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, warn};

use masterstake_chain::{transaction, transparent::OutPoint, zerocoin::SerialNumber};

use crate::error::BlacklistError;


/// Bundled blacklist of forged zerocoin spend serial numbers.
const INVALID_SERIALS_JSON: &str = include_str!("invalid/invalid_serials.json");

/// Bundled blacklist of transparent outputs funded by forged spends.
const INVALID_OUTPOINTS_JSON: &str = include_str!("invalid/invalid_outpoints.json");

/// Outcome of loading a blacklist resource.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Records added to the ledger.
    pub loaded: usize,
    /// Malformed records skipped.
    pub skipped: usize,
}

/// An append-only set of permanently invalid serial numbers and
/// outpoints.
#[derive(Debug, Default)]
pub struct SpendLedger {
    serials: RwLock<HashSet<SerialNumber>>,
    outpoints: RwLock<HashSet<OutPoint>>,
}

impl SpendLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `serial` permanently blacklisted?
    pub fn contains_serial(&self, serial: &SerialNumber) -> bool {
        self.serials
            .read()
            .expect("panicked threads never hold the serial lock")
            .contains(serial)
    }

    /// Is `outpoint` permanently blacklisted?
    pub fn contains_outpoint(&self, outpoint: &OutPoint) -> bool {
        self.outpoints
            .read()
            .expect("panicked threads never hold the outpoint lock")
            .contains(outpoint)
    }

    /// Blacklist `serial`, returning whether it was newly inserted.
    ///
    /// Recording an already-listed serial is a no-op that returns
    /// `false`, so callers can tell a first discovery from a replay.
    pub fn record_invalid_serial(&self, serial: SerialNumber) -> bool {
        let mut serials = self
            .serials
            .write()
            .expect("panicked threads never hold the serial lock");
        let newly_inserted = serials.insert(serial);
        if newly_inserted {
            debug!(serials = serials.len(), "recorded invalid serial");
        }
        newly_inserted
    }

    /// Blacklist `outpoint`, returning whether it was newly inserted.
    ///
    /// Recording an already-listed outpoint is a no-op that returns
    /// `false`.
    pub fn record_invalid_outpoint(&self, outpoint: OutPoint) -> bool {
        let mut outpoints = self
            .outpoints
            .write()
            .expect("panicked threads never hold the outpoint lock");
        let newly_inserted = outpoints.insert(outpoint);
        if newly_inserted {
            debug!(outpoints = outpoints.len(), "recorded invalid outpoint");
        }
        newly_inserted
    }

    /// The number of blacklisted serials.
    pub fn serial_count(&self) -> usize {
        self.serials
            .read()
            .expect("panicked threads never hold the serial lock")
            .len()
    }

    /// The number of blacklisted outpoints.
    pub fn outpoint_count(&self) -> usize {
        self.outpoints
            .read()
            .expect("panicked threads never hold the outpoint lock")
            .len()
    }

    /// Load the bundled serial blacklist into the ledger.
    pub fn load_bundled_serials(&self) -> Result<LoadReport, BlacklistError> {
        self.load_serials_from_json(INVALID_SERIALS_JSON)
    }

    /// Load the bundled outpoint blacklist into the ledger.
    pub fn load_bundled_outpoints(&self) -> Result<LoadReport, BlacklistError> {
        self.load_outpoints_from_json(INVALID_OUTPOINTS_JSON)
    }

    /// Load serials from a JSON array of hex strings.
    ///
    /// Anything other than a JSON array is fatal. Individual records
    /// that fail to parse are skipped and counted, so one bad entry
    /// cannot take the whole blacklist offline.
    pub(crate) fn load_serials_from_json(&self, json: &str) -> Result<LoadReport, BlacklistError> {
        let records = parse_blacklist_array(json)?;

        let mut report = LoadReport::default();
        for record in records {
            match parse_serial_record(&record) {
                Some(serial) => {
                    self.record_invalid_serial(serial);
                    report.loaded += 1;
                }
                None => {
                    warn!(%record, "skipping malformed serial blacklist record");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Load outpoints from a JSON array of `{"txid", "n"}` objects.
    ///
    /// Same error policy as [`Self::load_serials_from_json`].
    pub(crate) fn load_outpoints_from_json(
        &self,
        json: &str,
    ) -> Result<LoadReport, BlacklistError> {
        let records = parse_blacklist_array(json)?;

        let mut report = LoadReport::default();
        for record in records {
            match parse_outpoint_record(&record) {
                Some(outpoint) => {
                    self.record_invalid_outpoint(outpoint);
                    report.loaded += 1;
                }
                None => {
                    warn!(%record, "skipping malformed outpoint blacklist record");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }
}

fn parse_blacklist_array(json: &str) -> Result<Vec<Value>, BlacklistError> {
    match serde_json::from_str(json)? {
        Value::Array(records) => Ok(records),
        _ => Err(BlacklistError::NotAnArray),
    }
}

fn parse_serial_record(record: &Value) -> Option<SerialNumber> {
    record.as_str()?.parse().ok()
}

fn parse_outpoint_record(record: &Value) -> Option<OutPoint> {
    let txid: transaction::Hash = record.get("txid")?.as_str()?.parse().ok()?;
    let index = record.get("n")?.as_u64()?;
    let index = u32::try_from(index).ok()?;

    Some(OutPoint { hash: txid, index })
}
