//! The persisted list of payments the user has marked paid.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    catalog::PaymentRecord,
    currency::{total_amount, total_minor_units},
    errors::BundulError,
    storage::KeyValueStore,
};

/// Store key holding the serialized overlay.
pub const PAID_PAYMENTS_STORAGE_KEY: &str = "@bundul_paid_payments";

/// Summary of a load pass, kept for diagnostics and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
    /// Set when the stored value could not be read at all and the overlay fell back to empty.
    pub fell_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    /// Nothing is written while the overlay is empty.
    SkippedEmpty,
}

/// Ordered, append-only set of paid records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaidOverlay {
    records: Vec<PaymentRecord>,
}

impl PaidOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<PaymentRecord>) -> Self {
        let mut overlay = Self::new();
        for record in records {
            overlay.append(record);
        }
        overlay
    }

    /// Loads the overlay, degrading to empty on any read failure.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut overlay = Self::new();
        overlay.reload(store);
        overlay
    }

    /// Replaces the in-memory contents with what the store holds.
    pub fn reload(&mut self, store: &dyn KeyValueStore) -> LoadReport {
        let raw = match store.get(PAID_PAYMENTS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.records.clear();
                return LoadReport::default();
            }
            Err(err) => {
                warn!(error = %err, "failed to read paid payments; starting empty");
                self.records.clear();
                return LoadReport {
                    fell_back: true,
                    ..LoadReport::default()
                };
            }
        };

        match decode_records(&raw) {
            Ok((records, skipped)) => {
                let report = LoadReport {
                    loaded: records.len(),
                    skipped,
                    fell_back: false,
                };
                self.records.clear();
                for record in records {
                    self.append(record);
                }
                debug!(loaded = report.loaded, skipped, "paid payments loaded");
                report
            }
            Err(err) => {
                warn!(error = %err, "stored paid payments are unreadable; starting empty");
                self.records.clear();
                LoadReport {
                    fell_back: true,
                    ..LoadReport::default()
                }
            }
        }
    }

    /// Writes the overlay under [`PAID_PAYMENTS_STORAGE_KEY`] unless it is empty.
    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<PersistOutcome, BundulError> {
        if self.records.is_empty() {
            return Ok(PersistOutcome::SkippedEmpty);
        }
        let json = serde_json::to_string(&self.records)?;
        store.set(PAID_PAYMENTS_STORAGE_KEY, &json)?;
        Ok(PersistOutcome::Written)
    }

    /// Appends `record` marked paid. Returns `false` when its id is already present.
    pub fn append(&mut self, record: PaymentRecord) -> bool {
        if self.contains(record.id) {
            return false;
        }
        self.records.push(record.with_paid(true));
        true
    }

    pub fn contains(&self, id: u32) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total(&self) -> f64 {
        total_amount(&self.records)
    }

    pub fn total_minor_units(&self) -> Option<i128> {
        total_minor_units(&self.records)
    }
}

fn decode_records(raw: &str) -> Result<(Vec<PaymentRecord>, usize), BundulError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        return Err(BundulError::MalformedRecord(
            "paid payments entry is not a list".into(),
        ));
    };
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        match PaymentRecord::from_value(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                warn!(error = %err, "skipping malformed paid payment");
            }
        }
    }
    Ok((records, skipped))
}
