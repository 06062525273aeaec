//! Payment records and the immutable catalog they come from.

mod brand;

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{currency::Amounted, errors::BundulError};

pub use brand::{brand_for, service_initials, ServiceBrand};

/// A single recurring bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: u32,
    pub service: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

impl PaymentRecord {
    pub fn new(id: u32, service: impl Into<String>, amount: f64, due_date: NaiveDate) -> Self {
        Self {
            id,
            service: service.into(),
            amount,
            due_date,
            paid: false,
        }
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Decodes a stored record, rejecting entries with missing fields or unusable values.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BundulError> {
        let record: PaymentRecord = serde_json::from_value(value)
            .map_err(|err| BundulError::MalformedRecord(err.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), BundulError> {
        if self.service.trim().is_empty() {
            return Err(BundulError::MalformedRecord(format!(
                "record {} has an empty service name",
                self.id
            )));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(BundulError::MalformedRecord(format!(
                "record {} has an invalid amount {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }

    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        self.service.to_lowercase().contains(lowercase_query)
    }
}

impl Amounted for PaymentRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Returns a copy sorted ascending by due date. Equal dates keep their relative order.
pub fn sort_by_due_date(records: &[PaymentRecord]) -> Vec<PaymentRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.due_date);
    sorted
}

/// Read-only source of truth for every bill the app knows about.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PaymentRecord>,
}

impl Catalog {
    pub fn new(records: Vec<PaymentRecord>) -> Result<Self, BundulError> {
        let mut seen = HashSet::new();
        for record in &records {
            record
                .validate()
                .map_err(|err| BundulError::InvalidCatalog(err.to_string()))?;
            if !seen.insert(record.id) {
                return Err(BundulError::InvalidCatalog(format!(
                    "duplicate payment id {}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&PaymentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The demo subscriptions, dated as of [`DEMO_ANCHOR`].
    pub fn demo() -> Self {
        Self {
            records: demo_records(),
        }
    }

    /// The demo subscriptions shifted so that `today` plays the role of the anchor day.
    ///
    /// Fails when a shifted due date would leave the calendar range.
    pub fn demo_for(today: NaiveDate) -> Result<Self, BundulError> {
        let offset = today - demo_anchor();
        let records = demo_records()
            .into_iter()
            .map(|mut record| -> Result<PaymentRecord, BundulError> {
                record.due_date = record.due_date.checked_add_signed(offset).ok_or_else(|| {
                    BundulError::Config(format!(
                        "today {} is too far out to date the demo payments",
                        today
                    ))
                })?;
                Ok(record)
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { records })
    }
}

/// Day the demo data was written against: Disney+ is due that day, Adobe the next.
pub const DEMO_ANCHOR: (i32, u32, u32) = (2025, 10, 22);

fn demo_anchor() -> NaiveDate {
    let (y, m, d) = DEMO_ANCHOR;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn demo_records() -> Vec<PaymentRecord> {
    let anchor = demo_anchor();
    let on = |days: i64| anchor + Duration::days(days);
    vec![
        PaymentRecord::new(1, "Netflix", 14.99, on(-3)).with_paid(true),
        PaymentRecord::new(2, "Apple One", 29.99, on(10)),
        PaymentRecord::new(3, "Spotify", 9.99, on(-4)).with_paid(true),
        PaymentRecord::new(4, "Amazon Prime", 12.99, on(3)),
        PaymentRecord::new(5, "Disney+", 7.99, on(0)),
        PaymentRecord::new(6, "Hulu", 6.99, on(-2)).with_paid(true),
        PaymentRecord::new(7, "Microsoft 365", 99.99, on(24)),
        PaymentRecord::new(8, "Adobe Creative Suite", 52.99, on(1)),
    ]
}
