#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bundul_core::{
    errors::BundulError,
    storage::{self, KeyValueStore, MemoryStore},
    time::FixedClock,
    Catalog, PaymentRecord, PaymentsScreen,
};
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory that outlives the calling test.
pub fn temp_base_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 22).expect("valid date")
}

/// Netflix due tomorrow and Spotify due in ten days.
pub fn two_bill_catalog() -> Catalog {
    Catalog::new(vec![
        PaymentRecord::new(1, "Netflix", 14.99, today() + Duration::days(1)),
        PaymentRecord::new(2, "Spotify", 9.99, today() + Duration::days(10)),
    ])
    .expect("valid catalog")
}

pub fn screen_with(
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
) -> (PaymentsScreen, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::on(today()));
    let mut screen = PaymentsScreen::new(Arc::new(catalog), store, clock.clone());
    screen.on_focus();
    (screen, clock)
}

pub fn memory_screen(catalog: Catalog) -> (PaymentsScreen, Arc<FixedClock>) {
    screen_with(catalog, Box::new(MemoryStore::new()))
}

pub fn ids(records: &[PaymentRecord]) -> Vec<u32> {
    records.iter().map(|record| record.id).collect()
}

/// Store whose writes always fail; reads report an empty store.
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> storage::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> storage::Result<()> {
        Err(BundulError::Storage("disk full".into()))
    }
}
