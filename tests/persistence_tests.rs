mod common;

use std::fs;

use bundul_core::{
    overlay::PAID_PAYMENTS_STORAGE_KEY,
    storage::{JsonFileStore, KeyValueStore},
    Catalog, FilterMode,
};
use common::{ids, screen_with, temp_base_dir, FailingStore};

#[test]
fn paid_payments_survive_a_new_screen() {
    let base = temp_base_dir();
    {
        let store = JsonFileStore::in_dir(&base).unwrap();
        let (mut screen, _) = screen_with(Catalog::demo(), Box::new(store));
        screen.select_for_payment(2).unwrap();
        let confirmation = screen.confirm_payment().unwrap();
        assert!(confirmation.persisted);
        screen.select_for_payment(4).unwrap();
        screen.confirm_payment().unwrap();
    }

    let store = JsonFileStore::in_dir(&base).unwrap();
    let (mut screen, _) = screen_with(Catalog::demo(), Box::new(store));
    screen.set_filter(FilterMode::Paid);
    assert_eq!(ids(&screen.view().filtered_payments), vec![2, 4]);
    screen.set_filter(FilterMode::All);
    assert!(!ids(&screen.view().filtered_payments).contains(&2));
}

#[test]
fn stored_value_is_a_json_array_of_records() {
    let base = temp_base_dir();
    let store = JsonFileStore::in_dir(&base).unwrap();
    let (mut screen, _) = screen_with(Catalog::demo(), Box::new(store));
    screen.select_for_payment(5).unwrap();
    screen.confirm_payment().unwrap();

    let reader = JsonFileStore::in_dir(&base).unwrap();
    let raw = reader.get(PAID_PAYMENTS_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["id"], 5);
    assert_eq!(entry["service"], "Disney+");
    assert_eq!(entry["dueDate"], "2025-10-22");
    assert_eq!(entry["paid"], true);
}

#[test]
fn write_failure_keeps_payment_in_memory() {
    let (mut screen, _) = screen_with(Catalog::demo(), Box::new(FailingStore));
    screen.select_for_payment(8).unwrap();
    let confirmation = screen.confirm_payment().unwrap();
    assert!(!confirmation.persisted);
    assert_eq!(ids(screen.paid_history()), vec![8]);
    assert!(screen.confirmation_banner().is_some());
}

#[test]
fn corrupt_store_file_falls_back_to_empty() {
    let base = temp_base_dir();
    let store = JsonFileStore::in_dir(&base).unwrap();
    fs::write(store.path(), "not json").unwrap();

    let (mut screen, _) = screen_with(Catalog::demo(), Box::new(store));
    let report = screen.refresh();
    assert!(report.fell_back);
    assert!(screen.paid_history().is_empty());
    assert_eq!(screen.view().unpaid_count, 8);
}

#[test]
fn refresh_picks_up_changes_from_another_screen() {
    let base = temp_base_dir();
    let (mut first, _) = screen_with(
        Catalog::demo(),
        Box::new(JsonFileStore::in_dir(&base).unwrap()),
    );
    let (mut second, _) = screen_with(
        Catalog::demo(),
        Box::new(JsonFileStore::in_dir(&base).unwrap()),
    );

    first.select_for_payment(1).unwrap();
    first.confirm_payment().unwrap();
    assert!(second.paid_history().is_empty());

    let report = second.refresh();
    assert_eq!(report.loaded, 1);
    assert_eq!(ids(second.paid_history()), vec![1]);
}
