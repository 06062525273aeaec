mod common;

use bundul_core::{errors::BundulError, Catalog, WorkflowState};
use chrono::Duration;
use common::{memory_screen, two_bill_catalog};

#[test]
fn confirm_then_dismiss_leaves_nothing_for_the_timer() {
    let (mut screen, clock) = memory_screen(two_bill_catalog());
    screen.select_for_payment(1).unwrap();
    screen.confirm_payment().unwrap();
    assert_eq!(screen.confirmation_banner().map(|r| r.id), Some(1));

    assert!(screen.dismiss_confirmation());
    assert!(screen.confirmation_banner().is_none());

    clock.advance(Duration::seconds(10));
    assert!(!screen.tick());
    assert_eq!(screen.workflow_state(), &WorkflowState::Idle);
}

#[test]
fn banner_expires_after_three_seconds() {
    let (mut screen, clock) = memory_screen(two_bill_catalog());
    screen.select_for_payment(2).unwrap();
    screen.confirm_payment().unwrap();

    clock.advance(Duration::milliseconds(2999));
    assert!(!screen.tick());
    assert!(screen.confirmation_banner().is_some());

    clock.advance(Duration::milliseconds(1));
    assert!(screen.tick());
    assert!(screen.confirmation_banner().is_none());
}

#[test]
fn pay_later_confirmed_drops_selection() {
    let (mut screen, _) = memory_screen(two_bill_catalog());
    screen.select_for_payment(1).unwrap();
    screen.pay_later().unwrap();
    assert!(matches!(
        screen.workflow_state(),
        WorkflowState::AwaitingPayLaterConfirmation { .. }
    ));
    screen.resolve_pay_later(true).unwrap();
    assert!(screen.selected_payment().is_none());
    assert!(screen.paid_history().is_empty());
}

#[test]
fn pay_later_cancelled_keeps_details_open() {
    let (mut screen, _) = memory_screen(two_bill_catalog());
    screen.select_for_payment(2).unwrap();
    let mut asked = Vec::new();
    let postponed = screen
        .pay_later_with(&mut |record: &bundul_core::PaymentRecord| {
            asked.push(record.service.clone());
            false
        })
        .unwrap();
    assert!(!postponed);
    assert_eq!(asked, vec!["Spotify".to_string()]);
    assert_eq!(screen.selected_payment().map(|r| r.id), Some(2));
}

#[test]
fn confirm_without_selection_is_rejected() {
    let (mut screen, _) = memory_screen(two_bill_catalog());
    let err = screen.confirm_payment().unwrap_err();
    assert!(matches!(err, BundulError::InvalidTransition { .. }));
    assert!(screen.paid_history().is_empty());
}

#[test]
fn paid_records_cannot_be_selected_again() {
    let (mut screen, _) = memory_screen(Catalog::demo());
    screen.select_for_payment(5).unwrap();
    screen.confirm_payment().unwrap();
    let err = screen.select_for_payment(5).unwrap_err();
    assert!(matches!(err, BundulError::AlreadyPaid(5)));
}

#[test]
fn selecting_during_banner_replaces_it_and_cancels_timer() {
    let (mut screen, clock) = memory_screen(Catalog::demo());
    screen.select_for_payment(5).unwrap();
    screen.confirm_payment().unwrap();

    screen.select_for_payment(8).unwrap();
    assert!(screen.confirmation_banner().is_none());
    clock.advance(Duration::seconds(5));
    assert!(!screen.tick());
    assert_eq!(screen.selected_payment().map(|r| r.id), Some(8));
}

#[test]
fn teardown_clears_pending_banner() {
    let (mut screen, clock) = memory_screen(two_bill_catalog());
    screen.select_for_payment(1).unwrap();
    screen.confirm_payment().unwrap();
    screen.teardown();
    clock.advance(Duration::seconds(5));
    assert!(!screen.tick());
    assert_eq!(screen.workflow_state(), &WorkflowState::Idle);
}
