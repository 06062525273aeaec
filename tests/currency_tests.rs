use bundul_core::currency::{
    format_currency, from_minor_units, to_minor_units, total_amount, total_minor_units,
};

#[test]
fn formats_dollar_amounts() {
    assert_eq!(format_currency(7.99), "$7.99");
    assert_eq!(format_currency(235.92), "$235.92");
    assert_eq!(format_currency(12345.678), "$12,345.68");
}

#[test]
fn non_finite_amounts_render_as_invalid() {
    assert_eq!(format_currency(f64::NAN), "Invalid Amount");
    assert_eq!(format_currency(f64::INFINITY), "Invalid Amount");
}

#[test]
fn negative_zero_after_rounding_has_no_sign() {
    assert_eq!(format_currency(-0.001), "$0.00");
    assert_eq!(format_currency(-2.5), "-$2.50");
}

#[test]
fn every_amount_is_shown_in_dollars_with_cents() {
    assert_eq!(format_currency(1500.0), "$1,500.00");
    assert_eq!(format_currency(0.5), "$0.50");
    assert_eq!(format_currency(1.0e9), "$1,000,000,000.00");
}

#[test]
fn cents_totals_avoid_float_drift() {
    let amounts = [0.1, 0.2, 0.3];
    assert_eq!(total_minor_units(&amounts), Some(60));
    assert_eq!(to_minor_units(14.99), Some(1499));
    assert_eq!(from_minor_units(2498), 24.98);
}

#[test]
fn large_totals_stay_finite_and_positive() {
    let amounts = [6.0e16, 6.0e16, 14.99];
    let total = total_amount(&amounts);
    assert!(total.is_finite());
    assert!(total >= 1.2e17);
}
