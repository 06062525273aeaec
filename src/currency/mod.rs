//! Money helpers for the app's single currency, US dollars.

const INVALID_AMOUNT: &str = "Invalid Amount";
const SYMBOL: &str = "$";
const CENTS_PER_DOLLAR: f64 = 100.0;
const DECIMAL_SEPARATOR: char = '.';
const GROUPING_SEPARATOR: char = ',';

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

impl Amounted for f64 {
    fn amount(&self) -> f64 {
        *self
    }
}

/// Converts a dollar amount to whole cents, rounding half away from zero.
/// Returns `None` when the amount is not finite or does not fit in `i128`.
pub fn to_minor_units(amount: f64) -> Option<i128> {
    let cents = (amount * CENTS_PER_DOLLAR).round();
    if !cents.is_finite() || cents.abs() >= i128::MAX as f64 {
        return None;
    }
    Some(cents as i128)
}

pub fn from_minor_units(cents: i128) -> f64 {
    cents as f64 / CENTS_PER_DOLLAR
}

/// Exact sum in cents, or `None` if any amount or the running total leaves the `i128` range.
pub fn total_minor_units<T: Amounted>(items: &[T]) -> Option<i128> {
    items.iter().try_fold(0i128, |total, item| {
        to_minor_units(item.amount()).and_then(|cents| total.checked_add(cents))
    })
}

/// Sum of amounts; an empty slice totals zero. Falls back to a plain float
/// sum when the cents total is out of range.
pub fn total_amount<T: Amounted>(items: &[T]) -> f64 {
    match total_minor_units(items) {
        Some(cents) => from_minor_units(cents),
        None => items.iter().map(Amounted::amount).sum(),
    }
}

/// Renders a non-negative value with two decimals and thousands separators.
fn format_dollars(value: f64) -> String {
    let body = format!("{:.2}", value);
    match body.split_once(DECIMAL_SEPARATOR) {
        Some((whole, cents)) => format!(
            "{}{}{}",
            group_digits(whole),
            DECIMAL_SEPARATOR,
            cents
        ),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats an amount as US dollars (`$1,234.50`, `-$5.00`).
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return INVALID_AMOUNT.to_string();
    }
    let body = format_dollars(amount.abs());
    // -0.001 rounds to "0.00"; keep it unsigned.
    if amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        format!("-{}{}", SYMBOL, body)
    } else {
        format!("{}{}", SYMBOL, body)
    }
}
