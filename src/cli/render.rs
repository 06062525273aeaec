//! Plain-text rendering of screen data. Colour is applied by the caller.

use chrono::NaiveDate;

use crate::{
    catalog::{brand_for, service_initials, PaymentRecord},
    currency::format_currency,
    engine::{EmptyState, FilterMode, PaymentsView},
    time::{days_until_due, format_date, is_due_within, DueBadge},
};

pub const SCREEN_TITLE: &str = "Due Payments";

pub fn payment_line(record: &PaymentRecord) -> String {
    let status = if record.paid { "  paid" } else { "" };
    format!(
        "#{:<3} {:<22} {:>10}  due {}{}",
        record.id,
        record.service,
        format_currency(record.amount),
        format_date(record.due_date),
        status
    )
}

pub fn insight_lines(view: &PaymentsView) -> [String; 2] {
    [
        format!(
            "You've paid {} in {}",
            format_currency(view.paid_total),
            view.month
        ),
        format!(
            "{} upcoming payments, {}",
            view.unpaid_count,
            format_currency(view.unpaid_total)
        ),
    ]
}

pub fn detail_lines(record: &PaymentRecord) -> Vec<String> {
    let avatar = match brand_for(&record.service) {
        Some(brand) => format!("Logo: {}", brand.logo),
        None => format!("Avatar: {}", service_initials(&record.service)),
    };
    vec![
        format!("Service: {}", record.service),
        format!("Amount: {}", format_currency(record.amount)),
        format!("Due Date: {}", format_date(record.due_date)),
        avatar,
    ]
}

pub fn banner_lines(record: &PaymentRecord) -> [String; 3] {
    [
        "Payment Confirmed".to_string(),
        format!("{} {}", record.service, format_currency(record.amount)),
        "Your payment has been processed successfully".to_string(),
    ]
}

/// Badge shown next to cards in the due-soon list.
pub fn due_badge(
    record: &PaymentRecord,
    filter: FilterMode,
    today: NaiveDate,
    window_days: i64,
) -> Option<DueBadge> {
    if filter != FilterMode::DueSoon || record.paid {
        return None;
    }
    if !is_due_within(record.due_date, today, window_days) {
        return None;
    }
    Some(DueBadge::for_days(days_until_due(record.due_date, today)))
}

pub fn pay_later_question(record: &PaymentRecord) -> String {
    format!("Are you sure you want to pay {} later?", record.service)
}

pub fn empty_state_lines(state: EmptyState) -> [&'static str; 2] {
    [state.title(), state.subtitle()]
}

/// Time-of-day greeting, e.g. `Good evening, Tomide`.
pub fn greeting(hour: u32, name: Option<&str>) -> String {
    let part = match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    };
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{}, {}", part, name),
        None => part.to_string(),
    }
}

pub fn filter_label(mode: FilterMode) -> &'static str {
    match mode {
        FilterMode::All => "All",
        FilterMode::DueSoon => "Due Soon",
        FilterMode::Paid => "Paid",
    }
}
