//! Reconciliation of the catalog with the paid overlay, plus search and filtering.
//!
//! Two behaviours are kept on purpose even though the names suggest otherwise:
//! `FilterMode::All` lists only unpaid bills, and `FilterMode::Paid` returns the
//! raw overlay without applying the search text or re-sorting.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{sort_by_due_date, Catalog, PaymentRecord},
    currency::total_amount,
    errors::BundulError,
    overlay::PaidOverlay,
    time::{is_due_within, month_label, DUE_SOON_WINDOW_DAYS},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    /// Every unpaid bill.
    #[default]
    All,
    DueSoon,
    Paid,
}

impl FilterMode {
    pub const MODES: [FilterMode; 3] = [FilterMode::All, FilterMode::DueSoon, FilterMode::Paid];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::DueSoon => "dueSoon",
            FilterMode::Paid => "paid",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = BundulError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "unpaid" => Ok(FilterMode::All),
            "duesoon" | "due-soon" | "due_soon" | "soon" => Ok(FilterMode::DueSoon),
            "paid" => Ok(FilterMode::Paid),
            other => Err(BundulError::Config(format!(
                "unknown filter `{}` (expected all, dueSoon, or paid)",
                other
            ))),
        }
    }
}

/// Everything the engine needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub filter: FilterMode,
    pub search: String,
    pub due_soon_window_days: i64,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            filter: FilterMode::All,
            search: String::new(),
            due_soon_window_days: DUE_SOON_WINDOW_DAYS,
        }
    }
}

impl ViewQuery {
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Message shown when the filtered list comes back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoHistory,
    AllCaughtUp,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            EmptyState::NoHistory => "No payment history yet",
            EmptyState::AllCaughtUp => "You're all caught up!",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            EmptyState::NoHistory => "Your paid subscriptions will appear here",
            EmptyState::AllCaughtUp => "No payments due right now",
        }
    }
}

/// Derived data rendered by the payments screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsView {
    pub filter: FilterMode,
    pub filtered_payments: Vec<PaymentRecord>,
    pub unpaid_count: usize,
    pub unpaid_total: f64,
    pub paid_total: f64,
    pub month: String,
    pub empty_state: Option<EmptyState>,
}

/// Copies every catalog record with `paid` taken from the overlay.
pub fn merge(catalog: &Catalog, overlay: &PaidOverlay) -> Vec<PaymentRecord> {
    catalog
        .records()
        .iter()
        .map(|record| {
            let mut merged = record.clone();
            merged.paid = overlay.contains(record.id);
            merged
        })
        .collect()
}

/// Keeps records whose service name contains `query`, ignoring case. Blank queries keep all.
pub fn search(records: Vec<PaymentRecord>, query: &str) -> Vec<PaymentRecord> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return records;
    }
    let needle = trimmed.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.matches_query(&needle))
        .collect()
}

/// Runs merge, sort, search, and filter in that order and computes the insight totals.
pub fn reconcile(
    catalog: &Catalog,
    overlay: &PaidOverlay,
    query: &ViewQuery,
    today: NaiveDate,
) -> PaymentsView {
    let filtered_payments = match query.filter {
        FilterMode::Paid => overlay.records().to_vec(),
        mode => {
            let sorted = sort_by_due_date(&merge(catalog, overlay));
            search(sorted, &query.search)
                .into_iter()
                .filter(|record| match mode {
                    FilterMode::DueSoon => {
                        !record.paid
                            && is_due_within(record.due_date, today, query.due_soon_window_days)
                    }
                    _ => !record.paid,
                })
                .collect()
        }
    };

    let unpaid: Vec<&PaymentRecord> = filtered_payments.iter().filter(|r| !r.paid).collect();
    let unpaid_amounts: Vec<f64> = unpaid.iter().map(|record| record.amount).collect();

    let empty_state = if filtered_payments.is_empty() {
        Some(match query.filter {
            FilterMode::Paid => EmptyState::NoHistory,
            _ => EmptyState::AllCaughtUp,
        })
    } else {
        None
    };

    PaymentsView {
        filter: query.filter,
        unpaid_count: unpaid.len(),
        unpaid_total: total_amount(&unpaid_amounts),
        paid_total: overlay.total(),
        month: month_label(today),
        empty_state,
        filtered_payments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 22).unwrap()
    }

    fn catalog() -> Catalog {
        let t = today();
        Catalog::new(vec![
            PaymentRecord::new(1, "Netflix", 14.99, t + Duration::days(1)),
            PaymentRecord::new(2, "Spotify", 9.99, t + Duration::days(10)),
            PaymentRecord::new(3, "Hulu", 6.99, t - Duration::days(1)),
        ])
        .unwrap()
    }

    fn ids(view: &PaymentsView) -> Vec<u32> {
        view.filtered_payments.iter().map(|r| r.id).collect()
    }

    #[test]
    fn filter_mode_parses_aliases() {
        assert_eq!("dueSoon".parse::<FilterMode>().unwrap(), FilterMode::DueSoon);
        assert_eq!("due-soon".parse::<FilterMode>().unwrap(), FilterMode::DueSoon);
        assert_eq!("PAID".parse::<FilterMode>().unwrap(), FilterMode::Paid);
        assert!("later".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::DueSoon.to_string(), "dueSoon");
    }

    #[test]
    fn all_mode_lists_unpaid_sorted() {
        let view = reconcile(&catalog(), &PaidOverlay::new(), &ViewQuery::default(), today());
        assert_eq!(ids(&view), vec![3, 1, 2]);
        assert_eq!(view.unpaid_count, 3);
        assert_eq!(view.unpaid_total, 31.97);
        assert_eq!(view.paid_total, 0.0);
        assert_eq!(view.month, "October");
    }

    #[test]
    fn due_soon_excludes_overdue_and_distant() {
        let query = ViewQuery::default().with_filter(FilterMode::DueSoon);
        let view = reconcile(&catalog(), &PaidOverlay::new(), &query, today());
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn paid_mode_ignores_search() {
        let catalog = catalog();
        let overlay = PaidOverlay::from_records(vec![catalog.get(2).unwrap().clone()]);
        let query = ViewQuery::default()
            .with_filter(FilterMode::Paid)
            .with_search("zzz");
        let view = reconcile(&catalog, &overlay, &query, today());
        assert_eq!(ids(&view), vec![2]);
        assert_eq!(view.unpaid_count, 0);
        assert_eq!(view.paid_total, 9.99);
    }

    #[test]
    fn empty_catalog_yields_zero_totals() {
        let view = reconcile(
            &Catalog::empty(),
            &PaidOverlay::new(),
            &ViewQuery::default(),
            today(),
        );
        assert!(view.filtered_payments.is_empty());
        assert_eq!(view.unpaid_total, 0.0);
        assert_eq!(view.empty_state, Some(EmptyState::AllCaughtUp));
    }

    #[test]
    fn huge_amounts_do_not_overflow_totals() {
        let catalog = Catalog::new(vec![
            PaymentRecord::new(1, "Alpha", 6.0e16, today()),
            PaymentRecord::new(2, "Beta", 6.0e16, today()),
        ])
        .unwrap();
        let view = reconcile(&catalog, &PaidOverlay::new(), &ViewQuery::default(), today());
        assert_eq!(view.unpaid_count, 2);
        assert_eq!(view.unpaid_total, 1.2e17);

        let overlay = PaidOverlay::from_records(catalog.records().to_vec());
        let view = reconcile(&catalog, &overlay, &ViewQuery::default(), today());
        assert_eq!(view.paid_total, 1.2e17);
    }

    #[test]
    fn search_helper_is_case_insensitive() {
        let found = search(catalog().records().to_vec(), "  NET ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service, "Netflix");
        assert_eq!(search(catalog().records().to_vec(), "").len(), 3);
    }
}
