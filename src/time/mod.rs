//! Calendar helpers: clocks, due-date arithmetic, and date labels.

mod badge;

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

pub use badge::{DueBadge, Urgency};

/// Inclusive upper bound, in days, of the "due soon" window.
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const INVALID_DATE: &str = "Invalid Date";

/// Clock abstracts access to the current timestamp so workflows remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock. Calendar dates follow the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock for tests and pinned demo sessions.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock pinned to midnight UTC of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Real-time clock whose calendar date is pinned. Timers still advance.
#[derive(Debug, Clone, Copy)]
pub struct PinnedDayClock {
    today: NaiveDate,
}

impl PinnedDayClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for PinnedDayClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Parses an ISO `YYYY-MM-DD` due date.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).ok()
}

/// Formats a date as `Oct 19, 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Formats raw ISO date text, falling back to `Invalid Date` for unparseable input.
pub fn format_date_str(raw: &str) -> String {
    parse_due_date(raw)
        .map(format_date)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Signed calendar-day distance from `today` to `due`. Past-due dates are negative.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// True when the payment falls due within the next three days, today included.
/// Overdue payments are not considered due soon.
pub fn is_due_soon(due: NaiveDate, today: NaiveDate) -> bool {
    is_due_within(due, today, DUE_SOON_WINDOW_DAYS)
}

pub fn is_due_within(due: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    let days = days_until_due(due, today);
    (0..=window_days).contains(&days)
}

/// Full English month name used by the insights header (`October`).
pub fn month_label(today: NaiveDate) -> String {
    today.format("%B").to_string()
}
