use std::fmt;

/// Colour band of the due badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Relaxed,
    Approaching,
    Urgent,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::Relaxed => "relaxed",
            Urgency::Approaching => "approaching",
            Urgency::Urgent => "urgent",
        };
        f.write_str(label)
    }
}

/// Presentation data for the "N days left" badge shown on due-soon cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueBadge {
    pub days_left: i64,
    pub label: String,
    pub urgency: Urgency,
    /// Width of the accent bar, 0..=100.
    pub progress_percent: u8,
}

impl DueBadge {
    pub fn for_days(days_left: i64) -> Self {
        let label = if days_left == 1 {
            "1 day left".to_string()
        } else {
            format!("{} days left", days_left)
        };
        let urgency = if days_left >= 5 {
            Urgency::Relaxed
        } else if days_left >= 3 {
            Urgency::Approaching
        } else {
            Urgency::Urgent
        };
        let progress = (5 - days_left).saturating_mul(20).clamp(0, 100);
        Self {
            days_left,
            label,
            urgency,
            progress_percent: progress as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_label_for_one_day() {
        assert_eq!(DueBadge::for_days(1).label, "1 day left");
        assert_eq!(DueBadge::for_days(0).label, "0 days left");
        assert_eq!(DueBadge::for_days(3).label, "3 days left");
    }

    #[test]
    fn progress_bar_fills_as_due_date_nears() {
        assert_eq!(DueBadge::for_days(5).progress_percent, 0);
        assert_eq!(DueBadge::for_days(3).progress_percent, 40);
        assert_eq!(DueBadge::for_days(0).progress_percent, 100);
        assert_eq!(DueBadge::for_days(-4).progress_percent, 100);
        assert_eq!(DueBadge::for_days(30).progress_percent, 0);
    }

    #[test]
    fn urgency_bands() {
        assert_eq!(DueBadge::for_days(6).urgency, Urgency::Relaxed);
        assert_eq!(DueBadge::for_days(3).urgency, Urgency::Approaching);
        assert_eq!(DueBadge::for_days(2).urgency, Urgency::Urgent);
    }
}
