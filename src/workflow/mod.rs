//! The pay-now interaction as an explicit state machine.
//!
//! ```text
//! Idle --select--> DetailShown --pay_later--> AwaitingPayLaterConfirmation
//!                      |   ^                      |  (confirm) -> Idle
//!                      |   +------(cancel)--------+
//!                      +--confirm_payment--> Confirming --timeout/dismiss--> Idle
//! ```

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};

use crate::{
    catalog::PaymentRecord, errors::BundulError, overlay::PaidOverlay, storage::KeyValueStore,
};

/// How long the confirmation banner stays up without user dismissal.
pub const CONFIRMATION_TIMEOUT_MS: i64 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    DetailShown { selected: PaymentRecord },
    AwaitingPayLaterConfirmation { selected: PaymentRecord },
    Confirming { banner: PaymentRecord },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::DetailShown { .. } => "showing payment details",
            WorkflowState::AwaitingPayLaterConfirmation { .. } => {
                "awaiting pay-later confirmation"
            }
            WorkflowState::Confirming { .. } => "showing a payment confirmation",
        }
    }
}

/// One-shot deadline that clears the confirmation banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTimer {
    id: u64,
    deadline: DateTime<Utc>,
}

impl BannerTimer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }
}

/// Asks the user whether a payment should be postponed.
pub trait PayLaterPrompt {
    fn confirm_pay_later(&mut self, record: &PaymentRecord) -> bool;
}

impl<F> PayLaterPrompt for F
where
    F: FnMut(&PaymentRecord) -> bool,
{
    fn confirm_pay_later(&mut self, record: &PaymentRecord) -> bool {
        self(record)
    }
}

/// Result of a committed payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub record: PaymentRecord,
    /// False when the overlay could not be written; the in-memory state still counts.
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub struct PaymentWorkflow {
    state: WorkflowState,
    timer: Option<BannerTimer>,
    next_timer_id: u64,
    timeout: Duration,
}

impl Default for PaymentWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentWorkflow {
    pub fn new() -> Self {
        Self::with_timeout(Duration::milliseconds(CONFIRMATION_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            state: WorkflowState::Idle,
            timer: None,
            next_timer_id: 1,
            timeout,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The payment whose details are open, including while the pay-later prompt is up.
    pub fn selected_payment(&self) -> Option<&PaymentRecord> {
        match &self.state {
            WorkflowState::DetailShown { selected }
            | WorkflowState::AwaitingPayLaterConfirmation { selected } => Some(selected),
            _ => None,
        }
    }

    pub fn confirmation_banner(&self) -> Option<&PaymentRecord> {
        match &self.state {
            WorkflowState::Confirming { banner } => Some(banner),
            _ => None,
        }
    }

    pub fn pending_timer(&self) -> Option<BannerTimer> {
        self.timer
    }

    pub fn select_for_payment(&mut self, record: PaymentRecord) -> Result<(), BundulError> {
        match self.state {
            WorkflowState::AwaitingPayLaterConfirmation { .. } => {
                return Err(BundulError::transition("select a payment", self.state.name()))
            }
            WorkflowState::Confirming { .. } => self.cancel_timer(),
            WorkflowState::Idle | WorkflowState::DetailShown { .. } => {}
        }
        debug!(id = record.id, service = %record.service, "payment selected");
        self.state = WorkflowState::DetailShown { selected: record };
        Ok(())
    }

    /// Opens the pay-later prompt for the selected payment.
    pub fn pay_later(&mut self) -> Result<(), BundulError> {
        let WorkflowState::DetailShown { selected } = &self.state else {
            return Err(BundulError::transition("pay later", self.state.name()));
        };
        self.state = WorkflowState::AwaitingPayLaterConfirmation {
            selected: selected.clone(),
        };
        Ok(())
    }

    /// Closes the pay-later prompt. Confirming drops the selection; cancelling returns to the details.
    pub fn resolve_pay_later(&mut self, confirmed: bool) -> Result<(), BundulError> {
        let WorkflowState::AwaitingPayLaterConfirmation { selected } = &self.state else {
            return Err(BundulError::transition(
                "answer the pay-later prompt",
                self.state.name(),
            ));
        };
        if confirmed {
            debug!(id = selected.id, "payment postponed");
            self.state = WorkflowState::Idle;
        } else {
            self.state = WorkflowState::DetailShown {
                selected: selected.clone(),
            };
        }
        Ok(())
    }

    /// Runs the whole pay-later exchange with a blocking prompt. Returns the user's answer.
    pub fn pay_later_with(&mut self, prompt: &mut dyn PayLaterPrompt) -> Result<bool, BundulError> {
        self.pay_later()?;
        let confirmed = match self.selected_payment() {
            Some(record) => prompt.confirm_pay_later(record),
            None => false,
        };
        self.resolve_pay_later(confirmed)?;
        Ok(confirmed)
    }

    /// Dismisses the details without postponing.
    pub fn close_detail(&mut self) -> Result<(), BundulError> {
        match self.state {
            WorkflowState::DetailShown { .. }
            | WorkflowState::AwaitingPayLaterConfirmation { .. } => {
                self.state = WorkflowState::Idle;
                Ok(())
            }
            _ => Err(BundulError::transition("close the details", self.state.name())),
        }
    }

    /// Commits the selected payment: appends it to the overlay, persists the
    /// overlay best-effort, shows the banner, and arms the banner timer.
    pub fn confirm_payment(
        &mut self,
        overlay: &mut PaidOverlay,
        store: &dyn KeyValueStore,
        now: DateTime<Utc>,
    ) -> Result<PaymentConfirmation, BundulError> {
        let WorkflowState::DetailShown { selected } = &self.state else {
            return Err(BundulError::transition("confirm a payment", self.state.name()));
        };
        if overlay.contains(selected.id) {
            return Err(BundulError::AlreadyPaid(selected.id));
        }

        let record = selected.clone().with_paid(true);
        overlay.append(record.clone());

        let persisted = match overlay.persist(store) {
            Ok(_) => true,
            Err(err) => {
                error!(id = record.id, error = %err, "failed to save paid payments");
                false
            }
        };

        let timer = BannerTimer {
            id: self.next_timer_id,
            deadline: now + self.timeout,
        };
        self.next_timer_id += 1;
        self.timer = Some(timer);
        self.state = WorkflowState::Confirming {
            banner: record.clone(),
        };
        info!(id = record.id, service = %record.service, amount = record.amount, "payment confirmed");

        Ok(PaymentConfirmation { record, persisted })
    }

    /// Hides the banner immediately. Returns `false` when no banner was showing.
    pub fn dismiss_confirmation(&mut self) -> bool {
        if !matches!(self.state, WorkflowState::Confirming { .. }) {
            return false;
        }
        self.cancel_timer();
        self.state = WorkflowState::Idle;
        true
    }

    /// Fires the banner timer when its deadline has passed. Returns `true` if it fired.
    pub fn poll_timer(&mut self, now: DateTime<Utc>) -> bool {
        match self.timer {
            Some(timer) if timer.is_due(now) => {
                self.timer = None;
                if matches!(self.state, WorkflowState::Confirming { .. }) {
                    self.state = WorkflowState::Idle;
                }
                debug!(timer = timer.id, "confirmation banner expired");
                true
            }
            _ => false,
        }
    }

    /// Cancels any pending timer and returns to idle, as when the screen goes away.
    pub fn teardown(&mut self) {
        self.cancel_timer();
        self.state = WorkflowState::Idle;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(timer = timer.id, "confirmation timer cancelled");
        }
    }
}
