//! Owner of the payments screen state and the entry point for user intents.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    catalog::{Catalog, PaymentRecord},
    config::Config,
    engine::{reconcile, FilterMode, PaymentsView, ViewQuery},
    errors::BundulError,
    overlay::{LoadReport, PaidOverlay},
    storage::KeyValueStore,
    time::Clock,
    workflow::{PayLaterPrompt, PaymentConfirmation, PaymentWorkflow, WorkflowState},
};

/// Holds the catalog handle, the paid overlay with its store, the active
/// query, and the pay-now workflow. Every derived list is recomputed from
/// these on request.
pub struct PaymentsScreen {
    catalog: Arc<Catalog>,
    overlay: PaidOverlay,
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    query: ViewQuery,
    workflow: PaymentWorkflow,
}

impl PaymentsScreen {
    /// Creates the screen with an empty overlay. Call [`PaymentsScreen::on_focus`] to load it.
    pub fn new(
        catalog: Arc<Catalog>,
        store: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            overlay: PaidOverlay::new(),
            store,
            clock,
            query: ViewQuery::default(),
            workflow: PaymentWorkflow::new(),
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.query.due_soon_window_days = config.due_soon_window_days;
        self.workflow = PaymentWorkflow::with_timeout(config.confirmation_timeout());
        self
    }

    /// Loads the paid overlay from the store. Safe to call repeatedly.
    pub fn on_focus(&mut self) -> LoadReport {
        let report = self.overlay.reload(self.store.as_ref());
        debug!(
            paid = self.overlay.len(),
            skipped = report.skipped,
            fell_back = report.fell_back,
            "payments screen focused"
        );
        report
    }

    pub fn refresh(&mut self) -> LoadReport {
        self.on_focus()
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query.search = query.into();
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.query.filter = mode;
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> PaymentsView {
        reconcile(&self.catalog, &self.overlay, &self.query, self.today())
    }

    /// Raw overlay contents, as the payment history tab shows them.
    pub fn paid_history(&self) -> &[PaymentRecord] {
        self.overlay.records()
    }

    pub fn workflow_state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn selected_payment(&self) -> Option<&PaymentRecord> {
        self.workflow.selected_payment()
    }

    pub fn confirmation_banner(&self) -> Option<&PaymentRecord> {
        self.workflow.confirmation_banner()
    }

    /// Opens the details of catalog payment `id`. Paid and unknown ids are rejected.
    pub fn select_for_payment(&mut self, id: u32) -> Result<&PaymentRecord, BundulError> {
        let record = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(BundulError::PaymentNotFound(id))?;
        if self.overlay.contains(id) {
            return Err(BundulError::AlreadyPaid(id));
        }
        self.workflow.select_for_payment(record.with_paid(false))?;
        self.workflow
            .selected_payment()
            .ok_or(BundulError::PaymentNotFound(id))
    }

    pub fn pay_later(&mut self) -> Result<(), BundulError> {
        self.workflow.pay_later()
    }

    pub fn resolve_pay_later(&mut self, confirmed: bool) -> Result<(), BundulError> {
        self.workflow.resolve_pay_later(confirmed)
    }

    pub fn pay_later_with(&mut self, prompt: &mut dyn PayLaterPrompt) -> Result<bool, BundulError> {
        self.workflow.pay_later_with(prompt)
    }

    pub fn close_detail(&mut self) -> Result<(), BundulError> {
        self.workflow.close_detail()
    }

    pub fn confirm_payment(&mut self) -> Result<PaymentConfirmation, BundulError> {
        let now = self.clock.now();
        self.workflow
            .confirm_payment(&mut self.overlay, self.store.as_ref(), now)
    }

    pub fn dismiss_confirmation(&mut self) -> bool {
        self.workflow.dismiss_confirmation()
    }

    /// Fires the confirmation timer if it is due. Call from the event loop.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.workflow.poll_timer(now)
    }

    pub fn teardown(&mut self) {
        self.workflow.teardown();
    }
}

impl Drop for PaymentsScreen {
    fn drop(&mut self) {
        self.teardown();
    }
}
