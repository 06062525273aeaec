#![doc(test(attr(deny(warnings))))]

//! Bundul Core tracks recurring subscription payments: a static catalog of
//! bills, a persisted overlay of the ones already paid, the filtering engine
//! that reconciles the two, and the pay-now workflow that feeds the overlay.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod currency;
pub mod engine;
pub mod errors;
pub mod overlay;
pub mod screen;
pub mod storage;
pub mod time;
pub mod utils;
pub mod workflow;

use std::sync::Once;

pub use catalog::{Catalog, PaymentRecord};
pub use engine::{FilterMode, PaymentsView, ViewQuery};
pub use errors::BundulError;
pub use overlay::PaidOverlay;
pub use screen::PaymentsScreen;
pub use workflow::{PaymentWorkflow, WorkflowState};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bundul Core tracing initialized.");
    });
}
