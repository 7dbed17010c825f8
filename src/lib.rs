#![doc(test(attr(deny(warnings))))]

//! Ledger Core records income and expense entries, persists them to a flat
//! tabular store, and derives the monthly reports consumed by presentation
//! layers.

pub mod core;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
