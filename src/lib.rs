#![doc(test(attr(deny(warnings))))]

//! Masjid Core provides the domain primitives behind a mosque mobile-app
//! backend: prayer and Jumuah schedules, events, fundraising campaigns,
//! donation settings, and donation analytics, persisted as JSON documents.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod times;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Masjid Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
