//! Clinica: clinical record keeping for small medical practices.
//!
//! All durable state (patients, consultations, appointments, user
//! accounts) lives in a hosted data service. This crate provides the
//! typed entities, the remote-store and identity clients, and the
//! session-scoped [`cache::RecordCache`] that mirrors the signed-in
//! practitioner's records in memory. Rendering, forms and routing are
//! the embedding application's job; the read-side helpers in
//! [`records`] and [`dashboard`] are pure functions over cache
//! snapshots.

pub mod auth;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod records;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the host application.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
