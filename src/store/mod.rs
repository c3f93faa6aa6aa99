//! Remote record store seam.
//!
//! The hosted data service is an opaque CRUD+query capability; the
//! cache talks to it only through [`RecordStore`]. Selects are scoped
//! by the owning identity and return rows pre-ordered the way the
//! cache expects: patients and consultations newest first,
//! appointments by ascending date.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AppointmentChanges, AppointmentRow, ConsultationRow, NewAppointmentRow, NewConsultationRow,
    NewPatientRow, PatientRow,
};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Patients registered by the given identity, newest first.
    async fn select_patients(&self, owner: Uuid) -> Result<Vec<PatientRow>, StoreError>;

    /// Insert a patient; returns the authoritative row with the
    /// generated id and creation timestamp.
    async fn insert_patient(&self, row: NewPatientRow) -> Result<PatientRow, StoreError>;

    /// Consultations authored by the given doctor, newest first.
    async fn select_consultations(&self, doctor: Uuid) -> Result<Vec<ConsultationRow>, StoreError>;

    /// Insert a consultation; returns the authoritative row.
    async fn insert_consultation(
        &self,
        row: NewConsultationRow,
    ) -> Result<ConsultationRow, StoreError>;

    /// Appointments authored by the given doctor, by ascending date.
    async fn select_appointments(&self, doctor: Uuid) -> Result<Vec<AppointmentRow>, StoreError>;

    /// Insert an appointment; returns the authoritative row.
    async fn insert_appointment(&self, row: NewAppointmentRow)
        -> Result<AppointmentRow, StoreError>;

    /// Partial update of one appointment, filtered by id. A filter
    /// matching no rows is a successful empty update.
    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<(), StoreError>;
}

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot reach the record store at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Store rejected the request with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse store response: {0}")]
    ResponseParsing(String),

    #[error("Store returned no row for a successful insert")]
    EmptyInsertReturn,
}
