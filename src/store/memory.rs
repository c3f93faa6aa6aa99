//! In-memory implementation of [`RecordStore`].
//!
//! Backs the cache tests and local development without a hosted
//! service. Behaves like the real store: selects filter by owner and
//! return pre-ordered rows, inserts assign the id and creation
//! timestamp, updates with no matching row succeed as empty updates.
//! Per-collection failure injection mimics store-side rejections.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{RecordStore, StoreError};
use crate::models::{
    AppointmentChanges, AppointmentRow, ConsultationRow, NewAppointmentRow, NewConsultationRow,
    NewPatientRow, PatientRow,
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    patients: Vec<PatientRow>,
    consultations: Vec<ConsultationRow>,
    appointments: Vec<AppointmentRow>,
    fail_patients: bool,
    fail_consultations: bool,
    fail_appointments: bool,
    appointment_updates: Vec<(Uuid, AppointmentChanges)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // Every mutation completes under the lock, so a poisoned lock
        // still holds consistent rows.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the stored patient rows.
    pub fn seed_patients(&self, rows: Vec<PatientRow>) {
        self.inner().patients = rows;
    }

    /// Replace the stored consultation rows.
    pub fn seed_consultations(&self, rows: Vec<ConsultationRow>) {
        self.inner().consultations = rows;
    }

    /// Replace the stored appointment rows.
    pub fn seed_appointments(&self, rows: Vec<AppointmentRow>) {
        self.inner().appointments = rows;
    }

    /// Make patient operations fail with a store-side rejection.
    pub fn fail_patients(&self, fail: bool) {
        self.inner().fail_patients = fail;
    }

    /// Make consultation operations fail with a store-side rejection.
    pub fn fail_consultations(&self, fail: bool) {
        self.inner().fail_consultations = fail;
    }

    /// Make appointment operations fail with a store-side rejection.
    pub fn fail_appointments(&self, fail: bool) {
        self.inner().fail_appointments = fail;
    }

    /// Update calls received so far, in order.
    pub fn appointment_updates(&self) -> Vec<(Uuid, AppointmentChanges)> {
        self.inner().appointment_updates.clone()
    }

    fn injected_failure() -> StoreError {
        StoreError::Api {
            status: 500,
            body: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select_patients(&self, owner: Uuid) -> Result<Vec<PatientRow>, StoreError> {
        let inner = self.inner();
        if inner.fail_patients {
            return Err(Self::injected_failure());
        }
        let mut rows: Vec<PatientRow> = inner
            .patients
            .iter()
            .filter(|row| row.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_patient(&self, row: NewPatientRow) -> Result<PatientRow, StoreError> {
        let mut inner = self.inner();
        if inner.fail_patients {
            return Err(Self::injected_failure());
        }
        let stored = PatientRow {
            id: Uuid::new_v4(),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            address: row.address,
            blood_type: row.blood_type,
            allergies: row.allergies,
            emergency_contact: row.emergency_contact,
            emergency_phone: row.emergency_phone,
            created_at: Utc::now(),
            user_id: row.user_id,
        };
        inner.patients.push(stored.clone());
        Ok(stored)
    }

    async fn select_consultations(&self, doctor: Uuid) -> Result<Vec<ConsultationRow>, StoreError> {
        let inner = self.inner();
        if inner.fail_consultations {
            return Err(Self::injected_failure());
        }
        let mut rows: Vec<ConsultationRow> = inner
            .consultations
            .iter()
            .filter(|row| row.doctor_id == doctor)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_consultation(
        &self,
        row: NewConsultationRow,
    ) -> Result<ConsultationRow, StoreError> {
        let mut inner = self.inner();
        if inner.fail_consultations {
            return Err(Self::injected_failure());
        }
        let stored = ConsultationRow {
            id: Uuid::new_v4(),
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.date,
            symptoms: row.symptoms,
            diagnosis: row.diagnosis,
            treatment: row.treatment,
            prescription: row.prescription,
            notes: row.notes,
            follow_up_date: row.follow_up_date,
            created_at: Utc::now(),
        };
        inner.consultations.push(stored.clone());
        Ok(stored)
    }

    async fn select_appointments(&self, doctor: Uuid) -> Result<Vec<AppointmentRow>, StoreError> {
        let inner = self.inner();
        if inner.fail_appointments {
            return Err(Self::injected_failure());
        }
        let mut rows: Vec<AppointmentRow> = inner
            .appointments
            .iter()
            .filter(|row| row.doctor_id == doctor)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }

    async fn insert_appointment(
        &self,
        row: NewAppointmentRow,
    ) -> Result<AppointmentRow, StoreError> {
        let mut inner = self.inner();
        if inner.fail_appointments {
            return Err(Self::injected_failure());
        }
        let stored = AppointmentRow {
            id: Uuid::new_v4(),
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.date,
            time: row.time,
            appointment_type: row.appointment_type,
            status: row.status,
            notes: row.notes,
            created_at: Utc::now(),
        };
        inner.appointments.push(stored.clone());
        Ok(stored)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner();
        if inner.fail_appointments {
            return Err(Self::injected_failure());
        }
        if let Some(row) = inner.appointments.iter_mut().find(|row| row.id == id) {
            if let Some(status) = changes.status {
                row.status = status;
            }
            if let Some(notes) = &changes.notes {
                row.notes = Some(notes.clone());
            }
        }
        inner.appointment_updates.push((id, changes.clone()));
        Ok(())
    }
}
