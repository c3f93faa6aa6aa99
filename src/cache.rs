//! Session-scoped record cache.
//!
//! In-memory mirror of the three record collections for the signed-in
//! identity. Loads replace local content wholesale, creates prepend
//! the store's authoritative row, the appointment update merges in
//! place. The presentation layer only reads cloned snapshots and
//! invokes the operations here; it never mutates collection contents.
//!
//! Scope changes bump a monotonic epoch. Store responses commit only
//! if the epoch they were issued under is still current, so a late
//! response can never repopulate a cache that was cleared or re-scoped
//! while the request was in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Appointment, AppointmentChanges, Consultation, Identity, NewAppointment, NewConsultation,
    NewPatient, Patient,
};
use crate::store::{RecordStore, StoreError};

pub struct RecordCache<S> {
    store: S,
    scope: RwLock<Option<Identity>>,
    epoch: AtomicU64,
    state: RwLock<CacheState>,
}

#[derive(Default)]
struct CacheState {
    patients: Vec<Patient>,
    consultations: Vec<Consultation>,
    appointments: Vec<Appointment>,
    loading: bool,
}

/// Errors from cache mutations. Loads never surface errors; a failed
/// load degrades its collection to empty.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("No authenticated identity; sign in before modifying records")]
    NotAuthenticated,

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

impl<S: RecordStore> RecordCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            scope: RwLock::new(None),
            epoch: AtomicU64::new(0),
            state: RwLock::new(CacheState::default()),
        }
    }

    // ── Lock access ─────────────────────────────────────────
    // Every mutation is a single replace-or-merge step performed under
    // the write lock, so even a poisoned lock holds consistent state.

    fn read_state(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_scope(&self) -> RwLockReadGuard<'_, Option<Identity>> {
        self.scope.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_scope(&self) -> RwLockWriteGuard<'_, Option<Identity>> {
        self.scope.write().unwrap_or_else(|e| e.into_inner())
    }

    // ── Scope lifecycle ─────────────────────────────────────

    /// React to an identity transition from the auth layer.
    ///
    /// A present identity becomes the new scope and triggers a full
    /// reload. An absent identity clears all three collections
    /// synchronously; no remote call is made.
    pub async fn set_scope(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => {
                tracing::info!(user = %identity.id, "Record cache scope activated");
                self.epoch.fetch_add(1, Ordering::SeqCst);
                *self.write_scope() = Some(identity);
                self.refresh().await;
            }
            None => {
                tracing::info!("Record cache scope cleared");
                self.clear();
            }
        }
    }

    /// The identity whose records are currently mirrored.
    pub fn current_scope(&self) -> Option<Identity> {
        self.read_scope().clone()
    }

    fn scope_id(&self) -> Option<Uuid> {
        self.read_scope().as_ref().map(|identity| identity.id)
    }

    fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.write_scope() = None;
        let mut state = self.write_state();
        state.patients.clear();
        state.consultations.clear();
        state.appointments.clear();
        state.loading = false;
    }

    // ── Loads ───────────────────────────────────────────────

    /// Reload all three collections for the current scope.
    ///
    /// Idempotent and safe to call on demand. The three loads run
    /// concurrently and settle independently; a failed load degrades
    /// its collection to empty without blocking the others. The
    /// loading flag clears only once all three have settled. Results
    /// are discarded if the scope changed while they were in flight.
    pub async fn refresh(&self) {
        let Some(owner) = self.scope_id() else {
            return;
        };
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.write_state().loading = true;

        let (patients, consultations, appointments) = tokio::join!(
            self.load_patients(owner),
            self.load_consultations(owner),
            self.load_appointments(owner),
        );

        let mut state = self.write_state();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            // Stale responses for a superseded scope.
            return;
        }
        state.patients = patients;
        state.consultations = consultations;
        state.appointments = appointments;
        state.loading = false;
    }

    async fn load_patients(&self, owner: Uuid) -> Vec<Patient> {
        match self.store.select_patients(owner).await {
            Ok(rows) => rows.into_iter().map(Patient::from_row).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load patients");
                Vec::new()
            }
        }
    }

    async fn load_consultations(&self, doctor: Uuid) -> Vec<Consultation> {
        match self.store.select_consultations(doctor).await {
            Ok(rows) => rows.into_iter().map(Consultation::from_row).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load consultations");
                Vec::new()
            }
        }
    }

    async fn load_appointments(&self, doctor: Uuid) -> Vec<Appointment> {
        match self.store.select_appointments(doctor).await {
            Ok(rows) => rows.into_iter().map(Appointment::from_row).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load appointments");
                Vec::new()
            }
        }
    }

    // ── Creates ─────────────────────────────────────────────

    /// Register a new patient under the current scope.
    ///
    /// The store's returned row is authoritative (generated id and
    /// creation timestamp) and is prepended to the local list.
    pub async fn add_patient(&self, draft: NewPatient) -> Result<Patient, CacheError> {
        let owner = self.scope_id().ok_or(CacheError::NotAuthenticated)?;
        let epoch = self.epoch.load(Ordering::SeqCst);
        let row = self.store.insert_patient(draft.into_row(owner)).await?;
        let patient = Patient::from_row(row);

        let mut state = self.write_state();
        if self.epoch.load(Ordering::SeqCst) == epoch {
            state.patients.insert(0, patient.clone());
        }
        Ok(patient)
    }

    /// Record a consultation authored by the acting doctor.
    pub async fn add_consultation(
        &self,
        draft: NewConsultation,
    ) -> Result<Consultation, CacheError> {
        if self.scope_id().is_none() {
            return Err(CacheError::NotAuthenticated);
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let row = self.store.insert_consultation(draft.into_row()).await?;
        let consultation = Consultation::from_row(row);

        let mut state = self.write_state();
        if self.epoch.load(Ordering::SeqCst) == epoch {
            state.consultations.insert(0, consultation.clone());
        }
        Ok(consultation)
    }

    /// Book an appointment authored by the acting doctor.
    ///
    /// Prepended like the other collections even though loads order
    /// appointments by ascending date; the next refresh restores date
    /// order.
    pub async fn add_appointment(&self, draft: NewAppointment) -> Result<Appointment, CacheError> {
        if self.scope_id().is_none() {
            return Err(CacheError::NotAuthenticated);
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let row = self.store.insert_appointment(draft.into_row()).await?;
        let appointment = Appointment::from_row(row);

        let mut state = self.write_state();
        if self.epoch.load(Ordering::SeqCst) == epoch {
            state.appointments.insert(0, appointment.clone());
        }
        Ok(appointment)
    }

    // ── Update ──────────────────────────────────────────────

    /// Update status and/or notes of an appointment.
    ///
    /// The store update runs first; on success the supplied fields are
    /// merged into the matching local record. An id with no local
    /// match is a no-op, not an error: the record may simply not be
    /// loaded yet.
    pub async fn update_appointment(
        &self,
        id: Uuid,
        changes: AppointmentChanges,
    ) -> Result<(), CacheError> {
        self.store.update_appointment(id, &changes).await?;

        let mut state = self.write_state();
        if let Some(appointment) = state.appointments.iter_mut().find(|a| a.id == id) {
            if let Some(status) = changes.status {
                appointment.status = status;
            }
            if let Some(notes) = changes.notes {
                appointment.notes = notes;
            }
        }
        Ok(())
    }

    // ── Snapshots and derived views ─────────────────────────

    /// True while a refresh has loads in flight.
    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.read_state().patients.clone()
    }

    pub fn consultations(&self) -> Vec<Consultation> {
        self.read_state().consultations.clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.read_state().appointments.clone()
    }

    pub fn patient_by_id(&self, id: Uuid) -> Option<Patient> {
        self.read_state()
            .patients
            .iter()
            .find(|patient| patient.id == id)
            .cloned()
    }

    /// Consultations referencing the patient, in collection order.
    pub fn consultations_for_patient(&self, patient_id: Uuid) -> Vec<Consultation> {
        self.read_state()
            .consultations
            .iter()
            .filter(|consultation| consultation.patient_id == patient_id)
            .cloned()
            .collect()
    }

    /// Appointments referencing the patient, in collection order.
    pub fn appointments_for_patient(&self, patient_id: Uuid) -> Vec<Appointment> {
        self.read_state()
            .appointments
            .iter()
            .filter(|appointment| appointment.patient_id == patient_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use super::*;
    use crate::models::{
        AppointmentRow, AppointmentStatus, AppointmentType, ConsultationRow, NewPatientRow,
        PatientRow, UserRole,
    };
    use crate::store::MemoryStore;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            name: "Dr. García".to_string(),
            email: "garcia@clinica.test".to_string(),
            role: UserRole::Doctor,
            specialization: Some("Medicina general".to_string()),
        }
    }

    fn patient_row(owner: Uuid, first_name: &str, day: u32) -> PatientRow {
        PatientRow {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: "Prueba".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: "555-0100".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            address: None,
            blood_type: None,
            allergies: None,
            emergency_contact: None,
            emergency_phone: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
            user_id: owner,
        }
    }

    fn consultation_row(doctor: Uuid, patient: Uuid) -> ConsultationRow {
        ConsultationRow {
            id: Uuid::new_v4(),
            patient_id: patient,
            doctor_id: doctor,
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            symptoms: "Tos".to_string(),
            diagnosis: "Resfriado".to_string(),
            treatment: "Reposo".to_string(),
            prescription: None,
            notes: None,
            follow_up_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        }
    }

    fn appointment_row(doctor: Uuid, patient: Uuid, day: u32) -> AppointmentRow {
        AppointmentRow {
            id: Uuid::new_v4(),
            patient_id: patient,
            doctor_id: doctor,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            appointment_type: AppointmentType::Routine,
            status: AppointmentStatus::Scheduled,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    fn new_patient(first_name: &str) -> NewPatient {
        NewPatient {
            first_name: first_name.to_string(),
            last_name: "Prueba".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: "555-0100".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            ..NewPatient::default()
        }
    }

    fn new_appointment(doctor: Uuid, patient: Uuid, day: u32) -> NewAppointment {
        NewAppointment {
            patient_id: patient,
            doctor_id: doctor,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            appointment_type: AppointmentType::Routine,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn scope_clear_empties_every_collection() {
        let doctor = identity();
        let store = MemoryStore::new();
        store.seed_patients(vec![patient_row(doctor.id, "Ana", 1)]);
        store.seed_consultations(vec![consultation_row(doctor.id, Uuid::new_v4())]);
        store.seed_appointments(vec![appointment_row(doctor.id, Uuid::new_v4(), 1)]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;
        assert_eq!(cache.patients().len(), 1);
        assert_eq!(cache.consultations().len(), 1);
        assert_eq!(cache.appointments().len(), 1);

        cache.set_scope(None).await;
        assert!(cache.patients().is_empty());
        assert!(cache.consultations().is_empty());
        assert!(cache.appointments().is_empty());
        assert!(!cache.is_loading());
        assert!(cache.current_scope().is_none());
    }

    #[tokio::test]
    async fn reload_replaces_rather_than_merges() {
        let doctor = identity();
        let store = MemoryStore::new();
        store.seed_patients(vec![
            patient_row(doctor.id, "Ana", 1),
            patient_row(doctor.id, "Berta", 2),
        ]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor.clone())).await;
        assert_eq!(cache.patients().len(), 2);

        let replacement = patient_row(doctor.id, "Carla", 3);
        let replacement_id = replacement.id;
        cache.store.seed_patients(vec![replacement]);
        cache.refresh().await;

        let patients = cache.patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].id, replacement_id);
    }

    #[tokio::test]
    async fn load_orders_patients_newest_first() {
        let doctor = identity();
        let store = MemoryStore::new();
        store.seed_patients(vec![
            patient_row(doctor.id, "Ana", 1),
            patient_row(doctor.id, "Berta", 20),
            patient_row(doctor.id, "Carla", 10),
        ]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;
        let names: Vec<String> = cache
            .patients()
            .iter()
            .map(|p| p.first_name.clone())
            .collect();
        assert_eq!(names, vec!["Berta", "Carla", "Ana"]);
    }

    #[tokio::test]
    async fn create_prepends_authoritative_row() {
        let doctor = identity();
        let store = MemoryStore::new();
        store.seed_patients(vec![patient_row(doctor.id, "Ana", 1)]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;

        let created = cache.add_patient(new_patient("Berta")).await.unwrap();
        let patients = cache.patients();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id, created.id);
        assert_eq!(patients[0].first_name, "Berta");
        assert_eq!(patients[0].email, "berta@example.com");
    }

    #[tokio::test]
    async fn create_without_scope_fails_and_leaves_state_alone() {
        let cache = RecordCache::new(MemoryStore::new());
        let result = cache.add_patient(new_patient("Ana")).await;
        assert!(matches!(result, Err(CacheError::NotAuthenticated)));
        assert!(cache.patients().is_empty());
    }

    #[tokio::test]
    async fn failed_create_propagates_and_leaves_state_alone() {
        let doctor = identity();
        let cache = RecordCache::new(MemoryStore::new());
        cache.set_scope(Some(doctor.clone())).await;

        cache.store.fail_appointments(true);
        let result = cache
            .add_appointment(new_appointment(doctor.id, Uuid::new_v4(), 1))
            .await;
        assert!(matches!(result, Err(CacheError::Store(_))));
        assert!(cache.appointments().is_empty());
    }

    #[tokio::test]
    async fn update_merges_supplied_fields_in_place() {
        let doctor = identity();
        let patient = Uuid::new_v4();
        let cache = RecordCache::new(MemoryStore::new());
        cache.set_scope(Some(doctor.clone())).await;

        let first = cache
            .add_appointment(new_appointment(doctor.id, patient, 1))
            .await
            .unwrap();
        let second = cache
            .add_appointment(new_appointment(doctor.id, patient, 2))
            .await
            .unwrap();

        cache
            .update_appointment(first.id, AppointmentChanges::status(AppointmentStatus::Completed))
            .await
            .unwrap();

        let appointments = cache.appointments();
        assert_eq!(appointments.len(), 2);
        let updated = appointments.iter().find(|a| a.id == first.id).unwrap();
        assert_eq!(updated.status, AppointmentStatus::Completed);
        assert_eq!(updated.date, first.date);
        assert_eq!(updated.notes, first.notes);
        let untouched = appointments.iter().find(|a| a.id == second.id).unwrap();
        assert_eq!(untouched.status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn update_with_unknown_id_is_a_no_op() {
        let doctor = identity();
        let cache = RecordCache::new(MemoryStore::new());
        cache.set_scope(Some(doctor.clone())).await;
        cache
            .add_appointment(new_appointment(doctor.id, Uuid::new_v4(), 1))
            .await
            .unwrap();

        cache
            .update_appointment(
                Uuid::new_v4(),
                AppointmentChanges::status(AppointmentStatus::Cancelled),
            )
            .await
            .unwrap();
        let appointments = cache.appointments();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn derived_views_filter_without_reordering() {
        let doctor = identity();
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let store = MemoryStore::new();
        store.seed_consultations(vec![
            consultation_row(doctor.id, target),
            consultation_row(doctor.id, other),
            consultation_row(doctor.id, target),
        ]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;

        let all = cache.consultations();
        let for_target = cache.consultations_for_patient(target);
        assert_eq!(for_target.len(), 2);
        let expected: Vec<Uuid> = all
            .iter()
            .filter(|c| c.patient_id == target)
            .map(|c| c.id)
            .collect();
        let actual: Vec<Uuid> = for_target.iter().map(|c| c.id).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn patient_lookup_by_id() {
        let doctor = identity();
        let store = MemoryStore::new();
        let row = patient_row(doctor.id, "Ana", 1);
        let id = row.id;
        store.seed_patients(vec![row]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;
        assert_eq!(cache.patient_by_id(id).unwrap().first_name, "Ana");
        assert!(cache.patient_by_id(Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn one_failed_load_does_not_block_the_others() {
        let doctor = identity();
        let store = MemoryStore::new();
        store.seed_patients(vec![patient_row(doctor.id, "Ana", 1)]);
        store.seed_consultations(vec![consultation_row(doctor.id, Uuid::new_v4())]);
        store.seed_appointments(vec![appointment_row(doctor.id, Uuid::new_v4(), 1)]);
        store.fail_appointments(true);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor)).await;

        assert_eq!(cache.patients().len(), 1);
        assert_eq!(cache.consultations().len(), 1);
        assert!(cache.appointments().is_empty());
        assert!(!cache.is_loading());
    }

    #[tokio::test]
    async fn refresh_without_scope_is_a_no_op() {
        let cache = RecordCache::new(MemoryStore::new());
        cache.refresh().await;
        assert!(!cache.is_loading());
        assert!(cache.patients().is_empty());
    }

    // Store wrapper whose patient operations park until released,
    // to interleave a scope change with an in-flight request.
    struct GatedStore {
        inner: MemoryStore,
        release: tokio::sync::Semaphore,
    }

    impl GatedStore {
        fn new(inner: MemoryStore) -> Self {
            Self {
                inner,
                release: tokio::sync::Semaphore::new(0),
            }
        }

        fn open(&self) {
            self.release.add_permits(1);
        }
    }

    #[async_trait]
    impl RecordStore for GatedStore {
        async fn select_patients(&self, owner: Uuid) -> Result<Vec<PatientRow>, StoreError> {
            let _permit = self.release.acquire().await.unwrap();
            self.inner.select_patients(owner).await
        }

        async fn insert_patient(&self, row: NewPatientRow) -> Result<PatientRow, StoreError> {
            let _permit = self.release.acquire().await.unwrap();
            self.inner.insert_patient(row).await
        }

        async fn select_consultations(
            &self,
            doctor: Uuid,
        ) -> Result<Vec<ConsultationRow>, StoreError> {
            self.inner.select_consultations(doctor).await
        }

        async fn insert_consultation(
            &self,
            row: crate::models::NewConsultationRow,
        ) -> Result<ConsultationRow, StoreError> {
            self.inner.insert_consultation(row).await
        }

        async fn select_appointments(
            &self,
            doctor: Uuid,
        ) -> Result<Vec<AppointmentRow>, StoreError> {
            self.inner.select_appointments(doctor).await
        }

        async fn insert_appointment(
            &self,
            row: crate::models::NewAppointmentRow,
        ) -> Result<AppointmentRow, StoreError> {
            self.inner.insert_appointment(row).await
        }

        async fn update_appointment(
            &self,
            id: Uuid,
            changes: &AppointmentChanges,
        ) -> Result<(), StoreError> {
            self.inner.update_appointment(id, changes).await
        }
    }

    // Activate a scope without triggering the initial refresh, so the
    // test controls exactly which request is in flight.
    fn activate_scope(cache: &RecordCache<GatedStore>, identity: Identity) {
        cache.epoch.fetch_add(1, Ordering::SeqCst);
        *cache.write_scope() = Some(identity);
    }

    #[tokio::test]
    async fn stale_load_response_is_discarded_after_logout() {
        let doctor = identity();
        let inner = MemoryStore::new();
        inner.seed_patients(vec![patient_row(doctor.id, "Ana", 1)]);
        let cache = Arc::new(RecordCache::new(GatedStore::new(inner)));

        activate_scope(&cache, doctor);
        let refreshing = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.refresh().await })
        };
        tokio::task::yield_now().await;
        assert!(cache.is_loading());

        // Logout wins the race; the parked response must not commit.
        cache.set_scope(None).await;
        cache.store.open();
        refreshing.await.unwrap();

        assert!(cache.patients().is_empty());
        assert!(!cache.is_loading());
    }

    #[tokio::test]
    async fn create_landing_after_logout_is_not_prepended() {
        let doctor = identity();
        let cache = Arc::new(RecordCache::new(GatedStore::new(MemoryStore::new())));
        activate_scope(&cache, doctor);

        let creating = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.add_patient(new_patient("Ana")).await })
        };
        tokio::task::yield_now().await;

        cache.set_scope(None).await;
        cache.store.open();
        let created = creating.await.unwrap().unwrap();
        assert_eq!(created.first_name, "Ana");
        assert!(cache.patients().is_empty());
    }

    #[tokio::test]
    async fn scenario_book_then_complete_appointment() {
        let doctor = identity();
        let store = MemoryStore::new();
        let patient = patient_row(doctor.id, "Ana", 1);
        let patient_id = patient.id;
        store.seed_patients(vec![patient]);

        let cache = RecordCache::new(store);
        cache.set_scope(Some(doctor.clone())).await;
        assert_eq!(cache.patients().len(), 1);
        assert!(cache.consultations().is_empty());
        assert!(cache.appointments().is_empty());

        let booked = cache
            .add_appointment(new_appointment(doctor.id, patient_id, 1))
            .await
            .unwrap();
        let appointments = cache.appointments();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, booked.id);
        assert_eq!(appointments[0].status, AppointmentStatus::Scheduled);

        cache
            .update_appointment(booked.id, AppointmentChanges::status(AppointmentStatus::Completed))
            .await
            .unwrap();
        let appointments = cache.appointments();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].status, AppointmentStatus::Completed);
    }
}
