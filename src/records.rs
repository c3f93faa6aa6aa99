//! Read-side helpers over cache snapshots.
//!
//! Pure functions the presentation layer composes with the cache's
//! derived views: per-patient medical-record assembly, free-text
//! search, appointment filtering. No remote calls, no cache mutation.

use crate::models::{
    Appointment, AppointmentFilter, Consultation, MedicalRecord, Patient,
};

/// Assemble a patient's full history from the cache's per-patient
/// views, both lists sorted newest first.
pub fn medical_record(
    patient: Patient,
    mut consultations: Vec<Consultation>,
    mut appointments: Vec<Appointment>,
) -> MedicalRecord {
    consultations.sort_by(|a, b| b.date.cmp(&a.date));
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    MedicalRecord {
        patient,
        consultations,
        appointments,
    }
}

/// Patients whose full name or email contains the term,
/// case-insensitive. An empty term matches everyone.
pub fn search_patients<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    let term = term.to_lowercase();
    patients
        .iter()
        .filter(|patient| {
            patient.full_name().to_lowercase().contains(&term)
                || patient.email.to_lowercase().contains(&term)
        })
        .collect()
}

/// Consultations whose patient name, diagnosis or symptoms contain the
/// term, case-insensitive. The patient name comes from the patient
/// snapshot; a consultation whose patient is not loaded matches on
/// diagnosis and symptoms only.
pub fn search_consultations<'a>(
    consultations: &'a [Consultation],
    patients: &[Patient],
    term: &str,
) -> Vec<&'a Consultation> {
    let term = term.to_lowercase();
    consultations
        .iter()
        .filter(|consultation| {
            let patient_name = patients
                .iter()
                .find(|patient| patient.id == consultation.patient_id)
                .map(|patient| patient.full_name().to_lowercase())
                .unwrap_or_default();
            patient_name.contains(&term)
                || consultation.diagnosis.to_lowercase().contains(&term)
                || consultation.symptoms.to_lowercase().contains(&term)
        })
        .collect()
}

/// Appointments passing the status/date filter, in snapshot order.
pub fn filter_appointments<'a>(
    appointments: &'a [Appointment],
    filter: &AppointmentFilter,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appointment| filter.matches(appointment))
        .collect()
}
