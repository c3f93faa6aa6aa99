//! Dashboard statistics derived from cache snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus, Consultation, Patient};

/// Headline counters for the practice overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    /// Appointments scheduled for the given day.
    pub today_appointments: usize,
    pub total_consultations: usize,
    /// Appointments still in the scheduled state, any date.
    pub pending_appointments: usize,
}

impl DashboardStats {
    pub fn compute(
        patients: &[Patient],
        consultations: &[Consultation],
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> Self {
        let today_appointments = appointments
            .iter()
            .filter(|a| a.date == today && a.status == AppointmentStatus::Scheduled)
            .count();
        let pending_appointments = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .count();
        Self {
            total_patients: patients.len(),
            today_appointments,
            total_consultations: consultations.len(),
            pending_appointments,
        }
    }
}

/// The first `limit` scheduled appointments in snapshot order, paired
/// with the referenced patient when loaded. A missing patient yields
/// `None` rather than dropping the appointment.
pub fn upcoming_appointments<'a>(
    appointments: &'a [Appointment],
    patients: &'a [Patient],
    limit: usize,
) -> Vec<(&'a Appointment, Option<&'a Patient>)> {
    appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled)
        .take(limit)
        .map(|appointment| {
            let patient = patients.iter().find(|p| p.id == appointment.patient_id);
            (appointment, patient)
        })
        .collect()
}
