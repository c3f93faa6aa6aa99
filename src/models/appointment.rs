use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, AppointmentType};
use super::none_if_empty;

/// A scheduled appointment. Status and notes may change after
/// creation; everything else is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl Appointment {
    pub fn from_row(row: AppointmentRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.date,
            time: row.time,
            appointment_type: row.appointment_type,
            status: row.status,
            notes: row.notes.unwrap_or_default(),
        }
    }
}

/// Wire row of the `appointments` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for the `appointments` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointmentRow {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Caller-facing draft for booking an appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    /// The acting doctor; must belong to the current scope.
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: AppointmentType,
    pub notes: String,
}

impl NewAppointment {
    /// New appointments always start out scheduled.
    pub fn into_row(self) -> NewAppointmentRow {
        NewAppointmentRow {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            date: self.date,
            time: self.time,
            appointment_type: self.appointment_type,
            status: AppointmentStatus::Scheduled,
            notes: none_if_empty(self.notes),
        }
    }
}

/// Partial update for an appointment. Only status and notes are
/// updatable through this path; absent fields do not travel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentChanges {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn notes(notes: &str) -> Self {
        Self {
            notes: Some(notes.to_string()),
            ..Self::default()
        }
    }
}
