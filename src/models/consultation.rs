use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::none_if_empty;

/// A recorded consultation. Created once, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: String,
    pub follow_up_date: Option<NaiveDate>,
}

impl Consultation {
    pub fn from_row(row: ConsultationRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.date,
            symptoms: row.symptoms,
            diagnosis: row.diagnosis,
            treatment: row.treatment,
            prescription: row.prescription.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
            follow_up_date: row.follow_up_date,
        }
    }
}

/// Wire row of the `consultations` collection. `created_at` exists for
/// server-side recency ordering only and is not mirrored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for the `consultations` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewConsultationRow {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
}

/// Caller-facing draft for recording a consultation.
#[derive(Debug, Clone)]
pub struct NewConsultation {
    pub patient_id: Uuid,
    /// The acting doctor; must belong to the current scope.
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub notes: String,
    pub follow_up_date: Option<NaiveDate>,
}

impl NewConsultation {
    pub fn into_row(self) -> NewConsultationRow {
        NewConsultationRow {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            date: self.date,
            symptoms: self.symptoms,
            diagnosis: self.diagnosis,
            treatment: self.treatment,
            prescription: none_if_empty(self.prescription),
            notes: none_if_empty(self.notes),
            follow_up_date: self.follow_up_date,
        }
    }
}
