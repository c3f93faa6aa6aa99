use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::none_if_empty;

/// A registered patient, as mirrored by the record cache.
///
/// Optional clinical metadata is defaulted to empty text on load so the
/// presentation layer never branches on absence. `created_at` carries
/// date-only precision; the server timestamp is truncated on mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub blood_type: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub created_at: NaiveDate,
    /// Identity that registered the patient.
    pub user_id: Uuid,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years of age on the given day.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth).unwrap_or(0)
    }

    /// Map the authoritative wire row into the cached shape.
    pub fn from_row(row: PatientRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            address: row.address.unwrap_or_default(),
            blood_type: row.blood_type.unwrap_or_default(),
            allergies: row.allergies.unwrap_or_default(),
            emergency_contact: row.emergency_contact.unwrap_or_default(),
            emergency_phone: row.emergency_phone.unwrap_or_default(),
            created_at: row.created_at.date_naive(),
            user_id: row.user_id,
        }
    }
}

/// Wire row of the `patients` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Insert shape for the `patients` collection. Id and creation
/// timestamp are assigned server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatientRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub user_id: Uuid,
}

/// Caller-facing draft for registering a patient. Empty optional text
/// is stored as absent.
#[derive(Debug, Clone, Default)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub blood_type: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

impl NewPatient {
    pub fn into_row(self, user_id: Uuid) -> NewPatientRow {
        NewPatientRow {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: none_if_empty(self.address),
            blood_type: none_if_empty(self.blood_type),
            allergies: none_if_empty(self.allergies),
            emergency_contact: none_if_empty(self.emergency_contact),
            emergency_phone: none_if_empty(self.emergency_phone),
            user_id,
        }
    }
}
