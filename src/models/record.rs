use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::consultation::Consultation;
use super::patient::Patient;

/// A patient's full history: the patient plus every consultation and
/// appointment referencing them, each sorted newest first. Assembled
/// by [`crate::records::medical_record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub patient: Patient,
    pub consultations: Vec<Consultation>,
    pub appointments: Vec<Appointment>,
}
