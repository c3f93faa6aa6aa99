use chrono::NaiveDate;

use super::appointment::Appointment;
use super::enums::AppointmentStatus;

/// Presentation-level appointment filter. `None` fields match
/// everything; the default filter passes every appointment.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let status_match = self
            .status
            .map_or(true, |status| appointment.status == status);
        let date_match = self.date.map_or(true, |date| appointment.date == date);
        status_match && date_match
    }
}
