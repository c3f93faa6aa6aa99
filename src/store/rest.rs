//! PostgREST-flavored HTTP implementation of [`RecordStore`].
//!
//! Row filters travel as `column=eq.value` query parameters, orderings
//! as `order=column.direction`. Inserts ask for the authoritative row
//! back with `Prefer: return=representation`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{RecordStore, StoreError};
use crate::config::StoreConfig;
use crate::models::{
    AppointmentChanges, AppointmentRow, ConsultationRow, NewAppointmentRow, NewConsultationRow,
    NewPatientRow, PatientRow,
};

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct RestStore {
    base_url: String,
    anon_key: String,
    bearer: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl RestStore {
    /// Create a store client authenticated as the given session.
    ///
    /// The access token scopes every request to the signed-in identity;
    /// row-level security on the service side enforces ownership.
    pub fn new(config: &StoreConfig, access_token: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            bearer: access_token.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Store client for a fresh session with the default timeout.
    pub fn for_session(config: &StoreConfig, access_token: &str) -> Self {
        Self::new(config, access_token, DEFAULT_TIMEOUT_SECS)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn map_transport(&self, e: reqwest::Error) -> StoreError {
        if e.is_connect() {
            StoreError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            StoreError::Timeout(self.timeout_secs)
        } else {
            StoreError::Http(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filter_column: &str,
        filter_value: Uuid,
        order: &str,
    ) -> Result<Vec<T>, StoreError> {
        let filter = format!("eq.{filter_value}");
        let response = self
            .client
            .get(self.table_url(table))
            .query(&[
                ("select", "*"),
                (filter_column, filter.as_str()),
                ("order", order),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::ResponseParsing(e.to_string()))
    }

    async fn insert_row<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = Self::check_status(response).await?;
        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StoreError::ResponseParsing(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::EmptyInsertReturn);
        }
        Ok(rows.remove(0))
    }

    async fn update_by_id<B: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        body: &B,
    ) -> Result<(), StoreError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", filter.as_str())])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select_patients(&self, owner: Uuid) -> Result<Vec<PatientRow>, StoreError> {
        self.select_rows("patients", "user_id", owner, "created_at.desc")
            .await
    }

    async fn insert_patient(&self, row: NewPatientRow) -> Result<PatientRow, StoreError> {
        self.insert_row("patients", &row).await
    }

    async fn select_consultations(&self, doctor: Uuid) -> Result<Vec<ConsultationRow>, StoreError> {
        self.select_rows("consultations", "doctor_id", doctor, "created_at.desc")
            .await
    }

    async fn insert_consultation(
        &self,
        row: NewConsultationRow,
    ) -> Result<ConsultationRow, StoreError> {
        self.insert_row("consultations", &row).await
    }

    async fn select_appointments(&self, doctor: Uuid) -> Result<Vec<AppointmentRow>, StoreError> {
        self.select_rows("appointments", "doctor_id", doctor, "date.asc")
            .await
    }

    async fn insert_appointment(
        &self,
        row: NewAppointmentRow,
    ) -> Result<AppointmentRow, StoreError> {
        self.insert_row("appointments", &row).await
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<(), StoreError> {
        self.update_by_id("appointments", id, changes).await
    }
}
