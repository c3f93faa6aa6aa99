use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserRole;

/// The authenticated actor whose records the cache mirrors.
///
/// Supplied by the auth client on login; the cache never creates or
/// mutates identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub specialization: Option<String>,
}

impl Identity {
    pub fn from_row(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            specialization: row.specialization,
        }
    }
}

/// Wire row of the `user_profiles` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub specialization: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for the `user_profiles` collection. The id comes from
/// the auth service, not the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub specialization: Option<String>,
}
