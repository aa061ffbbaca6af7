use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list::ListDetails;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sprint {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSprint {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSprint {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SprintDetails {
    #[serde(flatten)]
    pub sprint: Sprint,
    pub lists: Vec<ListDetails>,
}
