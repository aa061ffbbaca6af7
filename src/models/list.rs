use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::CardDetails;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: Uuid,
    pub sprint_id: Uuid,
    pub name: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateList {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateList {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListDetails {
    #[serde(flatten)]
    pub list: List,
    pub cards: Vec<CardDetails>,
}
