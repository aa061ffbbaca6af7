use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    ScrumMaster,
    ProjectOwner,
    TeamMember,
}

impl RoleName {
    /// Every board is created with exactly these roles, in this order.
    pub const ALL: [RoleName; 3] = [
        RoleName::ScrumMaster,
        RoleName::ProjectOwner,
        RoleName::TeamMember,
    ];
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleName::ScrumMaster => write!(f, "scrum_master"),
            RoleName::ProjectOwner => write!(f, "project_owner"),
            RoleName::TeamMember => write!(f, "team_member"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: RoleName,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RoleDetails {
    #[serde(flatten)]
    pub role: Role,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRole {
    pub role: RoleName,
    pub email: String,
}

/// A role held by some user, used to attach roles to board members.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleLink {
    pub owner_id: Uuid,
    #[sqlx(flatten)]
    pub role: Role,
}
