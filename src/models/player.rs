use crate::db::DbResult;
use crate::error::AppResult;
use crate::models::types::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, Pagination, PlayerId, RoomId};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    pub home_id: RoomId,
    pub location_id: RoomId,
    pub created: chrono::DateTime<chrono::Utc>,
    pub updated: chrono::DateTime<chrono::Utc>,
}

impl Player {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            owner_id: row.try_get("owner_id")?,
            home_id: row.try_get("home_id")?,
            location_id: row.try_get("location_id")?,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRequest {
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    pub home_id: RoomId,
    pub location_id: RoomId,
}

impl PlayerRequest {
    pub fn validate(&self) -> AppResult<()> {
        crate::models::validate_text("name", &self.name, MAX_NAME_LEN)?;
        crate::models::validate_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerFilter {
    pub owner_id: Option<PlayerId>,
    pub home_id: Option<RoomId>,
    pub location_id: Option<RoomId>,
    pub pagination: Pagination,
}
