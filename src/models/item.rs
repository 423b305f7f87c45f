use crate::db::DbResult;
use crate::error::AppResult;
use crate::models::location::Location;
use crate::models::types::{ItemId, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, Pagination, PlayerId};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A carryable asset. Its location is polymorphic: inside another item, on a
/// player, or in a room (see [`Location`]).
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    pub location: Location,
    pub created: chrono::DateTime<chrono::Utc>,
    pub updated: chrono::DateTime<chrono::Utc>,
}

impl Item {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        let location = Location::decode(
            row.try_get("location_item_id")?,
            row.try_get("location_player_id")?,
            row.try_get("location_room_id")?,
        )?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            owner_id: row.try_get("owner_id")?,
            location,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
        })
    }
}

/// Mutable item fields, used for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    pub location: Location,
}

impl ItemRequest {
    pub fn validate(&self) -> AppResult<()> {
        crate::models::validate_text("name", &self.name, MAX_NAME_LEN)?;
        crate::models::validate_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemFilter {
    pub owner_id: Option<PlayerId>,
    pub location: Option<Location>,
    pub pagination: Pagination,
}
