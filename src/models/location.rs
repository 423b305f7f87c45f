//! The polymorphic item location and its persisted three-column form.
//!
//! An item lives in exactly one of: another item (a container), a player's
//! inventory, or a room. In the database this is three nullable foreign-key
//! columns (`location_item_id`, `location_player_id`, `location_room_id`),
//! mutually exclusive by invariant. In memory it is a plain tagged union;
//! the column form never leaks past this module.

use crate::db::DbResult;
use crate::db::error::DbError;
use crate::models::types::{ItemId, PlayerId, RoomId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Location {
    Item(ItemId),
    Player(PlayerId),
    Room(RoomId),
}

impl Location {
    /// Splits into the three nullable columns; exactly one slot is populated.
    pub fn encode(self) -> (Option<ItemId>, Option<PlayerId>, Option<RoomId>) {
        match self {
            Location::Item(id) => (Some(id), None, None),
            Location::Player(id) => (None, Some(id), None),
            Location::Room(id) => (None, None, Some(id)),
        }
    }

    /// Rebuilds the union from the three nullable columns.
    ///
    /// If more than one column is set the row violates the exclusivity
    /// invariant; we log the anomaly and continue with the precedence winner
    /// (player, then room, then item) rather than failing the read. An item
    /// row with no location at all is unrecoverable.
    pub fn decode(
        item: Option<ItemId>,
        player: Option<PlayerId>,
        room: Option<RoomId>,
    ) -> DbResult<Self> {
        let populated =
            item.is_some() as u8 + player.is_some() as u8 + room.is_some() as u8;
        if populated > 1 {
            tracing::warn!(
                location_item_id = ?item,
                location_player_id = ?player,
                location_room_id = ?room,
                "item row has multiple location columns set; using precedence player > room > item"
            );
        }

        if let Some(id) = player {
            Ok(Location::Player(id))
        } else if let Some(id) = room {
            Ok(Location::Room(id))
        } else if let Some(id) = item {
            Ok(Location::Item(id))
        } else {
            Err(DbError::Decode("item row has no location".into()))
        }
    }

    /// The backing column this location predicates on, with its value.
    /// Used by the item list-query builder.
    pub fn column(&self) -> (&'static str, Uuid) {
        match self {
            Location::Item(id) => ("location_item_id", id.0),
            Location::Player(id) => ("location_player_id", id.0),
            Location::Room(id) => ("location_room_id", id.0),
        }
    }

    pub fn as_uuid(&self) -> Uuid {
        match self {
            Location::Item(id) => id.0,
            Location::Player(id) => id.0,
            Location::Room(id) => id.0,
        }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Location::Item(id) => write!(f, "item {id}"),
            Location::Player(id) => write!(f, "player {id}"),
            Location::Room(id) => write!(f, "room {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_roundtrip_all_tags() {
        for loc in [
            Location::Item(ItemId::new()),
            Location::Player(PlayerId::new()),
            Location::Room(RoomId::new()),
        ] {
            let (i, p, r) = loc.encode();
            assert_eq!(Location::decode(i, p, r).unwrap(), loc);
        }
    }

    #[test]
    fn t_encode_exactly_one_slot() {
        for loc in [
            Location::Item(ItemId::new()),
            Location::Player(PlayerId::new()),
            Location::Room(RoomId::new()),
        ] {
            let (i, p, r) = loc.encode();
            let populated = i.is_some() as u8 + p.is_some() as u8 + r.is_some() as u8;
            assert_eq!(populated, 1);
        }
    }

    #[test]
    fn t_decode_precedence_player_wins() {
        let item = ItemId::new();
        let player = PlayerId::new();
        let room = RoomId::new();

        let got = Location::decode(Some(item), Some(player), Some(room)).unwrap();
        assert_eq!(got, Location::Player(player));

        let got = Location::decode(Some(item), None, Some(room)).unwrap();
        assert_eq!(got, Location::Room(room));
    }

    #[test]
    fn t_decode_all_null_is_error() {
        assert!(Location::decode(None, None, None).is_err());
    }
}
