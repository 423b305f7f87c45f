use crate::db::DbResult;
use crate::db::driver::ListQuery;
use crate::db::repo::storage::{ResourceDef, Storage};
use crate::error::AppResult;
use crate::models::item::{Item, ItemFilter, ItemRequest};
use crate::models::types::ItemId;
use postgres_types::ToSql;
use tokio_postgres::Row;

pub struct ItemDef;

pub type ItemStorage = Storage<ItemDef>;

impl ResourceDef for ItemDef {
    const KIND: &'static str = "item";

    type Id = ItemId;
    type Record = Item;
    type Request = ItemRequest;
    type Filter = ItemFilter;

    const GET_QUERY: &'static str = "SELECT id, name, description, owner_id, \
        location_item_id, location_player_id, location_room_id, created, updated \
        FROM items WHERE id = $1";

    const CREATE_QUERY: &'static str = "INSERT INTO items \
        (name, description, owner_id, location_item_id, location_player_id, location_room_id) \
        VALUES ($1, $2, $3, $4, $5, $6) \
        RETURNING id, name, description, owner_id, \
        location_item_id, location_player_id, location_room_id, created, updated";

    const UPDATE_QUERY: &'static str = "UPDATE items SET \
        name = $1, description = $2, owner_id = $3, \
        location_item_id = $4, location_player_id = $5, location_room_id = $6, \
        updated = now() WHERE id = $7 \
        RETURNING id, name, description, owner_id, \
        location_item_id, location_player_id, location_room_id, created, updated";

    const REMOVE_QUERY: &'static str = "DELETE FROM items WHERE id = $1";

    fn list_query(filter: &ItemFilter) -> String {
        let mut q = ListQuery::new(
            "SELECT id, name, description, owner_id, \
             location_item_id, location_player_id, location_room_id, created, updated \
             FROM items",
        )
        .filter("owner_id", filter.owner_id);

        // The location predicate targets whichever union column matches the
        // filter's tag.
        if let Some(location) = filter.location {
            let (column, id) = location.column();
            q = q.filter(column, Some(id));
        }

        q.paginate(filter.pagination).build()
    }

    fn from_row(row: &Row) -> DbResult<Item> {
        Item::try_from_row(row)
    }

    fn params(req: &ItemRequest) -> Vec<Box<dyn ToSql + Sync + Send>> {
        let (item, player, room) = req.location.encode();
        vec![
            Box::new(req.name.clone()),
            Box::new(req.description.clone()),
            Box::new(req.owner_id),
            Box::new(item),
            Box::new(player),
            Box::new(room),
        ]
    }

    fn validate(req: &ItemRequest) -> AppResult<()> {
        req.validate()
    }

    fn reference_detail(req: &ItemRequest) -> String {
        format!(
            "ownerID '{}' or locationID '{}' does not exist",
            req.owner_id,
            req.location.as_uuid()
        )
    }

    fn request_name(req: &ItemRequest) -> &str {
        &req.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::Location;
    use crate::models::types::{Pagination, PlayerId, RoomId};

    #[test]
    fn t_list_query_location_predicate_targets_union_column() {
        let room = RoomId::new();
        let filter = ItemFilter {
            location: Some(Location::Room(room)),
            ..Default::default()
        };

        let q = ItemDef::list_query(&filter);
        assert!(q.ends_with(&format!("WHERE location_room_id = '{room}'")), "{q}");

        let player = PlayerId::new();
        let filter = ItemFilter {
            location: Some(Location::Player(player)),
            ..Default::default()
        };
        assert!(
            ItemDef::list_query(&filter).ends_with(&format!("WHERE location_player_id = '{player}'"))
        );
    }

    #[test]
    fn t_list_query_owner_precedes_location() {
        let owner = PlayerId::new();
        let item = ItemId::new();
        let filter = ItemFilter {
            owner_id: Some(owner),
            location: Some(Location::Item(item)),
            pagination: Pagination::new(10, 5),
        };

        let q = ItemDef::list_query(&filter);
        assert!(
            q.ends_with(&format!(
                "WHERE owner_id = '{owner}' AND location_item_id = '{item}' LIMIT 10 OFFSET 5"
            )),
            "{q}"
        );
    }

    #[test]
    fn t_create_params_encode_location() {
        let req = ItemRequest {
            name: "spanner".into(),
            description: "a multi spanner".into(),
            owner_id: PlayerId::new(),
            location: Location::Room(RoomId::new()),
        };

        // name, description, owner + the three union columns
        assert_eq!(ItemDef::params(&req).len(), 6);
    }
}
