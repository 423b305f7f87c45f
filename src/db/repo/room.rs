use crate::db::DbResult;
use crate::db::driver::ListQuery;
use crate::db::repo::storage::{ResourceDef, Storage};
use crate::error::AppResult;
use crate::models::room::{Room, RoomFilter, RoomRequest};
use crate::models::types::RoomId;
use postgres_types::ToSql;
use tokio_postgres::Row;

pub struct RoomDef;

pub type RoomStorage = Storage<RoomDef>;

impl ResourceDef for RoomDef {
    const KIND: &'static str = "room";

    type Id = RoomId;
    type Record = Room;
    type Request = RoomRequest;
    type Filter = RoomFilter;

    const GET_QUERY: &'static str = "SELECT id, name, description, owner_id, \
        parent_id, created, updated \
        FROM rooms WHERE id = $1";

    const CREATE_QUERY: &'static str = "INSERT INTO rooms \
        (name, description, owner_id, parent_id) \
        VALUES ($1, $2, $3, $4) \
        RETURNING id, name, description, owner_id, parent_id, created, updated";

    const UPDATE_QUERY: &'static str = "UPDATE rooms SET \
        name = $1, description = $2, owner_id = $3, parent_id = $4, \
        updated = now() WHERE id = $5 \
        RETURNING id, name, description, owner_id, parent_id, created, updated";

    const REMOVE_QUERY: &'static str = "DELETE FROM rooms WHERE id = $1";

    fn list_query(filter: &RoomFilter) -> String {
        ListQuery::new(
            "SELECT id, name, description, owner_id, parent_id, created, updated FROM rooms",
        )
        .filter("owner_id", filter.owner_id)
        .filter("parent_id", filter.parent_id)
        .paginate(filter.pagination)
        .build()
    }

    fn from_row(row: &Row) -> DbResult<Room> {
        Room::try_from_row(row)
    }

    fn params(req: &RoomRequest) -> Vec<Box<dyn ToSql + Sync + Send>> {
        vec![
            Box::new(req.name.clone()),
            Box::new(req.description.clone()),
            Box::new(req.owner_id),
            Box::new(req.parent_id),
        ]
    }

    fn validate(req: &RoomRequest) -> AppResult<()> {
        req.validate()
    }

    fn reference_detail(req: &RoomRequest) -> String {
        format!(
            "ownerID '{}' or parentID '{}' does not exist",
            req.owner_id, req.parent_id
        )
    }

    fn request_name(req: &RoomRequest) -> &str {
        &req.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{Pagination, PlayerId};

    const BARE: &str =
        "SELECT id, name, description, owner_id, parent_id, created, updated FROM rooms";

    #[test]
    fn t_empty_filter_yields_bare_query() {
        assert_eq!(RoomDef::list_query(&RoomFilter::default()), BARE);
    }

    #[test]
    fn t_owner_only() {
        let owner = PlayerId::new();
        let filter = RoomFilter {
            owner_id: Some(owner),
            ..Default::default()
        };
        assert_eq!(
            RoomDef::list_query(&filter),
            format!("{BARE} WHERE owner_id = '{owner}'")
        );
    }

    #[test]
    fn t_owner_and_parent() {
        let owner = PlayerId::new();
        let parent = RoomId::new();
        let filter = RoomFilter {
            owner_id: Some(owner),
            parent_id: Some(parent),
            ..Default::default()
        };
        assert_eq!(
            RoomDef::list_query(&filter),
            format!("{BARE} WHERE owner_id = '{owner}' AND parent_id = '{parent}'")
        );
    }

    #[test]
    fn t_pagination_appended_last() {
        let owner = PlayerId::new();
        let parent = RoomId::new();
        let filter = RoomFilter {
            owner_id: Some(owner),
            parent_id: Some(parent),
            pagination: Pagination::new(10, 5),
        };
        assert_eq!(
            RoomDef::list_query(&filter),
            format!("{BARE} WHERE owner_id = '{owner}' AND parent_id = '{parent}' LIMIT 10 OFFSET 5")
        );
    }
}
