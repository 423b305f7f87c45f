use crate::db::DbResult;
use crate::db::driver::ListQuery;
use crate::db::repo::storage::{ResourceDef, Storage};
use crate::error::AppResult;
use crate::models::link::{Link, LinkFilter, LinkRequest};
use crate::models::types::LinkId;
use postgres_types::ToSql;
use tokio_postgres::Row;

pub struct LinkDef;

pub type LinkStorage = Storage<LinkDef>;

impl ResourceDef for LinkDef {
    const KIND: &'static str = "link";

    type Id = LinkId;
    type Record = Link;
    type Request = LinkRequest;
    type Filter = LinkFilter;

    const GET_QUERY: &'static str = "SELECT id, name, description, owner_id, \
        location_id, destination_id, created, updated \
        FROM links WHERE id = $1";

    const CREATE_QUERY: &'static str = "INSERT INTO links \
        (name, description, owner_id, location_id, destination_id) \
        VALUES ($1, $2, $3, $4, $5) \
        RETURNING id, name, description, owner_id, location_id, destination_id, created, updated";

    const UPDATE_QUERY: &'static str = "UPDATE links SET \
        name = $1, description = $2, owner_id = $3, location_id = $4, destination_id = $5, \
        updated = now() WHERE id = $6 \
        RETURNING id, name, description, owner_id, location_id, destination_id, created, updated";

    const REMOVE_QUERY: &'static str = "DELETE FROM links WHERE id = $1";

    fn list_query(filter: &LinkFilter) -> String {
        ListQuery::new(
            "SELECT id, name, description, owner_id, location_id, destination_id, created, updated \
             FROM links",
        )
        .filter("owner_id", filter.owner_id)
        .filter("location_id", filter.location_id)
        .filter("destination_id", filter.destination_id)
        .paginate(filter.pagination)
        .build()
    }

    fn from_row(row: &Row) -> DbResult<Link> {
        Link::try_from_row(row)
    }

    fn params(req: &LinkRequest) -> Vec<Box<dyn ToSql + Sync + Send>> {
        vec![
            Box::new(req.name.clone()),
            Box::new(req.description.clone()),
            Box::new(req.owner_id),
            Box::new(req.location_id),
            Box::new(req.destination_id),
        ]
    }

    fn validate(req: &LinkRequest) -> AppResult<()> {
        req.validate()
    }

    // Names all three references even though any subset could be the one that
    // failed; Postgres does not tell us which without parsing constraint
    // names.
    fn reference_detail(req: &LinkRequest) -> String {
        format!(
            "ownerID '{}', locationID '{}', or destinationID '{}' does not exist",
            req.owner_id, req.location_id, req.destination_id
        )
    }

    fn request_name(req: &LinkRequest) -> &str {
        &req.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{PlayerId, RoomId};

    #[test]
    fn t_reference_detail_names_all_three_ids() {
        let req = LinkRequest {
            name: "north".into(),
            description: "a door to the north".into(),
            owner_id: PlayerId::new(),
            location_id: RoomId::new(),
            destination_id: RoomId::new(),
        };

        let detail = LinkDef::reference_detail(&req);
        assert!(detail.contains(&req.owner_id.to_string()));
        assert!(detail.contains(&req.location_id.to_string()));
        assert!(detail.contains(&req.destination_id.to_string()));
    }

    #[test]
    fn t_list_query_predicate_order() {
        let owner = PlayerId::new();
        let dest = RoomId::new();
        let filter = LinkFilter {
            owner_id: Some(owner),
            destination_id: Some(dest),
            ..Default::default()
        };

        let q = LinkDef::list_query(&filter);
        assert!(
            q.ends_with(&format!("WHERE owner_id = '{owner}' AND destination_id = '{dest}'")),
            "{q}"
        );
    }
}
