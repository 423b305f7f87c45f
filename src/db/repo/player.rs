use crate::db::DbResult;
use crate::db::driver::ListQuery;
use crate::db::repo::storage::{ResourceDef, Storage};
use crate::error::AppResult;
use crate::models::player::{Player, PlayerFilter, PlayerRequest};
use crate::models::types::PlayerId;
use postgres_types::ToSql;
use tokio_postgres::Row;

pub struct PlayerDef;

pub type PlayerStorage = Storage<PlayerDef>;

impl ResourceDef for PlayerDef {
    const KIND: &'static str = "player";

    type Id = PlayerId;
    type Record = Player;
    type Request = PlayerRequest;
    type Filter = PlayerFilter;

    const GET_QUERY: &'static str = "SELECT id, name, description, owner_id, \
        home_id, location_id, created, updated \
        FROM players WHERE id = $1";

    const CREATE_QUERY: &'static str = "INSERT INTO players \
        (name, description, owner_id, home_id, location_id) \
        VALUES ($1, $2, $3, $4, $5) \
        RETURNING id, name, description, owner_id, home_id, location_id, created, updated";

    const UPDATE_QUERY: &'static str = "UPDATE players SET \
        name = $1, description = $2, owner_id = $3, home_id = $4, location_id = $5, \
        updated = now() WHERE id = $6 \
        RETURNING id, name, description, owner_id, home_id, location_id, created, updated";

    const REMOVE_QUERY: &'static str = "DELETE FROM players WHERE id = $1";

    fn list_query(filter: &PlayerFilter) -> String {
        ListQuery::new(
            "SELECT id, name, description, owner_id, home_id, location_id, created, updated \
             FROM players",
        )
        .filter("owner_id", filter.owner_id)
        .filter("home_id", filter.home_id)
        .filter("location_id", filter.location_id)
        .paginate(filter.pagination)
        .build()
    }

    fn from_row(row: &Row) -> DbResult<Player> {
        Player::try_from_row(row)
    }

    fn params(req: &PlayerRequest) -> Vec<Box<dyn ToSql + Sync + Send>> {
        vec![
            Box::new(req.name.clone()),
            Box::new(req.description.clone()),
            Box::new(req.owner_id),
            Box::new(req.home_id),
            Box::new(req.location_id),
        ]
    }

    fn validate(req: &PlayerRequest) -> AppResult<()> {
        req.validate()
    }

    fn reference_detail(req: &PlayerRequest) -> String {
        format!(
            "ownerID '{}', homeID '{}', or locationID '{}' does not exist",
            req.owner_id, req.home_id, req.location_id
        )
    }

    fn request_name(req: &PlayerRequest) -> &str {
        &req.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::RoomId;

    #[test]
    fn t_list_query_all_predicates() {
        let owner = PlayerId::new();
        let home = RoomId::new();
        let location = RoomId::new();
        let filter = PlayerFilter {
            owner_id: Some(owner),
            home_id: Some(home),
            location_id: Some(location),
            ..Default::default()
        };

        let q = PlayerDef::list_query(&filter);
        assert!(
            q.ends_with(&format!(
                "WHERE owner_id = '{owner}' AND home_id = '{home}' AND location_id = '{location}'"
            )),
            "{q}"
        );
    }
}
