//! The REST surface. Thin by design: handlers parse query strings into
//! filters and bodies into requests, call the matching storage, and JSON-
//! encode the result. All policy (validation, classification) lives below.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{AppResult, DomainError};
use crate::models::item::{Item, ItemFilter, ItemRequest};
use crate::models::link::{Link, LinkFilter, LinkRequest};
use crate::models::location::Location;
use crate::models::player::{Player, PlayerFilter, PlayerRequest};
use crate::models::room::{Room, RoomFilter, RoomRequest};
use crate::models::types::{ItemId, LinkId, Pagination, PlayerId, RoomId};
use crate::net::AppCtx;
use crate::state::registry::Registry;

/// Run the HTTP server.
pub async fn serve(addr: SocketAddr, registry: Arc<Registry>) -> AppResult<()> {
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DomainError::Internal(format!("bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(())
}

pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(remove_item))
        .route("/links", get(list_links).post(create_link))
        .route("/links/{id}", get(get_link).put(update_link).delete(remove_link))
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(remove_player),
        )
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{id}", get(get_room).put(update_room).delete(remove_room))
        .with_state(AppCtx { registry })
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match &self {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::BadRequest(_) | DomainError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Backend details stay in the logs.
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ItemListParams {
    owner_id: Option<PlayerId>,
    location_item_id: Option<ItemId>,
    location_player_id: Option<PlayerId>,
    location_room_id: Option<RoomId>,
    limit: u64,
    offset: u64,
}

impl ItemListParams {
    fn into_filter(self) -> AppResult<ItemFilter> {
        let location = match (self.location_item_id, self.location_player_id, self.location_room_id) {
            (None, None, None) => None,
            (Some(id), None, None) => Some(Location::Item(id)),
            (None, Some(id), None) => Some(Location::Player(id)),
            (None, None, Some(id)) => Some(Location::Room(id)),
            _ => {
                return Err(DomainError::InvalidArgument {
                    field: "location",
                    message: "at most one location predicate may be given".into(),
                });
            }
        };

        Ok(ItemFilter {
            owner_id: self.owner_id,
            location,
            pagination: Pagination::new(self.limit, self.offset).clamped(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LinkListParams {
    owner_id: Option<PlayerId>,
    location_id: Option<RoomId>,
    destination_id: Option<RoomId>,
    limit: u64,
    offset: u64,
}

impl LinkListParams {
    fn into_filter(self) -> LinkFilter {
        LinkFilter {
            owner_id: self.owner_id,
            location_id: self.location_id,
            destination_id: self.destination_id,
            pagination: Pagination::new(self.limit, self.offset).clamped(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlayerListParams {
    owner_id: Option<PlayerId>,
    home_id: Option<RoomId>,
    location_id: Option<RoomId>,
    limit: u64,
    offset: u64,
}

impl PlayerListParams {
    fn into_filter(self) -> PlayerFilter {
        PlayerFilter {
            owner_id: self.owner_id,
            home_id: self.home_id,
            location_id: self.location_id,
            pagination: Pagination::new(self.limit, self.offset).clamped(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RoomListParams {
    owner_id: Option<PlayerId>,
    parent_id: Option<RoomId>,
    limit: u64,
    offset: u64,
}

impl RoomListParams {
    fn into_filter(self) -> RoomFilter {
        RoomFilter {
            owner_id: self.owner_id,
            parent_id: self.parent_id,
            pagination: Pagination::new(self.limit, self.offset).clamped(),
        }
    }
}

async fn list_items(
    State(ctx): State<AppCtx>,
    Query(params): Query<ItemListParams>,
) -> AppResult<Json<Vec<Item>>> {
    let filter = params.into_filter()?;
    Ok(Json(ctx.registry.repos.items.list(&filter).await?))
}

async fn get_item(State(ctx): State<AppCtx>, Path(id): Path<ItemId>) -> AppResult<Json<Item>> {
    Ok(Json(ctx.registry.repos.items.get(id).await?))
}

async fn create_item(
    State(ctx): State<AppCtx>,
    Json(req): Json<ItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = ctx.registry.repos.items.create(&req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(ctx): State<AppCtx>,
    Path(id): Path<ItemId>,
    Json(req): Json<ItemRequest>,
) -> AppResult<Json<Item>> {
    Ok(Json(ctx.registry.repos.items.update(id, &req).await?))
}

async fn remove_item(State(ctx): State<AppCtx>, Path(id): Path<ItemId>) -> AppResult<StatusCode> {
    ctx.registry.repos.items.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_links(
    State(ctx): State<AppCtx>,
    Query(params): Query<LinkListParams>,
) -> AppResult<Json<Vec<Link>>> {
    Ok(Json(ctx.registry.repos.links.list(&params.into_filter()).await?))
}

async fn get_link(State(ctx): State<AppCtx>, Path(id): Path<LinkId>) -> AppResult<Json<Link>> {
    Ok(Json(ctx.registry.repos.links.get(id).await?))
}

async fn create_link(
    State(ctx): State<AppCtx>,
    Json(req): Json<LinkRequest>,
) -> AppResult<(StatusCode, Json<Link>)> {
    let link = ctx.registry.repos.links.create(&req).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn update_link(
    State(ctx): State<AppCtx>,
    Path(id): Path<LinkId>,
    Json(req): Json<LinkRequest>,
) -> AppResult<Json<Link>> {
    Ok(Json(ctx.registry.repos.links.update(id, &req).await?))
}

async fn remove_link(State(ctx): State<AppCtx>, Path(id): Path<LinkId>) -> AppResult<StatusCode> {
    ctx.registry.repos.links.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_players(
    State(ctx): State<AppCtx>,
    Query(params): Query<PlayerListParams>,
) -> AppResult<Json<Vec<Player>>> {
    Ok(Json(ctx.registry.repos.players.list(&params.into_filter()).await?))
}

async fn get_player(State(ctx): State<AppCtx>, Path(id): Path<PlayerId>) -> AppResult<Json<Player>> {
    Ok(Json(ctx.registry.repos.players.get(id).await?))
}

async fn create_player(
    State(ctx): State<AppCtx>,
    Json(req): Json<PlayerRequest>,
) -> AppResult<(StatusCode, Json<Player>)> {
    let player = ctx.registry.repos.players.create(&req).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

async fn update_player(
    State(ctx): State<AppCtx>,
    Path(id): Path<PlayerId>,
    Json(req): Json<PlayerRequest>,
) -> AppResult<Json<Player>> {
    Ok(Json(ctx.registry.repos.players.update(id, &req).await?))
}

async fn remove_player(State(ctx): State<AppCtx>, Path(id): Path<PlayerId>) -> AppResult<StatusCode> {
    ctx.registry.repos.players.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_rooms(
    State(ctx): State<AppCtx>,
    Query(params): Query<RoomListParams>,
) -> AppResult<Json<Vec<Room>>> {
    Ok(Json(ctx.registry.repos.rooms.list(&params.into_filter()).await?))
}

async fn get_room(State(ctx): State<AppCtx>, Path(id): Path<RoomId>) -> AppResult<Json<Room>> {
    Ok(Json(ctx.registry.repos.rooms.get(id).await?))
}

async fn create_room(
    State(ctx): State<AppCtx>,
    Json(req): Json<RoomRequest>,
) -> AppResult<(StatusCode, Json<Room>)> {
    let room = ctx.registry.repos.rooms.create(&req).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

async fn update_room(
    State(ctx): State<AppCtx>,
    Path(id): Path<RoomId>,
    Json(req): Json<RoomRequest>,
) -> AppResult<Json<Room>> {
    Ok(Json(ctx.registry.repos.rooms.update(id, &req).await?))
}

async fn remove_room(State(ctx): State<AppCtx>, Path(id): Path<RoomId>) -> AppResult<StatusCode> {
    ctx.registry.repos.rooms.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_item_params_single_location_predicate() {
        let params = ItemListParams {
            location_room_id: Some(RoomId::new()),
            ..Default::default()
        };
        let filter = params.into_filter().unwrap();
        assert!(matches!(filter.location, Some(Location::Room(_))));
    }

    #[test]
    fn t_item_params_two_location_predicates_rejected() {
        let params = ItemListParams {
            location_room_id: Some(RoomId::new()),
            location_player_id: Some(PlayerId::new()),
            ..Default::default()
        };
        assert!(matches!(
            params.into_filter(),
            Err(DomainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn t_list_params_apply_default_limit() {
        let filter = RoomListParams::default().into_filter();
        assert_eq!(filter.pagination.limit, crate::models::types::DEFAULT_LIMIT);
        assert_eq!(filter.pagination.offset, 0);
    }
}
