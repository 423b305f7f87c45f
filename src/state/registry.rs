use crate::config::Config;
use crate::db::Db;
use crate::db::repo::{ItemStorage, LinkStorage, PlayerStorage, RoomStorage};
use std::sync::Arc;

/// One storage per resource kind. The storages hold no mutable state of
/// their own; everything lives in the backend.
pub struct Repos {
    pub items: ItemStorage,
    pub links: LinkStorage,
    pub players: PlayerStorage,
    pub rooms: RoomStorage,
}

/// Constructed once at boot and shared behind an `Arc` by every request
/// handler.
pub struct Registry {
    pub db: Arc<Db>,
    pub repos: Arc<Repos>,
    pub config: Arc<Config>,
}

impl Registry {
    pub fn new(db: Arc<Db>, config: Arc<Config>) -> Self {
        let repos = Arc::new(Repos {
            items: ItemStorage::new(db.clone()),
            links: LinkStorage::new(db.clone()),
            players: PlayerStorage::new(db.clone()),
            rooms: RoomStorage::new(db.clone()),
        });

        Self { db, repos, config }
    }
}
