mod item;
mod link;
mod player;
mod room;
mod storage;

pub use item::{ItemDef, ItemStorage};
pub use link::{LinkDef, LinkStorage};
pub use player::{PlayerDef, PlayerStorage};
pub use room::{RoomDef, RoomStorage};
pub use storage::{ResourceDef, Storage};
