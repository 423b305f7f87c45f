pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod net;
pub mod state;

// Convenient re-exports (so call sites can do `arcade::Registry`, etc.)
pub use error::{AppResult, DomainError};
pub use state::registry::Registry;
