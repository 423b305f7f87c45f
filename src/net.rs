pub mod http;

use crate::state::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppCtx {
    pub registry: Arc<Registry>,
}
