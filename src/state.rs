//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::generator::GeminiClient;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Learning-log database (single connection behind a mutex)
    pub db: DbPool,

    /// Question-generation client
    pub generator: Arc<GeminiClient>,
}

impl AppState {
    pub fn new(db: DbPool, generator: Arc<GeminiClient>) -> Self {
        Self { db, generator }
    }
}
