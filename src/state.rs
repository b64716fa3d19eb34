use std::sync::Arc;

use sqlx::SqlitePool;

pub type SharedState = Arc<AppState>;

/// Process-lifetime handles shared by every handler.
pub struct AppState {
    pub pool: SqlitePool,
}
