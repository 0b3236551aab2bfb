//! Shared application state.

use daybook_db::Database;

use crate::auth::TokenSigner;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenSigner,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenSigner) -> Self {
        Self { db, tokens }
    }
}
