//! # daybook-api
//!
//! HTTP API server for daybook: registration and login, global tags, dated
//! notes and the todos extracted from them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use auth::{AuthUser, Claims, TokenSigner};
pub use config::ServerConfig;
pub use error::ApiError;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use router::build_router;
pub use state::AppState;
