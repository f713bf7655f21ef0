use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
mod password;
pub mod repo;
mod repo_types;
mod services;

pub use repo::PgUserStore;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
