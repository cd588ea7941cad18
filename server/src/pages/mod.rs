pub mod errors;
pub mod recipes;
pub mod reviews;

use axum::Router;

use crate::AppState;

/// Returns the router for every page route; the 404 fallback is attached by
/// the caller so it also covers paths outside this router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(recipes::router())
        .merge(reviews::router())
}
