pub mod create;

use axum::routing::post;
use axum::Router;

use crate::AppState;

/// Returns the router for the review pages.
pub fn router() -> Router<AppState> {
    Router::new().route("/add_review/{recipe_id}", post(create::submit))
}
