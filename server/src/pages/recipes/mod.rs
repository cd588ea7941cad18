pub mod create;
pub mod get;
pub mod list;

use axum::routing::get;
use axum::Router;

use crate::AppState;

/// Returns the router for the recipe pages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::index))
        .route("/recipes", get(list::browse))
        .route("/recipe/{id}", get(get::recipe_detail))
        .route("/add_recipe", get(create::show_form).post(create::submit))
}
