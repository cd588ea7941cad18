use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

#[derive(Template)]
#[template(path = "404.html")]
struct NotFoundPage;

#[derive(Template)]
#[template(path = "500.html")]
struct ServerErrorPage;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    let body = NotFoundPage
        .render()
        .unwrap_or_else(|_| "Page not found".to_string());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Body of the generic failure page. Rendering must not itself be able to
/// fail the request, so a plain-text body stands in if the template does.
pub fn server_error_page() -> Html<String> {
    Html(
        ServerErrorPage
            .render()
            .unwrap_or_else(|_| "Internal server error".to_string()),
    )
}
