//! UI serving routes
//!
//! Serves the embedded checker page and dashboard.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const DASHBOARD_HTML: &str = include_str!("../ui/dashboard.html");
const APP_JS: &str = include_str!("../ui/app.js");
const DASHBOARD_JS: &str = include_str!("../ui/dashboard.js");

/// GET /
///
/// Serves the checker page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /dashboard
///
/// Serves the dashboard page
pub async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /static/dashboard.js
pub async fn serve_dashboard_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        DASHBOARD_JS,
    )
        .into_response()
}
