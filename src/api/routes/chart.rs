//! Chart Page Route
//!
//! - GET / - Embedded live chart page
//!
//! Serves a self-contained HTML page that opens the WebSocket feed and
//! redraws the line chart on every pushed snapshot.

use axum::response::Html;

/// GET /
pub async fn chart_page() -> Html<&'static str> {
    Html(include_str!("../../../assets/chart.html"))
}
