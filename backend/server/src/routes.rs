use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Utc;

use crate::{
    database::test_database_connection, render::render_page, state::AppState,
    view::fetch_view_state,
};

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = fetch_view_state(state.store.as_ref()).await;

    Html(render_page(&view, Utc::now()))
}

pub async fn test_connection_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let is_connected = test_database_connection(state.store.as_ref()).await;

    (StatusCode::OK, is_connected.to_string()).into_response()
}
