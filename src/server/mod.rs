//! Browser GUI front end: a small axum app serving the embedded HTML/JS
//! page and the JSON API both tabs talk to.
//!
//! Every handler is one synchronous read-modify-write round against the
//! JSON store; no view state lives on the server. The browser passes its
//! start date and day count on each request.

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::store::JsonStore;

pub mod handlers;
pub mod ui;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
}

impl AppState {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/recipes", get(handlers::list_recipes))
        .route("/api/recipes/search", get(handlers::search_recipes))
        .route(
            "/api/recipes/:name",
            get(handlers::get_recipe)
                .put(handlers::put_recipe)
                .delete(handlers::delete_recipe),
        )
        .route(
            "/api/ingredients",
            get(handlers::list_ingredients).post(handlers::add_ingredient),
        )
        .route("/api/plan", get(handlers::get_plan))
        .route("/api/plan/:date/:slot", post(handlers::add_plan_entry))
        .route(
            "/api/plan/:date/:slot/:index",
            axum::routing::delete(handlers::remove_plan_entry),
        )
        .route("/api/shopping-list", get(handlers::shopping_list))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        );

    let public = Router::new()
        .route("/", get(ui::serve_index))
        .route("/static/app.js", get(ui::serve_app_js))
        .route("/health", get(handlers::health));

    Router::new().merge(api).merge(public).with_state(state)
}

/// Bind the local listener and serve until the process is terminated.
pub async fn serve(store: JsonStore, port: u16) -> Result<()> {
    let state = AppState::new(store);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("meal planner GUI listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
