mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use state::{HttpState, generate_service_token};

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/accounts_create", post(handlers::accounts_create))
        .route("/accounts_get", post(handlers::accounts_get))
        .route("/accounts_list", post(handlers::accounts_list))
        .route("/accounts_delete", post(handlers::accounts_delete))
        .route("/consume", post(handlers::consume))
        .route("/usage_current", post(handlers::usage_current))
        .route("/usage_breakdown", post(handlers::usage_breakdown))
        .route("/usage_events", post(handlers::usage_events))
        .route("/plan_set", post(handlers::plan_set))
        .route("/billing_confirmed", post(handlers::billing_confirmed))
        .route("/plans_list", post(handlers::plans_list))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_token,
        ));

    Router::new()
        .nest("/api", api)
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .with_state(state)
}
