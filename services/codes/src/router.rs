use axum::{
    Router,
    routing::{get, post},
};

use scanpass_core::health::healthz;
use scanpass_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{code::create_code, health::readyz, scan::scan_code};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Codes
        .route("/codes", post(create_code))
        .route("/scan/{id}", get(scan_code))
        // Outermost last: the request id must exist before the trace span is built.
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
