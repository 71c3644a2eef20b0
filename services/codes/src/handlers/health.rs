use axum::{extract::State, http::StatusCode};

use scanpass_core::health::readiness;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the database answers within the
/// storage timeout.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.storage_timeout, state.db.ping()).await
}
