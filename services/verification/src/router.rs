use axum::{
    Router,
    routing::{get, post},
};

use chow_core::health::{healthz, readyz};
use chow_core::middleware::{
    cors_layer, propagate_request_id_layer, request_id_layer, trace_layer,
};

use crate::handlers::{
    places::google_places_autocomplete,
    verification::{send_verification_email, verify_email_code},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState>))
        // Email verification
        .route("/send-verification-email", post(send_verification_email))
        .route("/verify-email-code", post(verify_email_code))
        // City autocomplete
        .route(
            "/google-places-autocomplete",
            post(google_places_autocomplete),
        )
        // CORS answers every OPTIONS before routing
        .layer(cors_layer())
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
