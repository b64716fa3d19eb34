pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/submit-questionnaire",
            post(submissions::submit).fallback(method_not_allowed),
        )
        .route(
            "/api/fetch-submissions",
            get(submissions::list)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/fetch-submission",
            get(submissions::get)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/update-submission",
            post(submissions::update).fallback(method_not_allowed),
        )
}

/// JSON 405 for any verb a route does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
