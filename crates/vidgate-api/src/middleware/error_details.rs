use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

tokio::task_local! {
    static SHOW_ERROR_DETAILS: bool;
}

/// Decide once per request, from the configured environment, whether error bodies
/// carry the `details` field. Production hides them.
pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    SHOW_ERROR_DETAILS
        .scope(!state.config.is_production(), next.run(request))
        .await
}

/// Whether the current request may expose error details. Hidden outside a request scope.
pub(crate) fn show_error_details() -> bool {
    SHOW_ERROR_DETAILS.try_with(|show| *show).unwrap_or(false)
}
