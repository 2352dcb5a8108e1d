use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use tandem_core::ChatError;
use tandem_types::api::ErrorBody;

/// Everything a handler can fail with: a request that never reached the
/// service, or a domain error kind from the service. Each kind maps to one
/// status code and a stable machine-readable code string.
#[derive(Debug)]
pub enum ApiError {
    Invalid(&'static str),
    Chat(ChatError),
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::Chat(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Invalid(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.to_string()),
            ApiError::Chat(e) => {
                let status = match e {
                    ChatError::InvalidPair => StatusCode::BAD_REQUEST,
                    ChatError::InviteFailed(_) | ChatError::AcceptFailed(_) => StatusCode::CONFLICT,
                    ChatError::UpdateFailed(_)
                    | ChatError::GetDetailFailed(_)
                    | ChatError::DeleteFailed(_) => StatusCode::NOT_FOUND,
                    ChatError::StorageTimeout => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, e.code(), e.to_string())
            }
        };

        warn!(%status, code, "request failed: {message}");
        (status, Json(ErrorBody { code, message })).into_response()
    }
}
