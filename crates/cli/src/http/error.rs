use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_relay_core::DeployError;
use serde::Serialize;
use tracing::{error, warn};

/// JSON error body: `{ "error": ..., "detail"?: ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A `DeployError` on its way out of the HTTP surface
pub struct ApiError {
    err: DeployError,
    expose_internal: bool,
}

impl ApiError {
    pub fn new(err: DeployError, expose_internal: bool) -> Self {
        Self {
            err,
            expose_internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.err.is_client_error() {
            warn!(error_type = self.err.error_type(), error = %self.err, "Rejected deploy request");
        } else {
            error!(error_type = self.err.error_type(), error = %self.err, "Deploy failed");
        }

        let detail = match &self.err {
            // Provider body is the only useful diagnosis for a rejected upload
            DeployError::Upload { body, .. } => Some(body.clone()),
            DeployError::Unexpected(_) | DeployError::Archive(_) if self.expose_internal => {
                Some(format!("{:?}", self.err))
            }
            _ => None,
        };

        let body = ErrorBody {
            error: self.err.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError::new(DeployError::missing_field("username"), false).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::new(DeployError::PayloadTooLarge(10), false).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::new(DeployError::Provision("x".into()), false).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
