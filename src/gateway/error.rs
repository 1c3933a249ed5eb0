use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::broker::BrokerError;
use crate::gateway::SCREENGATE_STATUS_HEADER;
use crate::scorer::ScorerError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("scorer unavailable: {0}")]
    ScorerUnavailable(String),

    #[error("malformed scorer response: {0}")]
    MalformedScorerResponse(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<BrokerError> for GatewayError {
    fn from(err: BrokerError) -> Self {
        match &err {
            BrokerError::EmptyInput => GatewayError::InvalidRequest(err.to_string()),
            BrokerError::Scorer(ScorerError::Transport { .. }) => {
                GatewayError::ScorerUnavailable(err.to_string())
            }
            BrokerError::Scorer(ScorerError::MalformedResponse { .. }) => {
                GatewayError::MalformedScorerResponse(err.to_string())
            }
            BrokerError::Store(_) => GatewayError::StorageError(err.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message, gateway_status) = match &self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request")
            }
            GatewayError::ScorerUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string(), "scorer_error")
            }
            GatewayError::MalformedScorerResponse(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string(), "scorer_error")
            }
            GatewayError::StorageError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
                "storage_error",
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            SCREENGATE_STATUS_HEADER,
            HeaderValue::from_str(gateway_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
