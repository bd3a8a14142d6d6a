//! Error responses.
//!
//! Maps the closed error taxonomy to HTTP status codes. Clients
//! branch on `kind`, never on the message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::CustodyError;
use crate::observability::metrics;

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

fn status_for(error: &CustodyError) -> StatusCode {
    match error {
        CustodyError::InvalidDraftField { .. } => StatusCode::BAD_REQUEST,
        CustodyError::IdentityNotFound(_) => StatusCode::NOT_FOUND,
        CustodyError::CorruptSecret(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CustodyError::StoreWriteFailed(_) => StatusCode::BAD_GATEWAY,
        CustodyError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CustodyError::ChainParameterUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CustodyError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for CustodyError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "Request rejected");
        }
        metrics::record_error(self.kind());

        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
