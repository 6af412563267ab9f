//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::LoansError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: LoansError) -> Problem {
    match error {
        LoansError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        LoansError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        LoansError::UnknownReference { resource, id } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Unknown Reference",
        )
        .with_detail(format!("referenced {} with id '{}' does not exist", resource, id)),

        LoansError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        LoansError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

/// Map a rejected JSON body (syntax, wrong types, content type) to 400
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    Problem::new(StatusCode::BAD_REQUEST, "Malformed Request").with_detail(rejection.body_text())
}

/// Map an unparsable path segment (e.g. a non-numeric id) to 400
pub fn map_path_rejection(rejection: PathRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected path");
    Problem::new(StatusCode::BAD_REQUEST, "Invalid Path").with_detail(rejection.body_text())
}

/// Map invalid query parameters (e.g. a negative `skip`) to 400
pub fn map_query_rejection(rejection: QueryRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected query");
    Problem::new(StatusCode::BAD_REQUEST, "Invalid Query").with_detail(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_domain_error() {
        let cases = [
            (LoansError::not_found("kit", 3), 404),
            (LoansError::validation("cantidad is required"), 400),
            (
                LoansError::UnknownReference {
                    resource: "alumno".to_string(),
                    id: 9,
                },
                422,
            ),
            (
                LoansError::Conflict {
                    reason: "taken".to_string(),
                },
                409,
            ),
            (LoansError::Internal, 500),
        ];

        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status);
        }
    }

    #[test]
    fn test_not_found_detail_names_resource() {
        let problem = map_domain_error(LoansError::not_found("prestamo", 12)).with_instance("/api/prestamos/12");
        assert_eq!(problem.title, "prestamo Not Found");
        assert_eq!(
            problem.detail.as_deref(),
            Some("prestamo with id '12' was not found")
        );
        assert_eq!(problem.instance.as_deref(), Some("/api/prestamos/12"));
    }
}
