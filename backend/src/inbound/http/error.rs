//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::invalid_request(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case::unauthorized(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case::forbidden(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
    #[case::not_found(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case::service_unavailable(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case::internal(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        let error = Error::new(code, "boom");
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_in_the_body() {
        let error =
            Error::internal("pool exploded at 03:00").with_details(json!({ "secret": true }));
        let response = error.error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(
            payload.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
        assert!(payload.get("details").is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_their_details() {
        let error = Error::invalid_request("bad boundary")
            .with_details(json!({ "field": "boundaryPoints" }));
        let response = error.error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(
            payload.get("message").and_then(Value::as_str),
            Some("bad boundary")
        );
        assert_eq!(
            payload
                .get("details")
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some("boundaryPoints")
        );
    }
}
