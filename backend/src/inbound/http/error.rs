//! Mapping from domain errors to HTTP responses.
//!
//! Handlers return [`ApiResult`]; Actix renders the error half through the
//! [`ResponseError`] impl below. Internal failures are logged in full and sent
//! to the client with a generic message, keeping the trace identifier so the
//! two can be correlated.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for employee handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Payload sent to the client for `error`.
fn public_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let public = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => public.with_trace_id(id.to_owned()),
        None => public,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => error!(error = %self, "employee request failed"),
            ErrorCode::ServiceUnavailable => warn!(error = %self, "employee store unavailable"),
            ErrorCode::InvalidRequest | ErrorCode::NotFound => {}
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced as internal error");
        Self::internal(INTERNAL_MESSAGE)
    }
}

/// Report malformed JSON bodies with the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected malformed JSON body");
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}
