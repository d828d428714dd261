//! Error handlers
//!
//! Converts relay errors into the HTTP status and body the caller sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::types::{RelayError, RequestError};
use crate::http::responses::{
    FORM_ERROR_PREFIX, INTERNAL_UPLOAD_ERROR, METHOD_NOT_ALLOWED, MISSING_IMAGE_FIELD,
    UploadResponse,
};

/// Convert error to HTTP status code
pub fn error_to_status(err: &RelayError) -> StatusCode {
    match err {
        RelayError::Request(_) => StatusCode::BAD_REQUEST,
        RelayError::Transfer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
    }
}

/// Message shown to the caller; backend detail is replaced by a generic text
pub fn client_message(err: &RelayError) -> String {
    match err {
        RelayError::Request(RequestError::MalformedForm(reason)) => {
            format!("{}{}", FORM_ERROR_PREFIX, reason)
        }
        RelayError::Request(RequestError::MissingField(_)) => MISSING_IMAGE_FIELD.to_string(),
        RelayError::Transfer(_) => INTERNAL_UPLOAD_ERROR.to_string(),
        RelayError::MethodNotAllowed => METHOD_NOT_ALLOWED.to_string(),
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self);
        let message = client_message(&self);

        match self {
            // Protocol misuse is answered in plain text, not JSON
            RelayError::MethodNotAllowed => (status, message).into_response(),
            _ => UploadResponse::failure(message).with_status(status),
        }
    }
}
