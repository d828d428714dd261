//! Error types
//!
//! Defines the error taxonomy of the relay: bad client input, FTP backend
//! failures, and protocol misuse.

use std::fmt;

/// Client input errors, reported to the caller as-is
#[derive(Debug)]
pub enum RequestError {
    MalformedForm(String),
    MissingField(&'static str),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MalformedForm(reason) => write!(f, "Malformed multipart form: {}", reason),
            RequestError::MissingField(name) => write!(f, "Missing form field: {}", name),
        }
    }
}

impl std::error::Error for RequestError {}

/// FTP backend errors, logged in full but never shown to the caller
#[derive(Debug)]
pub enum TransferError {
    InvalidAddress { address: String, reason: String },
    Connect { address: String, reason: String },
    Login { username: String, reason: String },
    Store { path: String, reason: String },
    Worker(String),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::InvalidAddress { address, reason } => {
                write!(f, "Cannot resolve FTP address {}: {}", address, reason)
            }
            TransferError::Connect { address, reason } => {
                write!(f, "Failed to connect to {}: {}", address, reason)
            }
            TransferError::Login { username, reason } => {
                write!(f, "Login failed for user {}: {}", username, reason)
            }
            TransferError::Store { path, reason } => {
                write!(f, "Failed to store {}: {}", path, reason)
            }
            TransferError::Worker(reason) => write!(f, "Upload task failed: {}", reason),
        }
    }
}

impl std::error::Error for TransferError {}

/// General relay error that encompasses all error types
#[derive(Debug)]
pub enum RelayError {
    Request(RequestError),
    Transfer(TransferError),
    MethodNotAllowed,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Request(e) => write!(f, "Request error: {}", e),
            RelayError::Transfer(e) => write!(f, "Transfer error: {}", e),
            RelayError::MethodNotAllowed => write!(f, "Method not allowed"),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<RequestError> for RelayError {
    fn from(error: RequestError) -> Self {
        RelayError::Request(error)
    }
}

impl From<TransferError> for RelayError {
    fn from(error: TransferError) -> Self {
        RelayError::Transfer(error)
    }
}
