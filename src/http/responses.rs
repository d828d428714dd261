//! HTTP response bodies
//!
//! Defines the JSON body returned by the upload endpoint and the
//! caller-facing messages.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const UPLOAD_SUCCESS: &str = "Upload realizado com sucesso!";
pub const FORM_ERROR_PREFIX: &str = "Erro ao processar o arquivo: ";
pub const MISSING_IMAGE_FIELD: &str = "Campo 'image' não encontrado no formulário.";
pub const INTERNAL_UPLOAD_ERROR: &str = "Erro interno ao salvar a imagem.";
pub const METHOD_NOT_ALLOWED: &str = "Método não permitido";

/// JSON body of every upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UploadResponse {
    pub fn success(message: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            image_url: Some(image_url.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            image_url: None,
        }
    }

    /// Pair the body with a status code
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
