//! Upload request handler
//!
//! Sequences one upload: parse the multipart form, pick the `image` file,
//! name it, hand it to the FTP uploader and answer with its public URL.
//!
//! If the connection drops after the FTP store succeeds but before the
//! response is written, the stored file is left without a delivered URL.
//! Nothing detects or removes such files.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::{RelayError, RequestError};
use crate::http::responses::{UPLOAD_SUCCESS, UploadResponse};
use crate::middleware::logging::{log_upload_failure, log_upload_success};
use crate::upload::{Clock, FtpConnector, FtpUploader, SystemClock, generate_filename, public_url};

/// Form field carrying the uploaded file
pub const IMAGE_FIELD: &str = "image";

/// Shared, read-only state of the upload endpoint
#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayConfig>,
    uploader: FtpUploader,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Arc<RelayConfig>, connector: Arc<dyn FtpConnector>) -> Self {
        let uploader = FtpUploader::new(connector, config.ftp_settings());
        Self {
            config,
            uploader,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock used for naming uploads
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// OPTIONS: CORS preflight, empty body
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than POST and OPTIONS
pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

/// POST: relay the `image` file to the FTP server
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, RelayError> {
    let mut multipart =
        multipart.map_err(|rejection| RequestError::MalformedForm(rejection.body_text()))?;

    let (original_name, data) = read_image_field(&mut multipart).await?;
    let filename = generate_filename(state.clock.unix_seconds(), &original_name);

    if let Err(e) = state.uploader.upload(filename.clone(), data).await {
        log_upload_failure(&filename, &e);
        return Err(e.into());
    }

    let image_url = public_url(&state.config.public_url_base, &filename);
    log_upload_success(&image_url);

    Ok(Json(UploadResponse::success(UPLOAD_SUCCESS, image_url)))
}

/// Reads the whole form and returns the first `image` file part.
///
/// Every other part is drained so that an oversized body is rejected even
/// when the file itself comes first.
async fn read_image_field(multipart: &mut Multipart) -> Result<(String, Bytes), RequestError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let wanted = image.is_none() && field.name() == Some(IMAGE_FIELD);
        // An empty filename is what browsers send for an untouched file input
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        let data = field.bytes().await.map_err(form_error)?;

        if let (true, Some(name)) = (wanted, file_name) {
            image = Some((name, data));
        }
    }

    image.ok_or(RequestError::MissingField(IMAGE_FIELD))
}

fn form_error(err: MultipartError) -> RequestError {
    RequestError::MalformedForm(err.body_text())
}
