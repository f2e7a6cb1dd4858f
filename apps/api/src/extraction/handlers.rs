use axum::extract::{multipart::MultipartError, Multipart};
use axum::Json;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf::{extract_text, validate_filename, ExtractionResult};

/// Multipart field carrying the résumé.
pub const FILE_FIELD: &str = "file";

/// POST /extract-resume
///
/// Accepts a multipart upload, checks the filename before reading any bytes,
/// buffers the whole file and returns its text.
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        validate_filename(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Extraction(e.to_string()))?;
        info!("Extracting text from {filename} ({} bytes)", data.len());

        let full_text = extract_text(data).await?;
        info!(
            "Extracted {} characters from {filename}",
            full_text.chars().count()
        );

        return Ok(Json(ExtractionResult::new(filename, full_text)));
    }

    Err(AppError::Validation(format!(
        "No file uploaded; expected multipart field '{FILE_FIELD}'"
    )))
}

/// Bad framing is the client's fault; a body stream that fails partway
/// through is a read failure like any other.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status().is_client_error() {
        AppError::Validation(format!("Invalid multipart body: {e}"))
    } else {
        AppError::Extraction(e.to_string())
    }
}
