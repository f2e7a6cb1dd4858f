//! PDF text extraction: filename gate, page-by-page parse, preview.

use std::any::Any;

use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;

/// Literal, case-sensitive suffix an upload's filename must carry.
pub const PDF_SUFFIX: &str = ".pdf";
/// Number of characters of extracted text echoed back as a preview.
pub const PREVIEW_CHARS: usize = 200;
const PREVIEW_MARKER: &str = "...";

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub filename: String,
    pub text_preview: String,
    pub full_text: String,
}

impl ExtractionResult {
    pub fn new(filename: String, full_text: String) -> Self {
        Self {
            filename,
            text_preview: preview(&full_text),
            full_text,
        }
    }
}

/// Rejects any filename that does not end in `.pdf` (so `CV.PDF` is rejected).
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.ends_with(PDF_SUFFIX) {
        Ok(())
    } else {
        Err(AppError::Validation("Only PDF files are allowed".to_string()))
    }
}

/// First `PREVIEW_CHARS` characters followed by `"..."`. The marker is
/// appended even when nothing was cut off.
pub fn preview(full_text: &str) -> String {
    let mut out: String = full_text.chars().take(PREVIEW_CHARS).collect();
    out.push_str(PREVIEW_MARKER);
    out
}

/// Concatenates page texts in order, each followed by a newline.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// Parses an in-memory PDF and returns the text of all pages.
///
/// Runs on the blocking pool. The parser is known to panic on some malformed
/// inputs; a panic is reported as an extraction error like any other failure.
pub async fn extract_text(data: Bytes) -> Result<String, AppError> {
    let parsed =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&data))
            .await;

    match parsed {
        Ok(Ok(pages)) => Ok(join_pages(pages)),
        Ok(Err(e)) => Err(AppError::Extraction(e.to_string())),
        Err(join_err) if join_err.is_panic() => Err(AppError::Extraction(panic_message(
            join_err.into_panic(),
        ))),
        Err(join_err) => Err(AppError::Internal(join_err.into())),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}
