//! Résumé text extraction — the document-text collaborator.
//!
//! The screening engine treats the result as an opaque string; no structured
//! field extraction happens here or anywhere downstream.

use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF.
pub fn text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "document contains no extractable text".to_string(),
        ));
    }

    Ok(text)
}
