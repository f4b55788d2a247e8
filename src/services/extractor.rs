//! Plain-text extraction from uploaded PDF documents.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::SourceDocument;

/// Extract the text of every page of every document, concatenated in
/// upload order with no separators inserted.
///
/// A document that fails to parse aborts the extraction. A page whose
/// text cannot be extracted contributes nothing.
pub fn extract_documents(documents: &[SourceDocument]) -> Result<String, ExtractionError> {
    let mut text = String::new();
    for document in documents {
        text.push_str(&extract_document(document)?);
    }
    Ok(text)
}

/// Extract the text of a single document, page by page in page order.
pub fn extract_document(document: &SourceDocument) -> Result<String, ExtractionError> {
    let pdf = lopdf::Document::load_mem(&document.data).map_err(|e| {
        ExtractionError::MalformedDocument {
            name: document.name.clone(),
            reason: e.to_string(),
        }
    })?;

    let mut text = String::new();
    for page_number in pdf.get_pages().keys() {
        match pdf.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                debug!(
                    document = %document.name,
                    page = page_number,
                    error = %e,
                    "page yielded no extractable text"
                );
            }
        }
    }

    debug!(
        document = %document.name,
        chars = text.chars().count(),
        "extracted document text"
    );
    Ok(text)
}
