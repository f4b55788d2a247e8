use std::path::Path;

use crate::error::ExtractionError;

/// An uploaded PDF document, held in memory for the duration of one
/// process action.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub data: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Load a document from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path).map_err(|source| ExtractionError::ReadError {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, data })
    }

    /// Stable fingerprint of the document contents, used to derive chunk ids.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(&self.data);
        hex::encode(&hash[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fingerprint_is_stable() {
        let doc = SourceDocument::new("a.pdf", vec![1, 2, 3]);
        assert_eq!(doc.fingerprint(), doc.fingerprint());
        assert_eq!(doc.fingerprint().len(), 32);
    }

    #[test]
    fn test_fingerprint_differs_by_content() {
        let a = SourceDocument::new("a.pdf", vec![1, 2, 3]);
        let b = SourceDocument::new("a.pdf", vec![1, 2, 4]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-fake").unwrap();
        let doc = SourceDocument::from_path(file.path()).unwrap();
        assert_eq!(doc.data, b"%PDF-fake");
        assert!(!doc.name.is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SourceDocument::from_path("/nonexistent/missing.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::ReadError { .. }));
    }
}
