use serde::{Deserialize, Serialize};

/// A contiguous segment of the extracted text.
///
/// Offsets are character offsets into the concatenated raw text, so
/// consecutive chunks overlap by exactly the configured overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub index: u32,
    pub content: String,
    pub start_offset: u64,
    pub end_offset: u64,
}

impl Chunk {
    pub fn generate_id(fingerprint: &str, index: u32) -> String {
        use uuid::Uuid;
        let name = format!("{}:{}", fingerprint, index);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }

    pub fn new(
        fingerprint: &str,
        index: u32,
        content: String,
        start_offset: u64,
        end_offset: u64,
    ) -> Self {
        let id = Self::generate_id(fingerprint, index);
        Self {
            id,
            index,
            content,
            start_offset,
            end_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_deterministic() {
        let id = Chunk::generate_id("abc123", 5);
        assert_eq!(id.len(), 36);
        assert_eq!(id, Chunk::generate_id("abc123", 5));
        assert_ne!(id, Chunk::generate_id("abc123", 6));
        assert_ne!(id, Chunk::generate_id("def456", 5));
    }

    #[test]
    fn test_new_sets_offsets() {
        let chunk = Chunk::new("abc", 0, "hello".to_string(), 10, 15);
        assert_eq!(chunk.index, 0);
        assert_eq!(chunk.start_offset, 10);
        assert_eq!(chunk.end_offset, 15);
        assert!(!chunk.id.is_empty());
    }
}
