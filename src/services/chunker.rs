//! Text chunking with overlap for embedding.

use tracing::warn;

use crate::models::{Chunk, ChunkingConfig};

/// Splits raw text into overlapping chunks.
///
/// Windows advance by `chunk_size - overlap` characters, so consecutive
/// chunks share exactly `overlap` characters: concatenating the first
/// chunk with every later chunk minus its first `overlap` characters
/// reconstructs the input.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk length in characters.
    chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    overlap: usize,
    /// Preferred split boundary.
    separator: String,
}

impl TextChunker {
    pub fn new(config: &ChunkingConfig) -> Self {
        let chunk_size = (config.chunk_size as usize).max(1);
        let mut overlap = config.chunk_overlap as usize;
        if overlap >= chunk_size {
            let clamped = chunk_size / 5;
            warn!(
                overlap,
                chunk_size, clamped, "chunk_overlap >= chunk_size, clamping"
            );
            overlap = clamped;
        }
        Self {
            chunk_size,
            overlap,
            separator: config.separator.clone(),
        }
    }

    /// Create a chunker with default settings.
    pub fn with_defaults() -> Self {
        Self::new(&ChunkingConfig::default())
    }

    /// Split text into overlapping chunks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let fingerprint = text_fingerprint(text);
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();

        if total <= self.chunk_size {
            return vec![Chunk::new(&fingerprint, 0, text.to_string(), 0, total as u64)];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut index = 0u32;
        loop {
            let window_end = (start + self.chunk_size).min(total);
            let end = if window_end < total {
                self.break_point(&chars, start, window_end)
            } else {
                window_end
            };

            let content: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(
                &fingerprint,
                index,
                content,
                start as u64,
                end as u64,
            ));

            if end >= total {
                break;
            }
            start = end - self.overlap;
            index += 1;
        }

        chunks
    }

    /// Move the window end back to just after the last separator in the
    /// window tail. The end never moves into the overlap region, so the
    /// window always advances.
    fn break_point(&self, chars: &[char], start: usize, window_end: usize) -> usize {
        let sep: Vec<char> = self.separator.chars().collect();
        if sep.is_empty() {
            return window_end;
        }

        let floor = (start + self.overlap + 1).max(window_end.saturating_sub(self.chunk_size / 5));
        let mut end = window_end;
        while end > floor {
            if end >= sep.len() && chars[end - sep.len()..end] == sep[..] {
                return end;
            }
            end -= 1;
        }
        window_end
    }
}

fn text_fingerprint(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let hash = Sha256::digest(text.as_bytes());
    hex::encode(&hash[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: u32, chunk_overlap: u32) -> TextChunker {
        TextChunker::new(&ChunkingConfig {
            chunk_size,
            chunk_overlap,
            ..Default::default()
        })
    }

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut text: String = chunks[0].content.clone();
        for chunk in &chunks[1..] {
            text.extend(chunk.content.chars().skip(overlap));
        }
        text
    }

    #[test]
    fn test_empty_text() {
        assert!(TextChunker::with_defaults().split("").is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = TextChunker::with_defaults().split("Hello world.Goodbye.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world.Goodbye.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_chunk_length_bound() {
        let text = "lorem ipsum dolor sit amet ".repeat(100);
        let chunks = chunker(100, 20).split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 100);
        }
    }

    #[test]
    fn test_round_trip_without_separator() {
        let text: String = ('a'..='z').cycle().take(1234).collect();
        let chunks = chunker(100, 20).split(&text);
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_round_trip_with_newlines() {
        let text = "first line of the record\nsecond line\n".repeat(40);
        let chunks = chunker(100, 20).split(&text);
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_exact_overlap_offsets() {
        let text: String = ('a'..='z').cycle().take(500).collect();
        let chunks = chunker(100, 20).split(&text);
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start_offset, pair[0].end_offset - 20);
        }
    }

    #[test]
    fn test_prefers_separator_break() {
        let text = format!("{}\n{}", "a".repeat(90), "b".repeat(100));
        let chunks = chunker(100, 20).split(&text);
        assert!(chunks[0].content.ends_with('\n'));
        assert_eq!(chunks[0].content.chars().count(), 91);
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_unicode_text_round_trip() {
        let text = "héllo wörld — ünïcode ".repeat(60);
        let chunks = chunker(100, 20).split(&text);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 100);
        }
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_oversized_overlap_is_clamped() {
        let text: String = ('a'..='z').cycle().take(500).collect();
        let chunks = chunker(100, 100).split(&text);
        assert!(chunks.len() > 1);
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_chunk_ids_are_unique() {
        let text: String = ('a'..='z').cycle().take(500).collect();
        let chunks = chunker(100, 20).split(&text);
        let mut ids: Vec<_> = chunks.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), chunks.len());
    }
}
