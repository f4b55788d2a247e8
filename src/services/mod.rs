//! Core pipeline services: extraction, chunking, embedding, indexing,
//! and conversation.

pub mod chunker;
pub mod completion;
pub mod conversation;
pub mod embedding;
pub mod extractor;
pub mod index;
pub mod session;

pub use chunker::TextChunker;
pub use completion::{CompletionProvider, OpenAiChat};
pub use conversation::ConversationEngine;
pub use embedding::{EmbeddingProvider, OpenAiEmbeddings};
pub use extractor::{extract_document, extract_documents};
pub use index::{RetrievedChunk, VectorIndex};
pub use session::{ProcessStats, Session};
