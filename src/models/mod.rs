mod chunk;
mod config;
mod document;
mod message;

pub use chunk::Chunk;
pub use config::{
    API_KEY_ENV, ChunkingConfig, CompletionConfig, Config, DEFAULT_API_BASE_URL,
    DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, EmbeddingConfig, RetrievalConfig,
};
pub use document::SourceDocument;
pub use message::{ChatMessage, ChatTurn, Role};
