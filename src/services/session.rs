//! Process-wide session state: one conversation engine at a time.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::error::{ChatError, ProcessError};
use crate::models::{ChatMessage, ChatTurn, Config, SourceDocument};
use crate::services::chunker::TextChunker;
use crate::services::completion::CompletionProvider;
use crate::services::conversation::ConversationEngine;
use crate::services::embedding::EmbeddingProvider;
use crate::services::extractor;
use crate::services::index::VectorIndex;

/// Outcome of a successful process action, for rendering.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ProcessStats {
    pub documents: usize,
    pub characters: usize,
    pub chunks: usize,
    pub duration_ms: u64,
}

/// Explicitly passed context holding at most one conversation engine.
///
/// A process action replaces the engine (index + history) as one unit,
/// and only after the whole pipeline succeeded; a failed rebuild leaves
/// the previous engine untouched.
pub struct Session {
    config: Config,
    embedder: Arc<dyn EmbeddingProvider>,
    completion: Arc<dyn CompletionProvider>,
    engine: Option<ConversationEngine>,
}

impl Session {
    pub fn new(
        config: Config,
        embedder: Arc<dyn EmbeddingProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            config,
            embedder,
            completion,
            engine: None,
        }
    }

    /// Whether documents have been processed and questions can be asked.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// Run the full pipeline: extract, chunk, embed, index, and bind a
    /// fresh conversation engine with empty history.
    pub async fn process(
        &mut self,
        documents: &[SourceDocument],
    ) -> Result<ProcessStats, ProcessError> {
        let start = Instant::now();

        let text = extractor::extract_documents(documents)?;
        let characters = text.chars().count();

        let chunks = TextChunker::new(&self.config.chunking).split(&text);
        let chunk_count = chunks.len();

        let index = VectorIndex::build(chunks, self.embedder.clone()).await?;

        self.engine = Some(ConversationEngine::new(
            index,
            self.completion.clone(),
            self.config.retrieval.clone(),
        ));

        let stats = ProcessStats {
            documents: documents.len(),
            characters,
            chunks: chunk_count,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            documents = stats.documents,
            chunks = stats.chunks,
            duration_ms = stats.duration_ms,
            "processed documents"
        );
        Ok(stats)
    }

    /// Run one question turn against the bound engine.
    pub async fn ask(&mut self, question: &str) -> Result<String, ChatError> {
        match self.engine.as_mut() {
            Some(engine) => engine.ask(question).await,
            None => Err(ChatError::NotReady),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.engine.as_ref().map(|e| e.history()).unwrap_or(&[])
    }

    pub fn last_turn(&self) -> Option<ChatTurn> {
        self.engine.as_ref().and_then(|e| e.last_turn())
    }

    pub fn chunk_count(&self) -> usize {
        self.engine.as_ref().map(|e| e.index().len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FailingEmbedder, FakeEmbedder, RecordingCompletion, make_pdf};

    fn session_with_embedder(embedder: Arc<dyn EmbeddingProvider>) -> Session {
        Session::new(
            Config::default(),
            embedder,
            Arc::new(RecordingCompletion::answering("the answer")),
        )
    }

    fn documents() -> Vec<SourceDocument> {
        vec![SourceDocument::new(
            "doc.pdf",
            make_pdf(&["Hello world.", "Goodbye."]),
        )]
    }

    #[tokio::test]
    async fn test_question_before_process_is_not_ready() {
        let mut session = session_with_embedder(Arc::new(FakeEmbedder::default()));
        assert!(!session.is_ready());

        let err = session.ask("anything").await.unwrap_err();
        assert!(matches!(err, ChatError::NotReady));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_process_then_ask() {
        let mut session = session_with_embedder(Arc::new(FakeEmbedder::default()));
        let stats = session.process(&documents()).await.unwrap();
        assert_eq!(stats.documents, 1);
        assert!(stats.characters > 0);
        assert_eq!(stats.chunks, 1);
        assert!(session.is_ready());

        let answer = session.ask("what does it say?").await.unwrap();
        assert_eq!(answer, "the answer");
        let turn = session.last_turn().unwrap();
        assert_eq!(turn.question.content, "what does it say?");
        assert_eq!(turn.answer.content, "the answer");
    }

    #[tokio::test]
    async fn test_reprocess_resets_history() {
        let mut session = session_with_embedder(Arc::new(FakeEmbedder::default()));
        session.process(&documents()).await.unwrap();
        session.ask("first").await.unwrap();
        assert_eq!(session.history().len(), 2);

        session.process(&documents()).await.unwrap();
        assert!(session.is_ready());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_state() {
        let good = Arc::new(FakeEmbedder::default());
        let mut session = Session::new(
            Config::default(),
            good,
            Arc::new(RecordingCompletion::answering("ok")),
        );
        session.process(&documents()).await.unwrap();
        session.ask("first").await.unwrap();

        // Swap in a failing embedder for the rebuild.
        session.embedder = Arc::new(FailingEmbedder);
        let err = session.process(&documents()).await.unwrap_err();
        assert!(matches!(err, ProcessError::Embedding(_)));

        // Prior engine, index, and history are all intact.
        assert!(session.is_ready());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.chunk_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_extraction_keeps_session_uninitialized() {
        let mut session = session_with_embedder(Arc::new(FakeEmbedder::default()));
        let bad = vec![SourceDocument::new("bad.pdf", b"not a pdf".to_vec())];
        let err = session.process(&bad).await.unwrap_err();
        assert!(matches!(err, ProcessError::Extraction(_)));
        assert!(!session.is_ready());
    }

    #[tokio::test]
    async fn test_empty_document_set_builds_empty_index() {
        let mut session = session_with_embedder(Arc::new(FakeEmbedder::default()));
        let stats = session.process(&[]).await.unwrap();
        assert_eq!(stats.documents, 0);
        assert_eq!(stats.chunks, 0);
        assert!(session.is_ready());

        // Questions still run, just with no retrieved context.
        let answer = session.ask("anything").await.unwrap();
        assert_eq!(answer, "the answer");
    }
}
