//! Retrieval-augmented conversation over an in-memory index.

use std::sync::Arc;

use tracing::debug;

use crate::error::ChatError;
use crate::models::{ChatMessage, ChatTurn, RetrievalConfig};
use crate::services::completion::CompletionProvider;
use crate::services::index::{RetrievedChunk, VectorIndex};

/// Answers questions against a bound index, keeping the running dialogue
/// history across turns.
///
/// A turn either appends both the question and the answer to the history
/// or, on any failure, appends nothing.
pub struct ConversationEngine {
    index: VectorIndex,
    completion: Arc<dyn CompletionProvider>,
    retrieval: RetrievalConfig,
    history: Vec<ChatMessage>,
}

impl ConversationEngine {
    pub fn new(
        index: VectorIndex,
        completion: Arc<dyn CompletionProvider>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            completion,
            retrieval,
            history: Vec::new(),
        }
    }

    /// Run one question turn and return the answer text.
    pub async fn ask(&mut self, question: &str) -> Result<String, ChatError> {
        let retrieved = self
            .index
            .retrieve(
                question,
                self.retrieval.top_k as usize,
                self.retrieval.min_score,
            )
            .await?;

        debug!(
            retrieved = retrieved.len(),
            history = self.history.len(),
            "composing prompt"
        );

        let messages = compose_messages(&retrieved, &self.history, question);
        let answer = self.completion.complete(&messages).await?;

        // History mutates only after the provider call succeeded.
        self.history.push(ChatMessage::user(question));
        self.history.push(ChatMessage::assistant(answer.clone()));

        Ok(answer)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// The two most recently appended records, question then answer.
    pub fn last_turn(&self) -> Option<ChatTurn> {
        let len = self.history.len();
        if len < 2 {
            return None;
        }
        Some(ChatTurn {
            question: self.history[len - 2].clone(),
            answer: self.history[len - 1].clone(),
        })
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

/// System message with the retrieved excerpts, then the prior history,
/// then the new question.
fn compose_messages(
    context: &[RetrievedChunk],
    history: &[ChatMessage],
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt(context)));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(question));
    messages
}

fn system_prompt(context: &[RetrievedChunk]) -> String {
    let mut prompt = String::from(
        "You are answering questions about the user's documents. \
         Use the excerpts below; if they do not contain the answer, say so.",
    );
    if !context.is_empty() {
        prompt.push_str("\n\nExcerpts:");
        for retrieved in context {
            prompt.push_str("\n---\n");
            prompt.push_str(&retrieved.chunk.content);
        }
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompletionError;
    use crate::models::{Chunk, Role};
    use crate::services::testing::{FailingCompletion, FakeEmbedder, RecordingCompletion};

    async fn engine_with(completion: Arc<dyn CompletionProvider>) -> ConversationEngine {
        let chunks = vec![
            Chunk::new("test", 0, "the sky is blue".to_string(), 0, 15),
            Chunk::new("test", 1, "grass is green".to_string(), 15, 29),
        ];
        let index = VectorIndex::build(chunks, Arc::new(FakeEmbedder::default()))
            .await
            .unwrap();
        ConversationEngine::new(index, completion, RetrievalConfig::default())
    }

    #[tokio::test]
    async fn test_turn_appends_two_records() {
        let completion = Arc::new(RecordingCompletion::answering("It is blue."));
        let mut engine = engine_with(completion).await;

        let answer = engine.ask("what color is the sky?").await.unwrap();
        assert_eq!(answer, "It is blue.");
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history()[0].role, Role::User);
        assert_eq!(engine.history()[0].content, "what color is the sky?");
        assert_eq!(engine.history()[1].role, Role::Assistant);
        assert_eq!(engine.history()[1].content, "It is blue.");
    }

    #[tokio::test]
    async fn test_last_turn_is_most_recent_pair() {
        let completion = Arc::new(RecordingCompletion::answering("answer"));
        let mut engine = engine_with(completion).await;

        assert!(engine.last_turn().is_none());
        engine.ask("first").await.unwrap();
        engine.ask("second").await.unwrap();

        let turn = engine.last_turn().unwrap();
        assert_eq!(turn.question.content, "second");
        assert_eq!(turn.answer.content, "answer");
        assert_eq!(engine.history().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_completion_leaves_history_unchanged() {
        let mut engine = engine_with(Arc::new(FailingCompletion)).await;

        let err = engine.ask("anything").await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Completion(CompletionError::ProviderError(_))
        ));
        assert!(engine.history().is_empty());
        assert!(engine.last_turn().is_none());
    }

    #[tokio::test]
    async fn test_prompt_carries_context_history_and_question() {
        let completion = Arc::new(RecordingCompletion::answering("ok"));
        let mut engine = engine_with(completion.clone()).await;

        engine.ask("first question").await.unwrap();
        engine.ask("second question").await.unwrap();

        let prompts = completion.requests();
        let last = prompts.last().unwrap();
        // system + prior turn (2) + new question
        assert_eq!(last.len(), 4);
        assert_eq!(last[0].role, Role::System);
        assert!(last[0].content.contains("Excerpts"));
        assert_eq!(last[1].content, "first question");
        assert_eq!(last[2].content, "ok");
        assert_eq!(last[3].content, "second question");
    }
}
