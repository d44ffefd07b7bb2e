//! Reply generation through a prioritized strategy chain.
//!
//! Strategies are evaluated in a fixed order and short-circuit: corpus file,
//! AI completion, corpus again as the default. The AI path carries bounded
//! anti-repetition retry state that persists across poll cycles. Generation
//! never fails for configuration or content reasons; only an unrecoverable
//! network failure in the AI path surfaces as an error, which the worker
//! maps to a fixed apology before sending.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use chorus_types::agent::{AgentConfig, Language};
use chorus_types::error::CompletionError;
use chorus_types::reply::{ReplyResult, ReplySource};

use crate::client::CompletionClient;
use crate::corpus::Corpus;

/// Fixed apology sent when no reply could be produced.
pub const APOLOGY_REPLY: &str = "Maaf, tidak dapat membalas pesan.";

/// Completion attempts before downgrading to fallback text.
const MAX_AI_ATTEMPTS: u32 = 3;

const EN_INSTRUCTION: &str = "Respond with only one sentence in casual urban English, \
     like a natural conversation, and do not use symbols.";
const ID_INSTRUCTION: &str = "Berikan 1 kalimat saja dalam bahasa gaul daerah Jakarta \
     seperti obrolan dan jangan gunakan simbol apapun.";

/// Wrap an incoming prompt with the reply instruction for `language`.
fn wrap_prompt(prompt: &str, language: Language) -> String {
    let instruction = match language {
        Language::En => EN_INSTRUCTION,
        Language::Id => ID_INSTRUCTION,
    };
    format!("{prompt}\n\n{instruction}")
}

/// Per-agent reply generator.
///
/// Owns the agent's anti-repetition state and its independently-seeded
/// random source; concurrent workers never observe each other's state.
pub struct ReplyGenerator<A> {
    config: AgentConfig,
    corpus: Arc<Corpus>,
    completion: Option<Arc<A>>,
    last_ai_reply: Option<String>,
    rng: StdRng,
}

impl<A: CompletionClient> ReplyGenerator<A> {
    pub fn new(config: AgentConfig, corpus: Arc<Corpus>, completion: Option<Arc<A>>) -> Self {
        Self {
            config,
            corpus,
            completion,
            last_ai_reply: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Produce reply text for `prompt` through the strategy chain.
    pub async fn generate(&mut self, prompt: &str) -> Result<ReplyResult, CompletionError> {
        if self.config.use_file_reply {
            return Ok(self.corpus_reply());
        }

        if self.config.use_ai_reply {
            if let Some(completion) = self.completion.clone() {
                return self.ai_reply(completion.as_ref(), prompt).await;
            }
            tracing::warn!("AI replies enabled but no completion client configured, using corpus");
        }

        Ok(self.corpus_reply())
    }

    /// Corpus-only generation. Broadcast-mode workers call this directly.
    pub fn corpus_reply(&mut self) -> ReplyResult {
        ReplyResult {
            text: self.corpus.pick(&mut self.rng),
            source: ReplySource::Corpus,
        }
    }

    /// AI generation with the anti-repetition rule: an attempt whose text
    /// equals the previous accepted AI text is rejected and retried, up to
    /// [`MAX_AI_ATTEMPTS`]. Network failure aborts immediately.
    async fn ai_reply(
        &mut self,
        completion: &A,
        prompt: &str,
    ) -> Result<ReplyResult, CompletionError> {
        let wrapped = wrap_prompt(prompt, self.config.language);

        for attempt in 1..=MAX_AI_ATTEMPTS {
            let text = completion.complete(&wrapped).await?;
            if self.last_ai_reply.as_deref() == Some(text.as_str()) {
                tracing::debug!(attempt, "completion repeated the previous reply, retrying");
                continue;
            }
            self.last_ai_reply = Some(text.clone());
            return Ok(ReplyResult {
                text,
                source: ReplySource::Ai,
            });
        }

        // Retry budget exhausted on repetition: reuse the previous accepted
        // text rather than going silent.
        let text = self
            .last_ai_reply
            .clone()
            .unwrap_or_else(|| APOLOGY_REPLY.to_string());
        Ok(ReplyResult {
            text,
            source: ReplySource::Fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // --- Mock completion client ---

    /// Pops a scripted result per call and counts calls.
    struct MockCompletion {
        script: Mutex<VecDeque<Result<String, CompletionError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockCompletion {
        fn new(script: Vec<Result<String, CompletionError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CompletionClient for MockCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(prompt.to_string());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("mock completion called more times than scripted")
        }
    }

    fn ok(text: &str) -> Result<String, CompletionError> {
        Ok(text.to_string())
    }

    fn config(use_file: bool, use_ai: bool) -> AgentConfig {
        AgentConfig {
            use_file_reply: use_file,
            use_ai_reply: use_ai,
            ..AgentConfig::default()
        }
    }

    // --- Corpus strategy ---

    #[tokio::test]
    async fn test_file_reply_takes_precedence_over_ai() {
        let completion = MockCompletion::new(vec![]);
        let mut generator = ReplyGenerator::new(
            config(true, true),
            Arc::new(Corpus::parse("hi")),
            Some(Arc::clone(&completion)),
        );

        let reply = generator.generate("hello?").await.unwrap();
        assert_eq!(reply.text, "hi");
        assert_eq!(reply.source, ReplySource::Corpus);
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_corpus_yields_fixed_sentence() {
        let mut generator = ReplyGenerator::<MockCompletion>::new(
            config(true, false),
            Arc::new(Corpus::empty()),
            None,
        );

        let reply = generator.generate("hello?").await.unwrap();
        assert_eq!(reply.text, crate::corpus::EMPTY_CORPUS_REPLY);
        assert_eq!(reply.source, ReplySource::Corpus);
    }

    #[tokio::test]
    async fn test_neither_strategy_defaults_to_corpus() {
        let mut generator = ReplyGenerator::<MockCompletion>::new(
            config(false, false),
            Arc::new(Corpus::parse("fallback line")),
            None,
        );

        let reply = generator.generate("hello?").await.unwrap();
        assert_eq!(reply.text, "fallback line");
        assert_eq!(reply.source, ReplySource::Corpus);
    }

    // --- AI strategy ---

    #[tokio::test]
    async fn test_ai_reply_happy_path_wraps_prompt() {
        let completion = MockCompletion::new(vec![ok("sure thing")]);
        let mut generator = ReplyGenerator::new(
            AgentConfig {
                use_ai_reply: true,
                language: Language::En,
                ..AgentConfig::default()
            },
            Arc::new(Corpus::empty()),
            Some(Arc::clone(&completion)),
        );

        let reply = generator.generate("what's up?").await.unwrap();
        assert_eq!(reply.text, "sure thing");
        assert_eq!(reply.source, ReplySource::Ai);

        let sent = completion.calls.lock().unwrap()[0].clone();
        assert!(sent.starts_with("what's up?"));
        assert!(sent.contains("casual urban English"));
    }

    #[tokio::test]
    async fn test_repeated_text_retried_until_distinct() {
        // First cycle accepts "a"; second cycle sees "a" twice, then "b".
        let completion = MockCompletion::new(vec![ok("a"), ok("a"), ok("a"), ok("b")]);
        let mut generator = ReplyGenerator::new(
            config(false, true),
            Arc::new(Corpus::empty()),
            Some(Arc::clone(&completion)),
        );

        let first = generator.generate("one").await.unwrap();
        assert_eq!(first.text, "a");
        assert_eq!(first.source, ReplySource::Ai);

        let second = generator.generate("two").await.unwrap();
        assert_eq!(second.text, "b");
        assert_eq!(second.source, ReplySource::Ai);
        assert_eq!(completion.call_count(), 4);
    }

    #[tokio::test]
    async fn test_exhausted_retries_reuse_previous_text_as_fallback() {
        let completion = MockCompletion::new(vec![ok("a"), ok("a"), ok("a"), ok("a")]);
        let mut generator = ReplyGenerator::new(
            config(false, true),
            Arc::new(Corpus::empty()),
            Some(Arc::clone(&completion)),
        );

        generator.generate("one").await.unwrap();
        let second = generator.generate("two").await.unwrap();
        assert_eq!(second.text, "a");
        assert_eq!(second.source, ReplySource::Fallback);
    }

    #[tokio::test]
    async fn test_network_failure_aborts_without_retry() {
        let completion = MockCompletion::new(vec![
            ok("a"),
            Err(CompletionError::Network("connection reset".to_string())),
        ]);
        let mut generator = ReplyGenerator::new(
            config(false, true),
            Arc::new(Corpus::empty()),
            Some(Arc::clone(&completion)),
        );

        generator.generate("one").await.unwrap();
        let result = generator.generate("two").await;
        assert!(matches!(result, Err(CompletionError::Network(_))));
        // The failed cycle made exactly one attempt.
        assert_eq!(completion.call_count(), 2);

        // Repetition state survives the failure.
        let completion_text = generator.last_ai_reply.as_deref();
        assert_eq!(completion_text, Some("a"));
    }

    #[tokio::test]
    async fn test_ai_without_client_falls_back_to_corpus() {
        let mut generator = ReplyGenerator::<MockCompletion>::new(
            config(false, true),
            Arc::new(Corpus::parse("plan b")),
            None,
        );

        let reply = generator.generate("hello?").await.unwrap();
        assert_eq!(reply.text, "plan b");
        assert_eq!(reply.source, ReplySource::Corpus);
    }

    #[tokio::test]
    async fn test_indonesian_instruction_selected_by_default() {
        let completion = MockCompletion::new(vec![ok("siap")]);
        let mut generator = ReplyGenerator::new(
            config(false, true),
            Arc::new(Corpus::empty()),
            Some(Arc::clone(&completion)),
        );

        generator.generate("halo").await.unwrap();
        let sent = completion.calls.lock().unwrap()[0].clone();
        assert!(sent.contains("bahasa gaul"));
    }
}
