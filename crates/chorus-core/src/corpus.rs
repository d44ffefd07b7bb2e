//! The corpus: a static pool of candidate reply/broadcast texts.

use rand::Rng;
use rand::seq::SliceRandom;

/// Fixed sentence returned when the corpus has no usable lines.
pub const EMPTY_CORPUS_REPLY: &str = "Tidak ada pesan yang tersedia.";

/// Immutable, startup-loaded pool of candidate messages.
///
/// Loaded once before workers start and shared read-only; each worker draws
/// from it with its own random source.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    lines: Vec<String>,
}

impl Corpus {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse newline-delimited text: lines are trimmed, blanks dropped.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A uniformly-random line, or [`EMPTY_CORPUS_REPLY`] when the corpus
    /// holds nothing. Never errors.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> String {
        self.lines
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| EMPTY_CORPUS_REPLY.to_string())
    }
}
