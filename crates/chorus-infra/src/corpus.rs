//! Corpus file loading.

use std::path::Path;

use chorus_core::corpus::Corpus;

/// Load the corpus file into an immutable [`Corpus`].
///
/// A missing or unreadable file yields an empty corpus (workers then send
/// the fixed sentence); this mirrors the agents file, where absence is not
/// an error.
pub async fn load_corpus(path: &Path) -> Corpus {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let corpus = Corpus::parse(&content);
            tracing::info!(path = %path.display(), lines = corpus.len(), "corpus loaded");
            corpus
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "corpus file not found");
            Corpus::empty()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read corpus file");
            Corpus::empty()
        }
    }
}
