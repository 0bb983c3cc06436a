/// Best-paragraph retrieval over the knowledge base.
use serde::Serialize;
use thiserror::Error;

use crate::corpus::CorpusIndex;
use crate::embedder::{Embedder, EmbedderError};

/// Errors from an answer request. `EmptyQuery` is input validation;
/// embedding failures propagate unchanged.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("query text is empty")]
    EmptyQuery,

    #[error(transparent)]
    Embedding(#[from] EmbedderError),
}

/// The single best-matching knowledge-base paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub similarity: f32,
}

/// Answers free-text questions from the knowledge-base corpus.
pub struct AnswerRetriever<'a> {
    embedder: &'a dyn Embedder,
    knowledge: &'a CorpusIndex,
}

impl<'a> AnswerRetriever<'a> {
    pub fn new(embedder: &'a dyn Embedder, knowledge: &'a CorpusIndex) -> Self {
        Self {
            embedder,
            knowledge,
        }
    }

    /// Return the highest-similarity paragraph for the query.
    ///
    /// Deterministic given the same query and knowledge base. The index is
    /// non-empty by construction, so there is always an answer.
    pub fn answer(&self, query: &str) -> Result<Answer, QueryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let embedding = self.embedder.embed(query)?;
        let best = self.knowledge.best(&embedding);

        Ok(Answer {
            text: best.entry.text.clone(),
            similarity: best.similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusEntry;

    struct StubEmbedder {
        table: Vec<(&'static str, Vec<f32>)>,
    }

    impl Embedder for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
            self.table
                .iter()
                .find(|(key, _)| *key == text)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| EmbedderError::InferenceFailed(format!("no stub for {text:?}")))
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn paragraph(i: usize, text: &str, embedding: Vec<f32>) -> CorpusEntry {
        CorpusEntry {
            id: i.to_string(),
            text: text.to_string(),
            embedding,
        }
    }

    fn two_paragraph_index() -> CorpusIndex {
        CorpusIndex::new(
            vec![
                paragraph(
                    0,
                    "Cosine similarity measures vector angle.",
                    vec![1.0, 0.0, 0.0],
                ),
                paragraph(
                    1,
                    "Skill gap analysis compares vocabularies.",
                    vec![0.0, 1.0, 0.0],
                ),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_returns_most_similar_paragraph() {
        let query = "how do you measure similarity between vectors";
        let embedder = StubEmbedder {
            table: vec![(query, vec![0.95, 0.05, 0.0])],
        };
        let knowledge = two_paragraph_index();
        let retriever = AnswerRetriever::new(&embedder, &knowledge);

        let answer = retriever.answer(query).unwrap();
        assert_eq!(answer.text, "Cosine similarity measures vector angle.");
        assert!(answer.similarity > 0.9);
    }

    #[test]
    fn test_empty_query_is_validation_error() {
        let embedder = StubEmbedder { table: vec![] };
        let knowledge = two_paragraph_index();
        let retriever = AnswerRetriever::new(&embedder, &knowledge);

        assert!(matches!(retriever.answer(""), Err(QueryError::EmptyQuery)));
        assert!(matches!(
            retriever.answer("  \t\n"),
            Err(QueryError::EmptyQuery)
        ));
    }

    #[test]
    fn test_idempotent_for_same_query() {
        let query = "what does skill gap analysis do";
        let embedder = StubEmbedder {
            table: vec![(query, vec![0.1, 0.9, 0.0])],
        };
        let knowledge = two_paragraph_index();
        let retriever = AnswerRetriever::new(&embedder, &knowledge);

        let first = retriever.answer(query).unwrap();
        let second = retriever.answer(query).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text, "Skill gap analysis compares vocabularies.");
    }
}
