/// One-shot startup loading into an immutable engine context.
///
/// Everything expensive (model, corpora, precomputed embeddings) is loaded
/// exactly once here. The resulting context is read-only for the life of the
/// process; matchers and retrievers borrow from it per request.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::corpus::{CorpusEntry, CorpusIndex, loader};
use crate::embedder::Embedder;
use crate::matcher::ResumeMatcher;
use crate::retriever::AnswerRetriever;
use crate::skills::SkillVocabulary;

/// Immutable process-wide state: config, embedder, both corpus indices, and
/// the skill vocabulary.
pub struct EngineContext {
    pub config: Config,
    pub embedder: Arc<dyn Embedder>,
    pub jobs: CorpusIndex,
    pub knowledge: CorpusIndex,
    pub vocabulary: SkillVocabulary,
}

impl EngineContext {
    /// Load all startup resources and cross-validate them.
    ///
    /// Fatal on any misconfiguration: missing files, a job/embedding
    /// row-count mismatch, wrong dimensionality, or an empty corpus. The
    /// knowledge base is embedded here with the live embedder; job
    /// embeddings come precomputed from disk (see the `index` command).
    pub fn load(config: Config, embedder: Arc<dyn Embedder>) -> Result<Self> {
        config.validate()?;
        let dimensions = embedder.dimensions();

        // Jobs corpus + precomputed embedding matrix
        let jobs = loader::load_jobs(Path::new(&config.data.jobs_csv))?;
        let matrix =
            loader::load_embedding_matrix(Path::new(&config.data.job_embeddings), dimensions)?;
        anyhow::ensure!(
            matrix.len() == jobs.len(),
            "embedding matrix has {} rows but jobs corpus has {}; re-run `cvmatch index`",
            matrix.len(),
            jobs.len()
        );

        let job_entries: Vec<CorpusEntry> = jobs
            .into_iter()
            .zip(matrix)
            .map(|(job, embedding)| CorpusEntry {
                id: job.title,
                text: job.description,
                embedding,
            })
            .collect();
        let jobs = CorpusIndex::new(job_entries, dimensions).context("jobs corpus")?;

        // Knowledge base: embed paragraphs with the live model
        let paragraphs = loader::load_paragraphs(Path::new(&config.data.knowledge_base))?;
        let texts: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        let kb_embeddings = embedder
            .embed_batch(&texts)
            .context("failed to embed knowledge-base paragraphs")?;

        let kb_entries: Vec<CorpusEntry> = paragraphs
            .into_iter()
            .zip(kb_embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| CorpusEntry {
                id: i.to_string(),
                text,
                embedding,
            })
            .collect();
        let knowledge = CorpusIndex::new(kb_entries, dimensions).context("knowledge base")?;

        let vocabulary = SkillVocabulary::load(Path::new(&config.data.skills_file))?;

        info!(
            "Engine ready: {} jobs, {} knowledge paragraphs, {} skill terms",
            jobs.len(),
            knowledge.len(),
            vocabulary.len()
        );

        Ok(Self {
            config,
            embedder,
            jobs,
            knowledge,
            vocabulary,
        })
    }

    /// A matcher borrowing this context, configured from `matching.*`.
    #[must_use]
    pub fn matcher(&self) -> ResumeMatcher<'_> {
        ResumeMatcher::new(
            self.embedder.as_ref(),
            &self.jobs,
            &self.vocabulary,
            self.config.matching.top_n,
            self.config.matching.min_similarity,
        )
    }

    /// A retriever borrowing this context.
    #[must_use]
    pub fn retriever(&self) -> AnswerRetriever<'_> {
        AnswerRetriever::new(self.embedder.as_ref(), &self.knowledge)
    }
}
