/// Resume-to-job ranking with skill-gap analysis.
use serde::Serialize;
use thiserror::Error;

use crate::corpus::CorpusIndex;
use crate::embedder::{Embedder, EmbedderError};
use crate::skills::SkillVocabulary;

/// Errors from a match request. `EmptyResume` is an input-validation
/// outcome for the caller to surface; embedding failures are unexpected and
/// propagate unchanged.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("resume text is empty")]
    EmptyResume,

    #[error(transparent)]
    Embedding(#[from] EmbedderError),
}

/// One job from the ranked result: similarity plus the skill gap relative
/// to the resume. Skill lists are sorted so output is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedJob {
    pub title: String,
    pub similarity: f32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Ranks the job corpus against resume text.
///
/// Pure per call: scoring never mutates the index or any shared state, so a
/// matcher can serve any number of requests over the same context.
pub struct ResumeMatcher<'a> {
    embedder: &'a dyn Embedder,
    jobs: &'a CorpusIndex,
    vocabulary: &'a SkillVocabulary,
    top_n: usize,
    min_similarity: f32,
}

impl<'a> ResumeMatcher<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        jobs: &'a CorpusIndex,
        vocabulary: &'a SkillVocabulary,
        top_n: usize,
        min_similarity: f32,
    ) -> Self {
        Self {
            embedder,
            jobs,
            vocabulary,
            top_n,
            min_similarity,
        }
    }

    /// Rank jobs against the resume text.
    ///
    /// Filtered display policy: of the `top_n` most similar jobs, only those
    /// clearing `min_similarity` AND sharing at least one skill with the
    /// resume are returned. An empty vector is the no-results signal, a
    /// normal outcome rather than an error.
    pub fn match_resume(&self, resume_text: &str) -> Result<Vec<RankedJob>, MatchError> {
        let resume = resume_text.trim();
        if resume.is_empty() {
            return Err(MatchError::EmptyResume);
        }

        let embedding = self.embedder.embed(resume)?;

        // The gate applies to the global top-N, so rank the whole corpus first
        let scored = self.jobs.score(&embedding);
        let user_skills = self.vocabulary.extract(resume);

        let mut ranked = Vec::new();
        for candidate in scored.iter().take(self.top_n) {
            if candidate.similarity < self.min_similarity {
                continue;
            }

            let job_skills = self.vocabulary.extract(&candidate.entry.text);

            let mut matched: Vec<String> =
                job_skills.intersection(&user_skills).cloned().collect();
            if matched.is_empty() {
                continue;
            }
            matched.sort();

            let mut missing: Vec<String> = job_skills.difference(&user_skills).cloned().collect();
            missing.sort();

            ranked.push(RankedJob {
                title: candidate.entry.id.clone(),
                similarity: candidate.similarity,
                matched_skills: matched,
                missing_skills: missing,
            });
        }

        Ok(ranked)
    }
}
