//! # cvmatch — Semantic Resume–Job Matching Engine
//!
//! Ranks a fixed corpus of job descriptions against free-text resume content
//! by sentence-embedding cosine similarity, reports matched/missing skills per
//! job, and answers free-text questions from a small local knowledge base.
//!
//! ## Architecture
//!
//! - **[`config`]** — Configuration loading, validation, and defaults
//! - **[`embedder`]** — Text embedding via ONNX Runtime (all-MiniLM-L6-v2)
//! - **[`corpus`]** — In-memory corpus index with cosine-similarity scoring
//! - **[`skills`]** — Skill vocabulary and substring-based skill extraction
//! - **[`matcher`]** — Resume-to-job ranking with skill-gap analysis
//! - **[`retriever`]** — Best-paragraph retrieval over the knowledge base
//! - **[`context`]** — One-shot startup loading into an immutable engine context

pub mod config;
pub mod context;
pub mod corpus;
pub mod embedder;
pub mod matcher;
pub mod retriever;
pub mod skills;
