use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cvmatch::config::Config;
use cvmatch::context::EngineContext;
use cvmatch::corpus::loader;
use cvmatch::embedder::Embedder;
use cvmatch::embedder::download::download_model_files;
use cvmatch::embedder::onnx::OnnxEmbedder;
use cvmatch::matcher::MatchError;
use cvmatch::retriever::QueryError;

/// Display glue only: loads the engine context, passes plain text in, and
/// prints whatever structured result comes back as JSON.
#[derive(Parser)]
#[command(name = "cvmatch", version, about = "Semantic resume–job matching engine")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank jobs against resume text and report the skill gap per job
    Match {
        /// Read resume text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Answer a question from the local knowledge base
    Ask {
        /// The question text
        question: String,
    },

    /// Precompute the job-embedding matrix from the jobs CSV
    Index,

    /// Download model files and exit
    FetchModel,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::FetchModel => {
            download_model_files(Path::new(&config.model.dir))?;
        }

        Command::Index => {
            let embedder = load_embedder(&config)?;
            let jobs = loader::load_jobs(Path::new(&config.data.jobs_csv))?;
            anyhow::ensure!(!jobs.is_empty(), "jobs corpus is empty, nothing to index");

            let descriptions: Vec<&str> = jobs.iter().map(|j| j.description.as_str()).collect();
            let matrix = embedder
                .embed_batch(&descriptions)
                .context("failed to embed job descriptions")?;
            loader::write_embedding_matrix(Path::new(&config.data.job_embeddings), &matrix)?;

            info!(
                "Wrote {} job embeddings to {}",
                matrix.len(),
                config.data.job_embeddings
            );
        }

        Command::Match { file } => {
            let resume_text = read_input(file.as_deref())?;
            let ctx = load_context(config)?;

            match ctx.matcher().match_resume(&resume_text) {
                Ok(ranked) => {
                    if ranked.is_empty() {
                        info!("No job cleared the similarity and skill gate");
                    }
                    println!("{}", serde_json::to_string_pretty(&ranked)?);
                }
                Err(MatchError::EmptyResume) => {
                    anyhow::bail!("resume text is empty, nothing to analyze");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Ask { question } => {
            let ctx = load_context(config)?;

            match ctx.retriever().answer(&question) {
                Ok(answer) => println!("{}", serde_json::to_string_pretty(&answer)?),
                Err(QueryError::EmptyQuery) => {
                    anyhow::bail!("question is empty, nothing to answer");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn load_embedder(config: &Config) -> Result<Arc<OnnxEmbedder>> {
    let model_dir = Path::new(&config.model.dir);
    download_model_files(model_dir)?;
    let embedder = OnnxEmbedder::new(model_dir)
        .with_context(|| format!("failed to load model {}", config.model.name))?;
    Ok(Arc::new(embedder))
}

fn load_context(config: Config) -> Result<EngineContext> {
    let embedder = load_embedder(&config)?;
    EngineContext::load(config, embedder)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read resume text from stdin")?;
            Ok(buf)
        }
    }
}
