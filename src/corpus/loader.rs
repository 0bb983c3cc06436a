/// Startup-time corpus file loading.
///
/// All readers here run exactly once while building the engine context.
/// Any malformed or missing file is a fatal configuration error, surfaced
/// with enough context to point at the offending path.
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// One row of the jobs CSV. The file must carry `title` and `description`
/// header columns; extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub description: String,
}

/// Read the tabular job corpus.
pub fn load_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open jobs csv: {}", path.display()))?;

    let mut jobs = Vec::new();
    for record in reader.deserialize() {
        let job: JobRecord =
            record.with_context(|| format!("malformed row in {}", path.display()))?;
        jobs.push(job);
    }

    info!("Loaded {} job postings from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Read a precomputed embedding matrix.
///
/// The file is headerless row-major little-endian `f32`; its byte length
/// must be an exact multiple of `dimensions * 4`. Row count is validated
/// against the jobs corpus by the caller.
pub fn load_embedding_matrix(path: &Path, dimensions: usize) -> Result<Vec<Vec<f32>>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read embedding matrix: {}", path.display()))?;

    let row_bytes = dimensions * 4;
    anyhow::ensure!(row_bytes > 0, "dimensions must be positive");
    anyhow::ensure!(
        bytes.len() % row_bytes == 0,
        "embedding matrix {} has {} bytes, not a multiple of {} ({} f32 per row)",
        path.display(),
        bytes.len(),
        row_bytes,
        dimensions
    );

    let rows = bytes
        .chunks_exact(row_bytes)
        .map(|row| {
            row.chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        })
        .collect::<Vec<Vec<f32>>>();

    info!(
        "Loaded embedding matrix {} ({} rows × {} dims)",
        path.display(),
        rows.len(),
        dimensions
    );
    Ok(rows)
}

/// Write an embedding matrix in the format `load_embedding_matrix` reads.
///
/// Used by the offline `index` step that precomputes job embeddings.
pub fn write_embedding_matrix(path: &Path, rows: &[Vec<f32>]) -> Result<()> {
    let mut bytes = Vec::with_capacity(rows.iter().map(|r| r.len() * 4).sum());
    for row in rows {
        for v in row {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }

    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write embedding matrix: {}", path.display()))?;
    Ok(())
}

/// Read the knowledge-base text, split into paragraphs on blank lines.
pub fn load_paragraphs(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read knowledge base: {}", path.display()))?;

    let paragraphs: Vec<String> = content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    info!(
        "Loaded {} knowledge-base paragraphs from {}",
        paragraphs.len(),
        path.display()
    );
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_jobs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(
            &path,
            "title,description\nData Analyst,Requires SQL and Excel\nBackend Engineer,\"Rust, Postgres\"\n",
        )
        .unwrap();

        let jobs = load_jobs(&path).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Data Analyst");
        assert_eq!(jobs[1].description, "Rust, Postgres");
    }

    #[test]
    fn test_load_jobs_missing_file() {
        let result = load_jobs(Path::new("/nonexistent/jobs.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_matrix_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");
        let rows = vec![vec![0.1f32, -0.5, 2.0], vec![1.0, 0.0, -1.0]];

        write_embedding_matrix(&path, &rows).unwrap();
        let loaded = load_embedding_matrix(&path, 3).unwrap();

        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_matrix_rejects_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");
        // 10 bytes is not a multiple of 3 * 4
        fs::write(&path, [0u8; 10]).unwrap();

        assert!(load_embedding_matrix(&path, 3).is_err());
    }

    #[test]
    fn test_matrix_empty_file_is_zero_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");
        fs::write(&path, []).unwrap();

        let rows = load_embedding_matrix(&path, 4).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_load_paragraphs_blank_line_split() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.txt");
        fs::write(
            &path,
            "First paragraph\nstill first.\n\nSecond paragraph.\n\n\n\nThird.\n",
        )
        .unwrap();

        let paragraphs = load_paragraphs(&path).unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0], "First paragraph\nstill first.");
        assert_eq!(paragraphs[1], "Second paragraph.");
        assert_eq!(paragraphs[2], "Third.");
    }

    #[test]
    fn test_load_paragraphs_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.txt");
        fs::write(&path, "One.\r\n\r\nTwo.\r\n").unwrap();

        let paragraphs = load_paragraphs(&path).unwrap();
        assert_eq!(paragraphs, vec!["One.".to_string(), "Two.".to_string()]);
    }
}
