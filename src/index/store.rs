//! On-disk format of the index file and its metadata sidecar
//!
//! Index file layout: 8-byte magic `JOBRAGIX`, then a bincode-encoded [`IndexFile`].
//! The sidecar is a pretty-printed JSON array of [`JobMetadata`] whose position `i`
//! describes index row `i`. The header records a SHA-256 of the sidecar bytes so a
//! mismatched pair is detected on load.

use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use bincode::Options;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use tracing::info;
use tracing::warn;

use super::flat::FlatIndex;
use crate::errors::JobRagError;
use crate::errors::Result;
use crate::models::JobMetadata;

const MAGIC: &[u8; 8] = b"JOBRAGIX";
pub const FORMAT_VERSION: u32 = 1;

/// Descriptive header stored ahead of the vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHeader {
    pub format_version: u32,
    /// Embedding model the vectors were produced with
    pub model: String,
    pub dimension: u64,
    pub rows: u64,
    /// Hex SHA-256 of the metadata sidecar written alongside
    pub metadata_sha256: String,
    /// Unix seconds
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    header: IndexHeader,
    vectors: Vec<f32>,
}

/// A loaded index together with its sidecar, ready to serve queries
#[derive(Debug, Clone)]
pub struct IndexBundle {
    pub header: IndexHeader,
    pub index: FlatIndex,
    pub metadata: Vec<JobMetadata>,
}

impl IndexBundle {
    /// Write the sidecar, then the index file carrying the sidecar's digest
    pub fn write(
        index: &FlatIndex,
        metadata: &[JobMetadata],
        model: &str,
        index_path: &Path,
        metadata_path: &Path,
    ) -> Result<IndexHeader> {
        if index.len() != metadata.len() {
            return Err(JobRagError::InvalidRequest(format!(
                "Index has {} rows but metadata has {} records",
                index.len(),
                metadata.len()
            )));
        }

        let metadata_json = serde_json::to_string_pretty(metadata)?;
        ensure_parent(metadata_path)?;
        std::fs::write(metadata_path, &metadata_json)?;

        let header = IndexHeader {
            format_version: FORMAT_VERSION,
            model: model.to_string(),
            dimension: index.dimension() as u64,
            rows: index.len() as u64,
            metadata_sha256: sha256_hex(metadata_json.as_bytes()),
            created_at: chrono::Utc::now().timestamp(),
        };

        ensure_parent(index_path)?;
        let mut writer = BufWriter::new(std::fs::File::create(index_path)?);
        writer.write_all(MAGIC)?;
        bincode::serialize_into(
            &mut writer,
            &IndexFile {
                header: header.clone(),
                vectors: index.as_raw().to_vec(),
            },
        )?;
        writer.flush()?;

        info!(
            "Saved index ({} rows, dim {}) to {:?} and metadata to {:?}",
            header.rows, header.dimension, index_path, metadata_path
        );
        Ok(header)
    }

    /// Load both files.
    ///
    /// A row-count or digest mismatch between the two is logged, not fatal: rows
    /// without a metadata record are dropped at query time.
    pub fn open(index_path: &Path, metadata_path: &Path) -> Result<Self> {
        let (header, index) = read_index(index_path)?;

        let metadata_bytes = std::fs::read(metadata_path)?;
        let metadata: Vec<JobMetadata> = serde_json::from_slice(&metadata_bytes)?;

        if index.len() != metadata.len() {
            warn!(
                "Index rows ({}) and metadata records ({}) differ; results past the shorter one are dropped",
                index.len(),
                metadata.len()
            );
        }
        if sha256_hex(&metadata_bytes) != header.metadata_sha256 {
            warn!(
                "Metadata file {:?} does not match the one the index was built with",
                metadata_path
            );
        }

        info!(
            "Vector index loaded from {:?} with {} vectors; {} metadata records",
            index_path,
            index.len(),
            metadata.len()
        );

        Ok(Self {
            header,
            index,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

/// Read and validate just the index file
pub fn read_index(path: &Path) -> Result<(IndexHeader, FlatIndex)> {
    let file = std::fs::File::open(path)?;
    let payload_len = file.metadata()?.len().saturating_sub(MAGIC.len() as u64);
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(JobRagError::InvalidRequest(format!(
            "{} is not a jobrag index file",
            path.display()
        )));
    }

    // Same encoding as `bincode::serialize_into`, bounded by the bytes actually on disk
    let file: IndexFile = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(payload_len)
        .deserialize_from(reader)?;
    if file.header.format_version != FORMAT_VERSION {
        return Err(JobRagError::InvalidRequest(format!(
            "Unsupported index format version {} (expected {})",
            file.header.format_version, FORMAT_VERSION
        )));
    }

    let index = FlatIndex::from_raw(file.header.dimension as usize, file.vectors)?;
    if index.len() as u64 != file.header.rows {
        return Err(JobRagError::InvalidRequest(format!(
            "Index header claims {} rows but holds {}",
            file.header.rows,
            index.len()
        )));
    }

    Ok((file.header, index))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str) -> JobMetadata {
        JobMetadata {
            id: id.to_string(),
            title: format!("Job {id}"),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            experience: "Mid-level".to_string(),
            category: "Technology".to_string(),
        }
    }

    fn small_index() -> FlatIndex {
        let mut index = FlatIndex::new(3);
        index
            .add_batch(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]])
            .unwrap();
        index
    }

    #[test]
    fn test_write_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("jobs.index");
        let metadata_path = dir.path().join("jobs_metadata.json");

        let header = IndexBundle::write(
            &small_index(),
            &[meta("a"), meta("b")],
            "all-minilm",
            &index_path,
            &metadata_path,
        )
        .unwrap();
        assert_eq!(header.rows, 2);
        assert_eq!(header.dimension, 3);

        let bundle = IndexBundle::open(&index_path, &metadata_path).unwrap();
        assert_eq!(bundle.header, header);
        assert_eq!(bundle.index, small_index());
        assert_eq!(bundle.metadata[1].id, "b");

        let sidecar = std::fs::read_to_string(&metadata_path).unwrap();
        assert!(sidecar.contains("\"type\": \"Full-time\""));
    }

    #[test]
    fn test_write_rejects_misaligned_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let result = IndexBundle::write(
            &small_index(),
            &[meta("a")],
            "all-minilm",
            &dir.path().join("i"),
            &dir.path().join("m"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_open_tolerates_edited_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("jobs.index");
        let metadata_path = dir.path().join("jobs_metadata.json");
        IndexBundle::write(
            &small_index(),
            &[meta("a"), meta("b")],
            "all-minilm",
            &index_path,
            &metadata_path,
        )
        .unwrap();

        std::fs::write(&metadata_path, serde_json::to_string(&[meta("a")]).unwrap()).unwrap();

        let bundle = IndexBundle::open(&index_path, &metadata_path).unwrap();
        assert_eq!(bundle.index.len(), 2);
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_oversized_length_prefix_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.index");

        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        // Model name claims a terabyte
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        bytes.extend_from_slice(b"all-minilm");
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            read_index(&path),
            Err(JobRagError::IndexEncoding(_))
        ));
    }

    #[test]
    fn test_rejects_foreign_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-an-index");
        std::fs::write(&path, b"FAISSIDXsomething").unwrap();

        let err = read_index(&path).unwrap_err();
        assert!(err.to_string().contains("not a jobrag index file"));
    }

    #[test]
    fn test_missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = IndexBundle::open(&dir.path().join("x.index"), &dir.path().join("x.json"));
        assert!(matches!(result, Err(JobRagError::Io(_))));
    }
}
