//! Job export: document store -> JSON hand-off file, and back for seeding

use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::database::Database;
use crate::errors::JobRagError;
use crate::errors::Result;
use crate::models::JobBreakdown;
use crate::models::JobPosting;

/// Outcome of an export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub total_jobs: usize,
    pub exported_at: DateTime<Utc>,
    pub breakdown: JobBreakdown,
}

/// Export up to `limit` active postings to `out_path` as a pretty-printed JSON array
pub async fn export_jobs(db: &Database, out_path: &Path, limit: i64) -> Result<ExportSummary> {
    info!("Exporting active jobs (limit: {}) to {:?}", limit, out_path);

    let jobs = db.list_active_jobs(limit).await?;
    info!("Found {} jobs to export", jobs.len());

    write_jobs_file(out_path, &jobs)?;
    info!("Exported {} jobs to {:?}", jobs.len(), out_path);

    Ok(ExportSummary {
        path: out_path.to_path_buf(),
        total_jobs: jobs.len(),
        exported_at: Utc::now(),
        breakdown: JobBreakdown::from_jobs(&jobs),
    })
}

/// Write postings as the export file format
pub fn write_jobs_file(path: &Path, jobs: &[JobPosting]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(jobs)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read an export file.
///
/// The top level must be a JSON array; entries that don't decode as a posting are
/// logged and skipped so one bad document doesn't sink the whole run.
pub fn load_jobs(path: &Path) -> Result<Vec<JobPosting>> {
    if !path.exists() {
        return Err(JobRagError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Jobs file {} not found", path.display()),
        )));
    }

    info!("Loading jobs from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    let mut jobs = Vec::with_capacity(raw.len());
    for (i, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<JobPosting>(value) {
            Ok(job) => jobs.push(job),
            Err(e) => warn!("Skipping job {} in {:?}: {}", i, path, e),
        }
    }

    debug!("Loaded {} jobs", jobs.len());
    Ok(jobs)
}

/// Insert every posting of a JSON file into the store, returning how many were inserted
pub async fn seed_jobs(db: &Database, path: &Path) -> Result<usize> {
    let jobs = load_jobs(path)?;
    if jobs.is_empty() {
        return Err(JobRagError::NoJobs(path.display().to_string()));
    }

    let mut inserted = 0;
    for job in &jobs {
        let id = db.insert_job(job).await?;
        debug!("Inserted job {} as id {}", job.title, id);
        inserted += 1;
    }

    info!("Seeded {} jobs from {:?}", inserted, path);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_load_keeps_string_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jobs.json");

        let job: JobPosting = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "title": "Rust Engineer",
            "company": "Ferrous Systems",
            "type": "Remote"
        }))
        .unwrap();

        write_jobs_file(&path, &[job.clone()]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"_id\": \"abc123\""));
        assert!(raw.contains('\n'), "export is pretty-printed");

        let loaded = load_jobs(&path).unwrap();
        assert_eq!(loaded, vec![job]);
    }

    #[test]
    fn test_load_skips_non_object_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(
            &path,
            r#"[{"_id": "1", "title": "Chef"}, 7, {"_id": "2", "salary": {"currency": null}}, {"_id": "3"}]"#,
        )
        .unwrap();

        let jobs = load_jobs(&path).unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        // Only the bare number is dropped; a null currency falls back to USD
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(jobs[1].salary.as_ref().unwrap().currency, "USD");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_jobs(Path::new("/no/such/jobs.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(&path, r#"{"jobs": []}"#).unwrap();

        assert!(matches!(
            load_jobs(&path),
            Err(JobRagError::Serialization(_))
        ));
    }
}
