//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `jobrag` CLI

use std::path::Path;

use crate::export::ExportSummary;
use crate::index::BuildReport;
use crate::index::IndexHeader;
use crate::rag::RagResponse;
use crate::AppConfig;
use crate::Result;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// # Arguments
/// * `s` - The string to truncate
/// * `max_chars` - Maximum number of characters (not bytes)
///
/// # Returns
/// Truncated string with "..." suffix if truncated, otherwise the original string
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

pub fn print_export_summary(summary: &ExportSummary) {
    print_success(&format!(
        "Exported {} jobs to {}",
        summary.total_jobs,
        summary.path.display()
    ));
    println!("Exported at: {}", summary.exported_at.to_rfc3339());

    println!("\nJobs by category:");
    for (category, count) in &summary.breakdown.categories {
        println!("  {category:<30} {count:>6}");
    }
    println!("\nJobs by type:");
    for (job_type, count) in &summary.breakdown.types {
        println!("  {job_type:<30} {count:>6}");
    }
}

pub fn print_build_report(report: &BuildReport) {
    print_success(&format!(
        "Indexed {} of {} jobs in {:.1}s",
        report.jobs_indexed,
        report.jobs_loaded,
        report.elapsed.as_secs_f64()
    ));
    if report.jobs_skipped > 0 {
        print_warning(&format!("Skipped {} jobs (see log)", report.jobs_skipped));
    }
    println!("Model:     {} ({} dims)", report.model, report.dimension);
    println!("Index:     {}", report.index_path.display());
    println!("Metadata:  {}", report.metadata_path.display());
}

pub fn print_rag_response(response: &RagResponse) {
    println!("\n{}\n", response.answer);
    println!(
        "Top {} jobs (answer by {}):",
        response.jobs.len(),
        response.llm_provider
    );
    println!("{}", "-".repeat(80));
    for (idx, scored) in response.jobs.iter().enumerate() {
        let job = &scored.job;
        println!(
            "{:>2}. [{:.3}] {} at {}",
            idx + 1,
            scored.score,
            truncate_str(&job.title, 40),
            truncate_str(&job.company, 24)
        );
        println!("      {} | {} | {}", job.location, job.job_type, job.experience);
    }
}

pub fn print_index_header(path: &Path, header: &IndexHeader) {
    println!("Index:           {}", path.display());
    println!("Format version:  {}", header.format_version);
    println!("Model:           {}", header.model);
    println!("Dimension:       {}", header.dimension);
    println!("Vectors:         {}", header.rows);
    println!("Metadata digest: {}", truncate_str(&header.metadata_sha256, 16));
    println!("Created at:      {}", header.created_at);
}

/// Print the configuration as TOML with secrets masked
pub fn print_config(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| crate::JobRagError::ConfigError(e.to_string()))?;
    println!("Current configuration:\n");
    println!("{rendered}");
    Ok(())
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_counts_chars() {
        assert_eq!(truncate_str("Café Barista", 4), "Café...");
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn test_config_renders_without_secrets() {
        let mut config = AppConfig::default();
        config.llm.gemini.api_key = Some("top-secret".to_string());
        let rendered = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("[llm.gemini]"));
    }
}
