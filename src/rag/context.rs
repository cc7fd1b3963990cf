//! Context assembly from retrieved jobs

use crate::rag::ScoredJob;

/// Only the best few hits go into the prompt
pub const MAX_CONTEXT_JOBS: usize = 3;

const CONTEXT_HEADER: &str = "\n\nHere are some relevant job postings:\n";
const NO_JOBS: &str = "\n\nNo relevant job postings found.";

/// Render the jobs block of the user prompt
#[must_use]
pub fn build_jobs_context(jobs: &[ScoredJob]) -> String {
    if jobs.is_empty() {
        return NO_JOBS.to_string();
    }

    let mut context = CONTEXT_HEADER.to_string();
    for (idx, scored) in jobs.iter().take(MAX_CONTEXT_JOBS).enumerate() {
        let job = &scored.job;
        context.push_str(&format!(
            "{}. {} at {}\n Location: {}\n Experience: {}\n Type: {}\n\n",
            idx + 1,
            or_na(&job.title),
            or_na(&job.company),
            or_na(&job.location),
            or_na(&job.experience),
            or_na(&job.job_type),
        ));
    }
    context
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
