use super::Database;
use crate::models::JobPosting;
use crate::models::Salary;
use crate::Result;

/// Projection of a `jobs` row onto the exported fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub category: String,
    pub benefits: Vec<String>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        let salary = if row.salary_min.is_some() || row.salary_max.is_some() {
            Some(Salary {
                min: row.salary_min,
                max: row.salary_max,
                currency: row.salary_currency,
            })
        } else {
            None
        };

        Self {
            id: row.id.to_string(),
            title: row.title,
            company: row.company,
            description: row.description,
            requirements: row.requirements,
            skills: row.skills,
            location: row.location,
            job_type: row.job_type,
            experience: row.experience,
            salary,
            category: row.category,
            benefits: row.benefits,
        }
    }
}

impl Database {
    /// Active postings only, exported columns only, newest first
    pub async fn list_active_jobs(&self, limit: i64) -> Result<Vec<JobPosting>> {
        let rows = sqlx::query_as::<_, JobRow>(
            r"
            SELECT id, title, company, description, requirements, skills,
                   location, job_type, experience, salary_min, salary_max,
                   salary_currency, category, benefits
            FROM jobs
            WHERE is_active = TRUE
            ORDER BY posted_at DESC, id ASC
            LIMIT $1
            ",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    /// Insert a posting and return its new id. The posting's own `id` is ignored.
    pub async fn insert_job(&self, job: &JobPosting) -> Result<i64> {
        let (salary_min, salary_max, currency) = match &job.salary {
            Some(salary) => (salary.min, salary.max, salary.currency.clone()),
            None => (None, None, "USD".to_string()),
        };

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO jobs (
                title, company, description, requirements, skills, location,
                job_type, experience, salary_min, salary_max, salary_currency,
                category, benefits
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            ",
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.skills)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience)
        .bind(salary_min)
        .bind(salary_max)
        .bind(currency)
        .bind(&job.category)
        .bind(&job.benefits)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Count all postings and the active subset
    pub async fn count_jobs(&self) -> Result<(i64, i64)> {
        let (total, active) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM jobs",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((total, active))
    }

    /// Mark a posting inactive so it drops out of the next export
    pub async fn deactivate_job(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE jobs SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
