use super::Database;
use crate::Result;

impl Database {
    /// Check whether the `jobs` table exists
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = 'jobs'
            )
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS jobs (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                description TEXT NOT NULL,
                requirements TEXT[] NOT NULL DEFAULT '{}',
                skills TEXT[] NOT NULL DEFAULT '{}',
                location TEXT NOT NULL,
                job_type TEXT NOT NULL,
                experience TEXT NOT NULL,
                salary_min BIGINT,
                salary_max BIGINT,
                salary_currency TEXT NOT NULL DEFAULT 'USD',
                category TEXT NOT NULL,
                benefits TEXT[] NOT NULL DEFAULT '{}',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                posted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deadline TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Same access paths the job board filters on
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_jobs_location_category_type \
             ON jobs (location, category, job_type)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_jobs_active_posted \
             ON jobs (is_active, posted_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
