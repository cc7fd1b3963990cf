//! Job posting records as they flow between the store, the export file and the index sidecar

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// A job posting as exported from the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobPostingRecord")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub salary: Option<Salary>,
    pub category: String,
    pub benefits: Vec<String>,
}

/// Wire shape accepted on input. `_id` wins; a plain `id` is only used when `_id` is absent.
#[derive(Deserialize)]
struct JobPostingRecord {
    #[serde(rename = "_id", default, deserialize_with = "de_id")]
    object_id: String,
    #[serde(rename = "id", default, deserialize_with = "de_id")]
    plain_id: String,
    #[serde(default, deserialize_with = "de_text")]
    title: String,
    #[serde(default, deserialize_with = "de_text")]
    company: String,
    #[serde(default, deserialize_with = "de_text")]
    description: String,
    #[serde(default, deserialize_with = "de_text_list")]
    requirements: Vec<String>,
    #[serde(default, deserialize_with = "de_text_list")]
    skills: Vec<String>,
    #[serde(default, deserialize_with = "de_text")]
    location: String,
    #[serde(rename = "type", default, deserialize_with = "de_text")]
    job_type: String,
    #[serde(default, deserialize_with = "de_text")]
    experience: String,
    #[serde(default, deserialize_with = "de_salary")]
    salary: Option<Salary>,
    #[serde(default, deserialize_with = "de_text")]
    category: String,
    #[serde(default, deserialize_with = "de_text_list")]
    benefits: Vec<String>,
}

impl From<JobPostingRecord> for JobPosting {
    fn from(record: JobPostingRecord) -> Self {
        let id = if record.object_id.is_empty() {
            record.plain_id
        } else {
            record.object_id
        };
        Self {
            id,
            title: record.title,
            company: record.company,
            description: record.description,
            requirements: record.requirements,
            skills: record.skills,
            location: record.location,
            job_type: record.job_type,
            experience: record.experience,
            salary: record.salary,
            category: record.category,
            benefits: record.benefits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    #[serde(default, deserialize_with = "de_amount")]
    pub min: Option<i64>,
    #[serde(default, deserialize_with = "de_amount")]
    pub max: Option<i64>,
    #[serde(default = "default_currency", deserialize_with = "de_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Sidecar record stored at the same position as the posting's index row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub category: String,
}

impl JobPosting {
    /// Project the posting to its index sidecar record
    #[must_use]
    pub fn to_metadata(&self) -> JobMetadata {
        JobMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            experience: self.experience.clone(),
            category: self.category.clone(),
        }
    }

    /// Render the text that gets embedded for this posting.
    ///
    /// One `Label: value` line per non-empty field; list fields are space-joined.
    #[must_use]
    pub fn to_embedding_text(&self) -> String {
        let mut parts = Vec::new();

        let scalars = [
            ("Job Title", &self.title),
            ("Company", &self.company),
            ("Location", &self.location),
            ("Type", &self.job_type),
            ("Experience", &self.experience),
            ("Category", &self.category),
            ("Description", &self.description),
        ];
        for (label, value) in scalars {
            if !value.is_empty() {
                parts.push(format!("{label}: {value}"));
            }
        }

        let lists = [
            ("Requirements", &self.requirements),
            ("Skills", &self.skills),
            ("Benefits", &self.benefits),
        ];
        for (label, values) in lists {
            if !values.is_empty() {
                parts.push(format!("{label}: {}", values.join(" ")));
            }
        }

        if let Some(range) = self.salary.as_ref().and_then(Salary::range_text) {
            parts.push(format!("Salary Range: {range}"));
        }

        parts.join("\n")
    }
}

impl Salary {
    /// `$120,000 to 180,000`, only when both bounds are present and non-zero
    #[must_use]
    pub fn range_text(&self) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min != 0 && max != 0 => Some(format!(
                "${} to {}",
                format_thousands(min),
                format_thousands(max)
            )),
            _ => None,
        }
    }
}

/// Format an integer with comma thousands separators
#[must_use]
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Counts per category and per type of an exported job set
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobBreakdown {
    pub categories: std::collections::BTreeMap<String, usize>,
    pub types: std::collections::BTreeMap<String, usize>,
}

impl JobBreakdown {
    #[must_use]
    pub fn from_jobs(jobs: &[JobPosting]) -> Self {
        let mut breakdown = Self::default();
        for job in jobs {
            *breakdown
                .categories
                .entry(label_or_unknown(&job.category))
                .or_insert(0) += 1;
            *breakdown
                .types
                .entry(label_or_unknown(&job.job_type))
                .or_insert(0) += 1;
        }
        breakdown
    }
}

fn label_or_unknown(value: &str) -> String {
    if value.is_empty() {
        "Unknown".to_string()
    } else {
        value.to_string()
    }
}

// Lenient field decoders: export files come from a schemaless store, so nulls and
// numeric ids show up where strings are expected.

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        // Extended-JSON ObjectId: {"$oid": "..."}
        serde_json::Value::Object(map) => match map.get("$oid") {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => serde_json::Value::Object(map).to_string(),
        },
        other => other.to_string(),
    })
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn de_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        // Anything that isn't a list is ignored
        _ => Vec::new(),
    })
}

fn de_salary<'de, D>(deserializer: D) -> Result<Option<Salary>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    // A salary that still fails to decode is dropped, not the whole posting
    Ok(match value {
        Some(object @ serde_json::Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

fn de_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let currency = de_text(deserializer)?;
    Ok(if currency.trim().is_empty() {
        default_currency()
    } else {
        currency
    })
}

fn de_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    })
}
