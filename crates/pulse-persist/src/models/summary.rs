use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A generated digest for one project over one date window.
///
/// Written exactly once per successful orchestration run and never
/// mutated afterwards. The metadata and citations blobs are
/// JSON-serialized analysis artifacts kept for replay/audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub project_id: ObjectId,
    pub content: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_range_start: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_range_end: DateTime<Utc>,
    pub cost_estimate: f64,
    pub actual_cost: f64,
    pub message_count: i64,
    pub summary_metadata: Option<String>,
    pub citations: Option<String>,
    pub high_relevance_count: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Insertion form of [`Summary`]; the repository assigns the identifier
/// and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub project_id: ObjectId,
    pub content: String,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,
    pub cost_estimate: f64,
    pub actual_cost: f64,
    pub message_count: i64,
    pub summary_metadata: Option<String>,
    pub citations: Option<String>,
    pub high_relevance_count: i64,
}
