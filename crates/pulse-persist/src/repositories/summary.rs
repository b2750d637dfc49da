use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::{NewSummary, Summary};

#[derive(Clone)]
pub struct SummaryRepository {
    collection: Collection<Summary>,
}

impl SummaryRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("summaries");
        Self { collection }
    }

    /// Persist one digest record; assigns the identifier and creation
    /// timestamp. All fields land in a single insert so readers never
    /// observe a partially written summary.
    pub async fn insert_summary(&self, new: NewSummary) -> Result<Summary> {
        let summary = Summary {
            id: ObjectId::new(),
            project_id: new.project_id,
            content: new.content,
            date_range_start: new.date_range_start,
            date_range_end: new.date_range_end,
            cost_estimate: new.cost_estimate,
            actual_cost: new.actual_cost,
            message_count: new.message_count,
            summary_metadata: new.summary_metadata,
            citations: new.citations,
            high_relevance_count: new.high_relevance_count,
            created_at: Utc::now(),
        };

        self.collection.insert_one(&summary).await?;
        tracing::info!(project_id = %summary.project_id, "Summary created");
        Ok(summary)
    }

    /// Digests for a project, newest first.
    pub async fn list_summaries(&self, project_id: ObjectId) -> Result<Vec<Summary>> {
        let filter = doc! { "project_id": project_id };
        let summaries = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(summaries)
    }
}
