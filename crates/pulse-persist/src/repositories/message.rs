use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{bson, bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::{Message, NewMessage};

#[derive(Clone)]
pub struct MessageRepository {
    collection: Collection<Message>,
}

impl MessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Insert a batch, skipping duplicates on (project_id, platform_message_id).
    /// Returns the number of messages actually inserted.
    pub async fn save_messages(&self, messages: Vec<NewMessage>) -> Result<usize> {
        if messages.is_empty() {
            return Ok(0);
        }

        let project_ids: Vec<ObjectId> = messages.iter().map(|m| m.project_id).collect();
        let platform_ids: Vec<i64> = messages.iter().map(|m| m.platform_message_id).collect();

        let filter = doc! {
            "project_id": { "$in": project_ids },
            "platform_message_id": { "$in": platform_ids }
        };
        let existing: Vec<Message> = self.collection.find(filter).await?.try_collect().await?;
        let seen: HashSet<(ObjectId, i64)> = existing
            .iter()
            .map(|m| (m.project_id, m.platform_message_id))
            .collect();

        let now = Utc::now();
        let fresh: Vec<Message> = messages
            .into_iter()
            .filter(|m| !seen.contains(&(m.project_id, m.platform_message_id)))
            .map(|m| Message {
                id: ObjectId::new(),
                project_id: m.project_id,
                platform_message_id: m.platform_message_id,
                content: m.content,
                author: m.author,
                timestamp: m.timestamp,
                kind: m.kind,
                collected_at: now,
            })
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        let inserted = fresh.len();
        self.collection.insert_many(&fresh).await?;
        tracing::info!(inserted, skipped = seen.len(), "Saved message batch");
        Ok(inserted)
    }

    /// Messages for a project within [start, end], newest first.
    pub async fn fetch_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Message>> {
        let filter = doc! {
            "project_id": project_id,
            "timestamp": {
                "$gte": bson::DateTime::from_millis(start.timestamp_millis()),
                "$lte": bson::DateTime::from_millis(end.timestamp_millis()),
            }
        };
        let messages = self
            .collection
            .find(filter)
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    /// Count of messages for a project within [start, end].
    pub async fn count_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let filter = doc! {
            "project_id": project_id,
            "timestamp": {
                "$gte": bson::DateTime::from_millis(start.timestamp_millis()),
                "$lte": bson::DateTime::from_millis(end.timestamp_millis()),
            }
        };
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Highest platform-native message id stored for a project.
    pub async fn last_platform_message_id(&self, project_id: ObjectId) -> Result<Option<i64>> {
        let filter = doc! { "project_id": project_id };
        let newest = self
            .collection
            .find_one(filter)
            .sort(doc! { "platform_message_id": -1 })
            .await?;
        Ok(newest.map(|m| m.platform_message_id))
    }
}
