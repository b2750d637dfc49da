use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{Message, NewMessage, NewSummary, Project, ProjectUpdate, Summary};
use crate::repositories::{MessageRepository, ProjectRepository, SummaryRepository};
use crate::store::PersistenceClient;

/// MongoDB-backed implementation of [`PersistenceClient`], composed from
/// one repository per collection.
pub struct MongoPersistenceClient {
    project_repo: ProjectRepository,
    message_repo: MessageRepository,
    summary_repo: SummaryRepository,
}

impl MongoPersistenceClient {
    /// Connect to MongoDB and create the client.
    pub async fn connect(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            project_repo: ProjectRepository::new(&client, db_name),
            message_repo: MessageRepository::new(&client, db_name),
            summary_repo: SummaryRepository::new(&client, db_name),
        })
    }
}

#[async_trait]
impl PersistenceClient for MongoPersistenceClient {
    async fn create_project(
        &self,
        name: &str,
        chat_group: &str,
        is_active: bool,
    ) -> Result<Project> {
        self.project_repo
            .create_project(name, chat_group, is_active)
            .await
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        self.project_repo.get_project_by_name(name).await
    }

    async fn get_all_projects(&self) -> Result<Vec<Project>> {
        self.project_repo.get_all_projects().await
    }

    async fn get_active_projects(&self) -> Result<Vec<Project>> {
        self.project_repo.get_active_projects().await
    }

    async fn update_project(
        &self,
        project_id: ObjectId,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        self.project_repo.update_project(project_id, update).await
    }

    async fn schedule_next_collection(
        &self,
        project_id: ObjectId,
        interval_seconds: i64,
    ) -> Result<Option<Project>> {
        self.project_repo
            .schedule_next_collection(project_id, interval_seconds)
            .await
    }

    async fn save_messages(&self, messages: Vec<NewMessage>) -> Result<usize> {
        self.message_repo.save_messages(messages).await
    }

    async fn fetch_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Message>> {
        self.message_repo
            .fetch_messages(project_id, start, end)
            .await
    }

    async fn count_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        self.message_repo
            .count_messages(project_id, start, end)
            .await
    }

    async fn last_platform_message_id(&self, project_id: ObjectId) -> Result<Option<i64>> {
        self.message_repo.last_platform_message_id(project_id).await
    }

    async fn insert_summary(&self, summary: NewSummary) -> Result<Summary> {
        self.summary_repo.insert_summary(summary).await
    }

    async fn list_summaries(&self, project_id: ObjectId) -> Result<Vec<Summary>> {
        self.summary_repo.list_summaries(project_id).await
    }
}
