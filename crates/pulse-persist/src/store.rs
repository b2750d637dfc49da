use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::error::Result;
use crate::models::{Message, NewMessage, NewSummary, Project, ProjectUpdate, Summary};

/// Store seam consumed by the digest pipeline and the CLI.
///
/// Implementations provide CRUD over the three record types; the
/// orchestrator only ever receives this trait, never a concrete store,
/// so tests can substitute in-memory fakes.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Create a project. Fails with `DuplicateProject` if the name is taken.
    async fn create_project(
        &self,
        name: &str,
        chat_group: &str,
        is_active: bool,
    ) -> Result<Project>;

    /// Look a project up by its unique name.
    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>>;

    /// All projects, active or not.
    async fn get_all_projects(&self) -> Result<Vec<Project>>;

    /// Active projects only.
    async fn get_active_projects(&self) -> Result<Vec<Project>>;

    /// Apply a partial update; returns `None` if the project does not exist.
    async fn update_project(
        &self,
        project_id: ObjectId,
        update: ProjectUpdate,
    ) -> Result<Option<Project>>;

    /// Schedule the next collection run for a project.
    async fn schedule_next_collection(
        &self,
        project_id: ObjectId,
        interval_seconds: i64,
    ) -> Result<Option<Project>>;

    /// Insert a batch of collected messages, skipping any whose
    /// (project, platform id) pair is already stored. Returns the number
    /// actually inserted.
    async fn save_messages(&self, messages: Vec<NewMessage>) -> Result<usize>;

    /// Messages for a project within [start, end], newest first.
    async fn fetch_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Message>>;

    /// Count of messages for a project within [start, end].
    async fn count_messages(
        &self,
        project_id: ObjectId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64>;

    /// Highest platform-native message id stored for a project, for
    /// collector resume.
    async fn last_platform_message_id(&self, project_id: ObjectId) -> Result<Option<i64>>;

    /// Persist one generated digest; assigns id and creation timestamp.
    async fn insert_summary(&self, summary: NewSummary) -> Result<Summary>;

    /// Digests for a project, newest first.
    async fn list_summaries(&self, project_id: ObjectId) -> Result<Vec<Summary>>;
}
