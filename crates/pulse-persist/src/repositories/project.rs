use chrono::{Duration, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{bson, bson::doc, Client, Collection};

use crate::error::{PersistError, Result};
use crate::models::{Project, ProjectUpdate};

#[derive(Clone)]
pub struct ProjectRepository {
    collection: Collection<Project>,
}

impl ProjectRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("projects");
        Self { collection }
    }

    /// Create a project. Names are unique.
    pub async fn create_project(
        &self,
        name: &str,
        chat_group: &str,
        is_active: bool,
    ) -> Result<Project> {
        if self.get_project_by_name(name).await?.is_some() {
            return Err(PersistError::DuplicateProject(name.to_string()));
        }

        let now = Utc::now();
        let project = Project {
            id: ObjectId::new(),
            name: name.to_string(),
            chat_group: chat_group.to_string(),
            is_active,
            last_collected_message_id: None,
            next_collection_at: None,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&project).await?;
        tracing::info!(name, "Project created");
        Ok(project)
    }

    pub async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        let filter = doc! { "name": name };
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn get_all_projects(&self) -> Result<Vec<Project>> {
        let projects = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(projects)
    }

    pub async fn get_active_projects(&self) -> Result<Vec<Project>> {
        let filter = doc! { "is_active": true };
        let projects = self
            .collection
            .find(filter)
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(projects)
    }

    /// Apply a partial update and bump `updated_at`.
    pub async fn update_project(
        &self,
        project_id: ObjectId,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        let mut set = doc! { "updated_at": bson::DateTime::now() };
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(chat_group) = update.chat_group {
            set.insert("chat_group", chat_group);
        }
        if let Some(is_active) = update.is_active {
            set.insert("is_active", is_active);
        }

        let filter = doc! { "_id": project_id };
        self.collection
            .update_one(filter.clone(), doc! { "$set": set })
            .await?;
        Ok(self.collection.find_one(filter).await?)
    }

    /// Schedule the next collection run `interval_seconds` from now.
    pub async fn schedule_next_collection(
        &self,
        project_id: ObjectId,
        interval_seconds: i64,
    ) -> Result<Option<Project>> {
        let next = Utc::now() + Duration::seconds(interval_seconds);
        let filter = doc! { "_id": project_id };
        let update = doc! {
            "$set": {
                "next_collection_at": bson::to_bson(&next)?,
                "updated_at": bson::DateTime::now(),
            }
        };
        self.collection.update_one(filter.clone(), update).await?;

        let project = self.collection.find_one(filter).await?;
        if let Some(ref p) = project {
            tracing::info!(name = %p.name, next_collection_at = %next, "Next collection scheduled");
        }
        Ok(project)
    }
}
