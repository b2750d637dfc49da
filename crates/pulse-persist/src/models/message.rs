use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A message collected from the chat platform.
///
/// Immutable once stored; duplicates are rejected on
/// (project_id, platform_message_id) at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub project_id: ObjectId,
    pub platform_message_id: i64,
    pub content: String,
    pub author: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub collected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Link,
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Text
    }
}

/// Insertion form of [`Message`]; the repository assigns the identifier
/// and the collected-at timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub project_id: ObjectId,
    pub platform_message_id: i64,
    pub content: String,
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}
