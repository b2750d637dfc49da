pub mod models;
pub mod repositories;
pub mod client;
pub mod error;
pub mod store;

pub use models::{
    Message, MessageKind, NewMessage, NewSummary, Project, ProjectUpdate, Summary,
};
pub use repositories::{MessageRepository, ProjectRepository, SummaryRepository};
pub use client::MongoPersistenceClient;
pub use error::PersistError;
pub use store::PersistenceClient;
