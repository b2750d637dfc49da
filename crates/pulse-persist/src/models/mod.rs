mod message;
mod project;
mod summary;

pub use message::{Message, MessageKind, NewMessage};
pub use project::{Project, ProjectUpdate};
pub use summary::{NewSummary, Summary};
