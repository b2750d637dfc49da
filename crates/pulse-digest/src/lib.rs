pub mod builder;
pub mod cost;
pub mod error;
pub mod orchestrator;
pub mod templates;

pub use builder::DigestOrchestratorBuilder;
pub use cost::{estimate, CostEstimate, PricingModel};
pub use error::DigestError;
pub use orchestrator::{DigestConfig, DigestOrchestrator};
