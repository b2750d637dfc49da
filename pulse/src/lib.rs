//! # Pulse - community digests with cost accounting
//!
//! Pulse turns a stream of collected community messages into ranked
//! relevance signals and cost-bounded AI-generated digests:
//!
//! - **Relevance scoring**: deterministic lexical heuristics per message
//! - **Aggregation**: batch statistics, category histograms, top keywords
//! - **Citations**: the highest-relevance messages kept as audit evidence
//! - **Cost gating**: a projected cost ceiling checked before any
//!   generation call
//! - **Orchestration**: fetch, gate, generate, assemble, persist
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pulse::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(
//!         MongoPersistenceClient::connect("mongodb://localhost:27017", "pulse").await?,
//!     );
//!     let completion = Arc::new(OpenAIClient::new(std::env::var("OPENAI_API_KEY")?)?);
//!
//!     let orchestrator = DigestOrchestrator::builder()
//!         .store(store.clone())
//!         .completion_client(completion)
//!         .max_cost_per_summary(5.0)
//!         .build()?;
//!
//!     let project = store
//!         .get_project_by_name("aurora")
//!         .await?
//!         .expect("project exists");
//!     let end = chrono::Utc::now();
//!     let start = end - chrono::Duration::days(7);
//!
//!     let summary = orchestrator.generate_summary(&project, start, end).await?;
//!     println!("{}", summary.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Pulse consists of several composable crates:
//!
//! - **pulse-persist**: record models and the store seam (MongoDB impl)
//! - **pulse-relevance**: scoring, aggregation and citation extraction
//! - **pulse-llm**: the text-completion seam (OpenAI over plain HTTP)
//! - **pulse-digest**: cost estimation and the digest orchestrator

pub use pulse_digest as digest;
pub use pulse_llm as llm;
pub use pulse_persist as persist;
pub use pulse_relevance as relevance;

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use pulse_digest::{
        CostEstimate, DigestConfig, DigestError, DigestOrchestrator, PricingModel,
    };
    pub use pulse_llm::{CompletionClient, CompletionRequest, OpenAIClient};
    pub use pulse_persist::{
        Message, MessageKind, MongoPersistenceClient, PersistenceClient, Project, Summary,
    };
    pub use pulse_relevance::{
        aggregate, extract_citations, score, score_batch, Citation, RelevanceCategory,
        RelevanceMetadata, RelevanceScore, HIGH_RELEVANCE_THRESHOLD,
    };
}
