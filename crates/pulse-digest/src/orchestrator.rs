use std::sync::Arc;

use chrono::{DateTime, Utc};

use pulse_llm::{CompletionClient, CompletionRequest};
use pulse_persist::{Message, NewSummary, PersistenceClient, Project, Summary};
use pulse_relevance::{aggregate, extract_citations, score_batch};

use crate::builder::DigestOrchestratorBuilder;
use crate::cost::{estimate, CostEstimate, PricingModel};
use crate::error::{DigestError, Result};
use crate::templates::DIGEST_SYSTEM_PROMPT;

/// Per-message cap on content fed into the prompt, to bound prompt size.
const MESSAGE_CONTENT_LIMIT: usize = 500;

/// Fixed margin applied to the projected cost; the completion seam does
/// not report exact token usage.
const ACTUAL_COST_MARGIN: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub model: String,
    pub max_cost_per_summary: f64,
    pub pricing: PricingModel,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_cost_per_summary: 10.0,
            pricing: PricingModel::default(),
        }
    }
}

/// Control-flow core of the pipeline.
///
/// One invocation walks Fetching -> CostChecking -> Generating ->
/// Assembling -> Persisted, exiting early on the first failure. Both
/// collaborators arrive by injection so tests can substitute fakes.
pub struct DigestOrchestrator {
    store: Arc<dyn PersistenceClient>,
    completion: Arc<dyn CompletionClient>,
    config: DigestConfig,
}

impl DigestOrchestrator {
    pub fn new(
        store: Arc<dyn PersistenceClient>,
        completion: Arc<dyn CompletionClient>,
        config: DigestConfig,
    ) -> Self {
        Self {
            store,
            completion,
            config,
        }
    }

    pub fn builder() -> DigestOrchestratorBuilder {
        DigestOrchestratorBuilder::new()
    }

    /// Project the cost of digesting a window without generating anything.
    /// An empty window projects to zero rather than erroring.
    pub async fn estimate_cost(
        &self,
        project: &Project,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<CostEstimate> {
        let messages = self.store.fetch_messages(project.id, start, end).await?;
        Ok(estimate(&messages, &self.config.pricing))
    }

    /// Generate and persist one digest for (project, window).
    ///
    /// The cost gate runs before the completion call; when it trips, the
    /// collaborator is never invoked and nothing is written. Any failure
    /// leaves no partial summary behind, since the single insert is the
    /// last step.
    pub async fn generate_summary(
        &self,
        project: &Project,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Summary> {
        // 1. Fetch the window
        let messages = self.store.fetch_messages(project.id, start, end).await?;
        if messages.is_empty() {
            return Err(DigestError::NoMessagesFound {
                project: project.name.clone(),
                start,
                end,
            });
        }
        tracing::debug!(project = %project.name, count = messages.len(), "Fetched message window");

        // 2. Cost gate, before any generation call
        let projected = estimate(&messages, &self.config.pricing);
        if projected.total_cost > self.config.max_cost_per_summary {
            return Err(DigestError::CostLimitExceeded {
                estimated: projected.total_cost,
                limit: self.config.max_cost_per_summary,
            });
        }

        // 3. Generate
        let user_prompt = build_user_prompt(&project.name, &messages);
        let request = CompletionRequest::new(
            self.config.model.clone(),
            DIGEST_SYSTEM_PROMPT,
            user_prompt,
        );
        let content = self
            .completion
            .complete(request)
            .await
            .map_err(DigestError::GenerationFailed)?;

        // 4. Assemble relevance artifacts
        let scores = score_batch(&messages);
        let metadata = aggregate(&messages, &scores)?;
        let citations = extract_citations(&content, &messages, &scores)?;
        let high_relevance_count = metadata.relevance_breakdown.high_relevance;
        let actual_cost = projected.total_cost * ACTUAL_COST_MARGIN;

        // 5. Persist everything in a single insert
        let summary = self
            .store
            .insert_summary(NewSummary {
                project_id: project.id,
                content,
                date_range_start: start,
                date_range_end: end,
                cost_estimate: projected.total_cost,
                actual_cost,
                message_count: messages.len() as i64,
                summary_metadata: Some(serde_json::to_string(&metadata)?),
                citations: Some(serde_json::to_string(&citations)?),
                high_relevance_count: high_relevance_count as i64,
            })
            .await?;

        tracing::info!(
            project = %project.name,
            messages = summary.message_count,
            high_relevance = summary.high_relevance_count,
            actual_cost = summary.actual_cost,
            "Summary generated"
        );
        Ok(summary)
    }
}

/// Render the message window into the user prompt, newest first as
/// fetched, one block per message.
fn build_user_prompt(project_name: &str, messages: &[Message]) -> String {
    format!(
        "Analyze the following community messages from {}:\n\n{}",
        project_name,
        format_messages(messages)
    )
}

fn format_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            let author = msg.author.as_deref().unwrap_or("Unknown");
            let timestamp = msg.timestamp.format("%Y-%m-%d %H:%M");
            let content: String = msg.content.chars().take(MESSAGE_CONTENT_LIMIT).collect();
            format!("[{}] {}: {}", timestamp, author, content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
