use std::sync::Arc;

use pulse_llm::CompletionClient;
use pulse_persist::PersistenceClient;

use crate::cost::PricingModel;
use crate::error::{DigestError, Result};
use crate::orchestrator::{DigestConfig, DigestOrchestrator};

pub struct DigestOrchestratorBuilder {
    store: Option<Arc<dyn PersistenceClient>>,
    completion: Option<Arc<dyn CompletionClient>>,
    config: DigestConfig,
}

impl DigestOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            completion: None,
            config: DigestConfig::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn PersistenceClient>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn completion_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(client);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_cost_per_summary(mut self, limit: f64) -> Self {
        self.config.max_cost_per_summary = limit;
        self
    }

    pub fn pricing(mut self, pricing: PricingModel) -> Self {
        self.config.pricing = pricing;
        self
    }

    pub fn build(self) -> Result<DigestOrchestrator> {
        let store = self
            .store
            .ok_or_else(|| DigestError::Config("store is required".to_string()))?;
        let completion = self
            .completion
            .ok_or_else(|| DigestError::Config("completion client is required".to_string()))?;

        Ok(DigestOrchestrator::new(store, completion, self.config))
    }
}

impl Default for DigestOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
