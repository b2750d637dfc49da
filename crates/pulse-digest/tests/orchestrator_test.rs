//! Orchestrator behavior against in-memory fakes of both collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Duration, Utc};

use pulse_digest::{estimate, CostEstimate, DigestError, DigestOrchestrator, PricingModel};
use pulse_llm::{CompletionClient, CompletionRequest};
use pulse_persist::{
    Message, MessageKind, NewMessage, NewSummary, PersistenceClient, PersistError, Project,
    ProjectUpdate, Summary,
};
use pulse_relevance::{Citation, RelevanceMetadata};

type PersistResult<T> = std::result::Result<T, PersistError>;

struct FakeStore {
    messages: Vec<Message>,
    summaries: Mutex<Vec<Summary>>,
    fail_insert: bool,
}

impl FakeStore {
    fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            summaries: Mutex::new(Vec::new()),
            fail_insert: false,
        }
    }

    fn persisted(&self) -> Vec<Summary> {
        self.summaries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistenceClient for FakeStore {
    async fn create_project(
        &self,
        name: &str,
        chat_group: &str,
        is_active: bool,
    ) -> PersistResult<Project> {
        Ok(project_named(name, chat_group, is_active))
    }

    async fn get_project_by_name(&self, _name: &str) -> PersistResult<Option<Project>> {
        Ok(None)
    }

    async fn get_all_projects(&self) -> PersistResult<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn get_active_projects(&self) -> PersistResult<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn update_project(
        &self,
        _project_id: ObjectId,
        _update: ProjectUpdate,
    ) -> PersistResult<Option<Project>> {
        Ok(None)
    }

    async fn schedule_next_collection(
        &self,
        _project_id: ObjectId,
        _interval_seconds: i64,
    ) -> PersistResult<Option<Project>> {
        Ok(None)
    }

    async fn save_messages(&self, messages: Vec<NewMessage>) -> PersistResult<usize> {
        Ok(messages.len())
    }

    async fn fetch_messages(
        &self,
        _project_id: ObjectId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> PersistResult<Vec<Message>> {
        Ok(self.messages.clone())
    }

    async fn count_messages(
        &self,
        _project_id: ObjectId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> PersistResult<u64> {
        Ok(self.messages.len() as u64)
    }

    async fn last_platform_message_id(&self, _project_id: ObjectId) -> PersistResult<Option<i64>> {
        Ok(None)
    }

    async fn insert_summary(&self, summary: NewSummary) -> PersistResult<Summary> {
        if self.fail_insert {
            return Err(PersistError::Internal("insert rejected".to_string()));
        }
        let stored = Summary {
            id: ObjectId::new(),
            project_id: summary.project_id,
            content: summary.content,
            date_range_start: summary.date_range_start,
            date_range_end: summary.date_range_end,
            cost_estimate: summary.cost_estimate,
            actual_cost: summary.actual_cost,
            message_count: summary.message_count,
            summary_metadata: summary.summary_metadata,
            citations: summary.citations,
            high_relevance_count: summary.high_relevance_count,
            created_at: Utc::now(),
        };
        self.summaries.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_summaries(&self, _project_id: ObjectId) -> PersistResult<Vec<Summary>> {
        Ok(self.persisted())
    }
}

struct CountingCompletion {
    calls: AtomicUsize,
    response: Option<String>,
}

impl CountingCompletion {
    fn answering(response: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Some(response.to_string()),
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: None,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for CountingCompletion {
    async fn complete(&self, _request: CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(anyhow!("model unavailable")),
        }
    }
}

fn project_named(name: &str, chat_group: &str, is_active: bool) -> Project {
    let now = Utc::now();
    Project {
        id: ObjectId::new(),
        name: name.to_string(),
        chat_group: chat_group.to_string(),
        is_active,
        last_collected_message_id: None,
        next_collection_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn message(content: &str, author: Option<&str>) -> Message {
    Message {
        id: ObjectId::new(),
        project_id: ObjectId::new(),
        platform_message_id: 1,
        content: content.to_string(),
        author: author.map(|a| a.to_string()),
        timestamp: Utc::now(),
        kind: MessageKind::Text,
        collected_at: Utc::now(),
    }
}

fn window() -> (DateTime<Utc>, DateTime<Utc>) {
    let end = Utc::now();
    (end - Duration::days(7), end)
}

fn scenario_messages() -> Vec<Message> {
    vec![
        message("mainnet upgrade announce", Some("admin")),
        message("hi there!", None),
        message("moon lambo pump dump", None),
    ]
}

fn orchestrator(
    store: Arc<FakeStore>,
    completion: Arc<CountingCompletion>,
    max_cost: f64,
) -> DigestOrchestrator {
    DigestOrchestrator::builder()
        .store(store)
        .completion_client(completion)
        .max_cost_per_summary(max_cost)
        .build()
        .unwrap()
}

#[tokio::test]
async fn cost_gate_blocks_generation_without_invoking_collaborator() {
    let store = Arc::new(FakeStore::with_messages(scenario_messages()));
    let completion = Arc::new(CountingCompletion::answering("unused"));
    let orch = orchestrator(store.clone(), completion.clone(), 0.0001);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let err = orch.generate_summary(&project, start, end).await.unwrap_err();

    match err {
        DigestError::CostLimitExceeded { estimated, limit } => {
            assert!(estimated > limit);
        }
        other => panic!("expected CostLimitExceeded, got {other:?}"),
    }
    assert_eq!(completion.call_count(), 0);
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn empty_window_is_no_messages_found() {
    let store = Arc::new(FakeStore::with_messages(Vec::new()));
    let completion = Arc::new(CountingCompletion::answering("unused"));
    let orch = orchestrator(store.clone(), completion.clone(), 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let err = orch.generate_summary(&project, start, end).await.unwrap_err();

    assert!(matches!(err, DigestError::NoMessagesFound { .. }));
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn happy_path_persists_one_complete_summary() {
    let messages = scenario_messages();
    let expected = estimate(&messages, &PricingModel::default());

    let store = Arc::new(FakeStore::with_messages(messages));
    let completion = Arc::new(CountingCompletion::answering("## Key Announcements\n..."));
    let orch = orchestrator(store.clone(), completion.clone(), 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let summary = orch.generate_summary(&project, start, end).await.unwrap();

    assert_eq!(completion.call_count(), 1);
    assert_eq!(summary.content, "## Key Announcements\n...");
    assert_eq!(summary.project_id, project.id);
    assert_eq!(summary.message_count, 3);
    assert_eq!(summary.cost_estimate, expected.total_cost);
    assert!((summary.actual_cost - expected.total_cost * 1.1).abs() < 1e-12);
    assert_eq!(summary.high_relevance_count, 1);

    // Exactly one record, with both artifact blobs readable.
    let persisted = store.persisted();
    assert_eq!(persisted.len(), 1);

    let metadata: RelevanceMetadata =
        serde_json::from_str(persisted[0].summary_metadata.as_deref().unwrap()).unwrap();
    assert_eq!(metadata.total_messages, 3);
    assert!(metadata.categories.contains_key("announcement"));
    assert!(metadata.categories.contains_key("spam"));

    let citations: Vec<Citation> =
        serde_json::from_str(persisted[0].citations.as_deref().unwrap()).unwrap();
    assert_eq!(citations.len(), 1);
    assert!(citations[0].score >= 80.0);
}

#[tokio::test]
async fn generation_failure_persists_nothing() {
    let store = Arc::new(FakeStore::with_messages(scenario_messages()));
    let completion = Arc::new(CountingCompletion::failing());
    let orch = orchestrator(store.clone(), completion.clone(), 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let err = orch.generate_summary(&project, start, end).await.unwrap_err();

    assert!(matches!(err, DigestError::GenerationFailed(_)));
    assert_eq!(completion.call_count(), 1);
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn persist_failure_is_fatal() {
    let mut store = FakeStore::with_messages(scenario_messages());
    store.fail_insert = true;
    let store = Arc::new(store);
    let completion = Arc::new(CountingCompletion::answering("digest"));
    let orch = orchestrator(store.clone(), completion.clone(), 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let err = orch.generate_summary(&project, start, end).await.unwrap_err();

    assert!(matches!(err, DigestError::Persist(_)));
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn estimate_cost_of_empty_window_is_all_zero() {
    let store = Arc::new(FakeStore::with_messages(Vec::new()));
    let completion = Arc::new(CountingCompletion::answering("unused"));
    let orch = orchestrator(store, completion, 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let est = orch.estimate_cost(&project, start, end).await.unwrap();

    assert_eq!(est, CostEstimate::zero());
}

#[tokio::test]
async fn estimate_cost_matches_pure_estimator() {
    let messages = scenario_messages();
    let expected = estimate(&messages, &PricingModel::default());

    let store = Arc::new(FakeStore::with_messages(messages));
    let completion = Arc::new(CountingCompletion::answering("unused"));
    let orch = orchestrator(store, completion.clone(), 10.0);

    let (start, end) = window();
    let project = project_named("aurora", "@aurora", true);
    let est = orch.estimate_cost(&project, start, end).await.unwrap();

    assert_eq!(est, expected);
    assert_eq!(completion.call_count(), 0);
}
