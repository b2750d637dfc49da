mod commands;
mod config;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulse_digest::{DigestOrchestrator, PricingModel};
use pulse_llm::OpenAIClient;
use pulse_persist::MongoPersistenceClient;

use crate::commands::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);
    tracing::info!(database = %config.mongodb.database, "Starting pulse CLI");

    // Wire up the collaborators
    let store = Arc::new(
        MongoPersistenceClient::connect(&config.mongodb_uri, &config.mongodb.database).await?,
    );
    let completion = Arc::new(OpenAIClient::new(config.openai_api_key.clone())?);

    let orchestrator = DigestOrchestrator::builder()
        .store(store.clone())
        .completion_client(completion)
        .model(config.llm.model.clone())
        .max_cost_per_summary(config.llm.max_cost_per_summary)
        .pricing(PricingModel {
            input_cost_per_1k: config.llm.input_cost_per_1k,
            output_cost_per_1k: config.llm.output_cost_per_1k,
            ..PricingModel::default()
        })
        .build()?;

    commands::run(cli, store, orchestrator).await
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
