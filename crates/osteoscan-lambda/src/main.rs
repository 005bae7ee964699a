use tracing_subscriber::EnvFilter;

use osteoscan_bedrock::BedrockAnalysisModel;
use osteoscan_intake::IntakeService;
use osteoscan_lambda::config::{Settings, StoreKind};
use osteoscan_lambda::router;
use osteoscan_lambda::state::AppState;
use osteoscan_storage::{MemoryStore, S3Store, StoreBackend};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env()?;
    let aws = osteoscan_bedrock::client::load_config().await;

    let store = match settings.store {
        StoreKind::S3 => StoreBackend::S3(S3Store::new(
            osteoscan_storage::client::client_from_config(&aws),
            settings.bucket.clone(),
        )),
        StoreKind::Memory => StoreBackend::Memory(MemoryStore::new()),
    };
    let model = BedrockAnalysisModel::new(
        osteoscan_bedrock::client::build_client(&aws),
        settings.model_id.clone(),
    );

    tracing::info!(
        store = store.kind(),
        bucket = %settings.bucket,
        model = %settings.model_id,
        timeout_secs = settings.policy.analysis_timeout.as_secs(),
        confidence_floor = ?settings.policy.confidence_floor,
        "starting osteoscan api"
    );

    let state = AppState::new(IntakeService::new(model, store, settings.policy));
    let app = router(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
