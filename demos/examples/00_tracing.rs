use tracing_subscriber::fmt::format::FmtSpan;
use walletflow::{ChainId, Walletflow};
use walletflow_demos::common::{demo_address, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,walletflow=trace,walletflow_http=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Create provider (mock in CI when WALLETFLOW_DEMOS_USE_MOCK is set) and build the orchestrator
    let wf = Walletflow::builder().with_provider(get_provider()?).build()?;
    let address = demo_address();

    // Multi-chain fetch: one span per chain and per page
    let results = wf
        .fetch_all_chains(&[ChainId::ETHEREUM, ChainId::POLYGON], &address)
        .await?;
    for r in &results {
        tracing::info!(chain = %r.chain_id, records = r.items.len(), failed = r.error.is_some(), "chain done");
    }

    // Full pipeline
    let _ = wf.timeline(&[ChainId::ETHEREUM], &address, Vec::new()).await?;

    Ok(())
}
