use walletflow::{DEFAULT_CHAINS, Walletflow};
use walletflow_demos::common::{demo_address, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create provider (mock in CI when WALLETFLOW_DEMOS_USE_MOCK is set).
    let provider = get_provider()?;

    // 2. Build the orchestrator: three chains at a time, 50 records per page.
    let wf = Walletflow::builder()
        .with_provider(provider)
        .concurrency(3)
        .page_size(50)
        .build()?;

    // 3. Fetch every default chain, normalize, merge and collapse relay hops.
    let chains: Vec<_> = DEFAULT_CHAINS.iter().map(|c| c.id).collect();
    let address = demo_address();
    println!("Building timeline for {address} on {} chains...", chains.len());
    let timeline = wf.timeline(&chains, &address, Vec::new()).await?;

    // 4. Print the result, newest first.
    println!("\n## Timeline ({} activities):", timeline.len());
    for a in &timeline {
        let amount = a
            .amount
            .map_or_else(|| "-".to_string(), |v| format!("{v:.6}"));
        let usd = a
            .amount_usd
            .map_or_else(|| "-".to_string(), |v| format!("${v:.2}"));
        let marker = if a.is_collapsed() { " (relay hop)" } else { "" };
        println!(
            " - {} [{}] {} {} {} -> {} {}{}",
            a.timestamp.format("%Y-%m-%d %H:%M"),
            a.chain_id,
            a.kind.as_str(),
            amount,
            a.from,
            a.to,
            usd,
            marker,
        );
    }

    Ok(())
}
