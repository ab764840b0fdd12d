use walletflow::{ActivityFilter, ActivityType, DEFAULT_CHAINS, Walletflow, top_funders};
use walletflow_demos::common::{demo_address, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wf = Walletflow::builder().with_provider(get_provider()?).build()?;
    let address = demo_address();
    let chains: Vec<_> = DEFAULT_CHAINS.iter().map(|c| c.id).collect();
    let timeline = wf.timeline(&chains, &address, Vec::new()).await?;

    // Keep priced transfers worth at least $100.
    let filter = ActivityFilter::new()
        .types([ActivityType::Transfer])
        .min_usd(100.0);
    let priced = filter.apply(timeline);
    println!("{} transfers of $100 or more", priced.len());

    println!("\n## Top funders of {address}:");
    for f in top_funders(&priced, &address, 5) {
        println!(" - {} sent ${:.2} over {} transfers", f.address, f.usd, f.count);
    }
    Ok(())
}
