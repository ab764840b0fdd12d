use walletflow::{ChainId, Walletflow, import_tabular};
use walletflow_demos::common::{demo_address, get_provider};

// A trimmed block-explorer export; the first row duplicates a provider record.
const EXPORT: &str = "\
\"Transaction Hash\",\"Blockno\",\"UnixTimestamp\",\"DateTime (UTC)\",\"From\",\"To\",\"Value_IN(ETH)\",\"Value_OUT(ETH)\",\"CurrentValue @ $3400/Eth\",\"Method\"
\"0x0000000000000001000000000000000000000000000000000000000000000003\",\"19350001\",\"1709301900\",\"2024-03-01 14:05:00\",\"0xa1b2c3d4e5f60718293a4b5c6d7e8f9012345678\",\"0x5e1f0c9b2a7d4e3f6a8b9c0d1e2f3a4b5c6d7e8f\",\"1\",\"0\",\"$3,400.00\",\"Transfer\"
\"0x00000000000000010000000000000000000000000000000000000000000000ff\",\"19100000\",\"1706400000\",\"2024-01-28 00:00:00\",\"0x5e1f0c9b2a7d4e3f6a8b9c0d1e2f3a4b5c6d7e8f\",\"0x7a250d5630b4cf539739df2c5dacb4c659f2488d\",\"0\",\"0.25\",\"$850.00\",\"Swap Exact ETH For Tokens\"
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wf = Walletflow::builder().with_provider(get_provider()?).build()?;

    // 1. Import the export; malformed rows would be skipped, never fatal.
    let file = import_tabular(EXPORT, ChainId::ETHEREUM);
    println!("Imported {} rows from the export", file.len());

    // 2. Merge with provider data: duplicates by hash keep the record with the higher USD value.
    let timeline = wf
        .timeline(&[ChainId::ETHEREUM], &demo_address(), file)
        .await?;

    println!("\n## Merged timeline ({} activities):", timeline.len());
    for a in &timeline {
        let source = if a.id.starts_with("csv:") { "file" } else { "api" };
        println!(
            " - {} {:<8} {:<4} usd={:?} id={}",
            a.timestamp.format("%Y-%m-%d"),
            a.kind.as_str(),
            source,
            a.amount_usd,
            a.id,
        );
    }
    Ok(())
}
