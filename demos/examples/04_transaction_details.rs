use walletflow::{ChainId, Walletflow};
use walletflow_demos::common::{demo_address, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wf = Walletflow::builder().with_provider(get_provider()?).build()?;

    // Pick the most recent transaction on Ethereum and ask for its decoded view.
    let results = wf
        .fetch_all_chains(&[ChainId::ETHEREUM], &demo_address())
        .await?;
    let Some(hash) = results
        .first()
        .and_then(|r| r.items.first())
        .and_then(|tx| tx.tx_hash.clone())
    else {
        println!("No transactions found.");
        return Ok(());
    };

    println!("Fetching details for {hash}...");
    let details = wf.transaction_details(ChainId::ETHEREUM, &hash).await?;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

