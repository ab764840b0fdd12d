use serde_json::json;
use walletflow_core::{ChainId, RawTokenTransfer, RawTransaction};

/// Wallet every fixture record touches.
pub const DEMO_WALLET: &str = "0x5e1f0c9b2a7d4e3f6a8b9c0d1e2f3a4b5c6d7e8f";
/// Counterparty that funds the demo wallet.
pub const FUNDER: &str = "0xa1b2c3d4e5f60718293a4b5c6d7e8f9012345678";
/// Counterparty the relayed funds end up at.
pub const EXCHANGE: &str = "0x28c6c06298d514db089934071355e5743bf21d60";
/// Plain payee.
pub const PAYEE: &str = "0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0";

const USDC_ETHEREUM: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
const USDC_POLYGON: &str = "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359";

/// Deterministic 32-byte hash for the `n`-th fixture record on `chain`.
#[must_use]
pub fn fixture_hash(chain: ChainId, n: u64) -> String {
    format!("0x{:016x}{:048x}", chain.get(), n)
}

/// Fixture records for `chain`, newest first like a provider listing.
pub fn records(chain: ChainId) -> Vec<RawTransaction> {
    match chain {
        ChainId::ETHEREUM => vec![
            usdc(
                fixture_hash(chain, 5),
                "2024-03-02T09:15:00Z",
                (DEMO_WALLET, PAYEE),
                USDC_ETHEREUM,
                "250000000",
                250.0,
            ),
            // relay hop: funder -> wallet -> exchange within 15 minutes
            native(
                fixture_hash(chain, 4),
                "2024-03-01T14:20:00Z",
                (DEMO_WALLET, EXCHANGE),
                "995000000000000000",
                Quote::Rate(3400.0),
            ),
            native(
                fixture_hash(chain, 3),
                "2024-03-01T14:05:00Z",
                (FUNDER, DEMO_WALLET),
                "1000000000000000000",
                Quote::Value(3400.0),
            ),
            native(
                fixture_hash(chain, 2),
                "2024-02-20T08:00:00Z",
                (FUNDER, DEMO_WALLET),
                "500000000000000000",
                Quote::Rate(2950.0),
            ),
            RawTransaction {
                tx_hash: Some(fixture_hash(chain, 1)),
                block_signed_at: Some("2024-02-10T17:42:00Z".to_string()),
                from_address: Some(DEMO_WALLET.to_string()),
                to_address: None,
                value: Some(json!("0")),
                ..RawTransaction::default()
            },
        ],
        ChainId::POLYGON => vec![
            usdc(
                fixture_hash(chain, 2),
                "2024-03-03T11:00:00Z",
                (EXCHANGE, DEMO_WALLET),
                USDC_POLYGON,
                "120000000",
                120.0,
            ),
            native(
                fixture_hash(chain, 1),
                "2024-02-28T19:30:00Z",
                (DEMO_WALLET, FUNDER),
                "40000000000000000000",
                Quote::Rate(0.95),
            ),
        ],
        ChainId::ARBITRUM => vec![native(
            fixture_hash(chain, 1),
            "2024-01-15T06:45:00Z",
            (FUNDER, DEMO_WALLET),
            "250000000000000000",
            Quote::Gas(2500.0),
        )],
        _ => Vec::new(),
    }
}

enum Quote {
    Value(f64),
    Rate(f64),
    Gas(f64),
}

fn native(
    hash: String,
    at: &str,
    (from, to): (&str, &str),
    wei: &str,
    quote: Quote,
) -> RawTransaction {
    let mut tx = RawTransaction {
        tx_hash: Some(hash),
        block_signed_at: Some(at.to_string()),
        from_address: Some(from.to_string()),
        to_address: Some(to.to_string()),
        value: Some(json!(wei)),
        ..RawTransaction::default()
    };
    match quote {
        Quote::Value(v) => tx.value_quote = Some(v),
        Quote::Rate(r) => tx.quote_rate = Some(r),
        Quote::Gas(r) => tx.gas_quote_rate = Some(r),
    }
    tx
}

fn usdc(
    hash: String,
    at: &str,
    (from, to): (&str, &str),
    contract: &str,
    raw: &str,
    usd: f64,
) -> RawTransaction {
    RawTransaction {
        tx_hash: Some(hash),
        block_signed_at: Some(at.to_string()),
        from_address: Some(from.to_string()),
        to_address: Some(to.to_string()),
        value: Some(json!("0")),
        value_quote: Some(usd),
        erc20_transfers: Some(vec![RawTokenTransfer {
            from_address: Some(from.to_string()),
            to_address: Some(to.to_string()),
            token_symbol: Some("USDC".to_string()),
            token_decimals: Some(6),
            token_address: Some(contract.to_string()),
            value: Some(json!(raw)),
            value_decimal: None,
        }]),
        ..RawTransaction::default()
    }
}
