use std::sync::Arc;
use std::time::Duration;

use walletflow::{CollapseConfig, FlowError, Walletflow, WalletflowConfig};
use walletflow_mock::MockProvider;

#[test]
fn build_requires_a_provider() {
    let err = Walletflow::builder().build().err().expect("no provider");
    assert!(matches!(err, FlowError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_page_size() {
    let err = Walletflow::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .page_size(0)
        .build()
        .err()
        .expect("zero page size");
    assert!(matches!(err, FlowError::InvalidArg(_)));
}

#[test]
fn defaults_match_the_documented_values() {
    let wf = Walletflow::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .build()
        .unwrap();
    let cfg = wf.config();
    assert_eq!(cfg.concurrency, 2);
    assert_eq!(cfg.page_size, 100);
    assert_eq!(cfg.max_pages, None);
    assert_eq!(cfg.page_delay, Duration::from_millis(200));
    assert_eq!(cfg.provider_timeout, Some(Duration::from_secs(30)));
    assert!(cfg.collapse.enabled);
    assert_eq!(cfg.collapse.window, Duration::from_secs(3600));
    assert_eq!(wf.provider().name(), "walletflow-mock");
}

#[test]
fn modifiers_and_whole_config_compose() {
    let wf = Walletflow::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .config(WalletflowConfig {
            concurrency: 8,
            ..WalletflowConfig::default()
        })
        .page_size(25)
        .max_pages(Some(7))
        .provider_timeout(None)
        .collapse(CollapseConfig::new(Duration::from_secs(600), 0.05))
        .build()
        .unwrap();
    let cfg = wf.config();
    assert_eq!(cfg.concurrency, 8);
    assert_eq!(cfg.page_size, 25);
    assert_eq!(cfg.max_pages, Some(7));
    assert_eq!(cfg.provider_timeout, None);
    assert!((cfg.collapse.amount_tolerance - 0.05).abs() < f64::EPSILON);
}
