use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;

use walletflow_core::{
    ChainId, Continuation, FlowError, PageRequest, RawPage, RawTransaction,
    TransactionDetailsProvider, TransactionProvider,
};

/// Instruction for how a call should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value after the configured latency.
    Return(T),
    /// Fail with the provided error after the configured latency.
    Fail(FlowError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

/// One recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCall {
    /// Requested chain.
    pub chain: ChainId,
    /// Requested address.
    pub address: String,
    /// Page parameters as received.
    pub request: PageRequest,
    /// When the call started (tokio clock, so paused-time tests see virtual time).
    pub at: Instant,
}

#[derive(Default)]
struct InternalState {
    page_rules: HashMap<(ChainId, u32), MockBehavior<RawPage>>,
    details_rules: HashMap<String, MockBehavior<Value>>,
    latency: HashMap<ChainId, Duration>,
    default_latency: Option<Duration>,
    calls: Vec<PageCall>,
}

/// State read from synchronous trait methods.
struct Gauges {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    page_size_cap: AtomicU32,
    default_max_pages: AtomicU32,
    not_ready: std::sync::Mutex<Option<FlowError>>,
}

impl Default for Gauges {
    fn default() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            page_size_cap: AtomicU32::new(0),
            default_max_pages: AtomicU32::new(3),
            not_ready: std::sync::Mutex::new(None),
        }
    }
}

/// Decrements the in-flight gauge when a call finishes or is cancelled.
struct InFlight<'a>(&'a Gauges);

impl<'a> InFlight<'a> {
    fn enter(g: &'a Gauges) -> Self {
        let now = g.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        g.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(g)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    gauges: Arc<Gauges>,
}

impl DynamicMockController {
    /// Set the behavior for one page (by zero-based index) of one chain.
    ///
    /// Pages without a configured behavior come back empty and final.
    pub async fn set_page_behavior(
        &self,
        chain: ChainId,
        page_number: u32,
        behavior: MockBehavior<RawPage>,
    ) {
        let mut guard = self.state.lock().await;
        guard.page_rules.insert((chain, page_number), behavior);
    }

    /// Script a chain as a sequence of offset pages; every page but the last
    /// carries a continuation.
    pub async fn set_pages(&self, chain: ChainId, pages: Vec<Vec<RawTransaction>>) {
        self.script(chain, pages, Continuation::Page).await;
    }

    /// Script a chain as a sequence of cursor pages (`c1`, `c2`, ...).
    pub async fn set_cursor_pages(&self, chain: ChainId, pages: Vec<Vec<RawTransaction>>) {
        self.script(chain, pages, |n| Continuation::Cursor(format!("c{n}")))
            .await;
    }

    async fn script(
        &self,
        chain: ChainId,
        pages: Vec<Vec<RawTransaction>>,
        next: impl Fn(u32) -> Continuation,
    ) {
        let count = pages.len();
        let mut guard = self.state.lock().await;
        for (idx, records) in pages.into_iter().enumerate() {
            let Ok(n) = u32::try_from(idx) else { break };
            let continuation = (idx + 1 < count).then(|| next(n + 1));
            guard.page_rules.insert(
                (chain, n),
                MockBehavior::Return(RawPage::new(records, continuation)),
            );
        }
    }

    /// Set the behavior for `transaction_details` calls for a specific hash.
    pub async fn set_details_behavior(&self, tx_hash: impl Into<String>, behavior: MockBehavior<Value>) {
        let mut guard = self.state.lock().await;
        guard.details_rules.insert(tx_hash.into(), behavior);
    }

    /// Delay every call by `latency` unless a chain-specific latency is set.
    pub async fn set_latency(&self, latency: Duration) {
        let mut guard = self.state.lock().await;
        guard.default_latency = Some(latency);
    }

    /// Delay calls for `chain` by `latency`.
    pub async fn set_chain_latency(&self, chain: ChainId, latency: Duration) {
        let mut guard = self.state.lock().await;
        guard.latency.insert(chain, latency);
    }

    /// Make `ensure_ready` fail with `err` (or succeed again with `None`).
    pub fn set_not_ready(&self, err: Option<FlowError>) {
        let mut slot = self
            .gauges
            .not_ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = err;
    }

    /// Clamp the page size the provider reports as effective (`0` disables).
    pub fn set_page_size_cap(&self, cap: u32) {
        self.gauges.page_size_cap.store(cap, Ordering::SeqCst);
    }

    /// Page ceiling the provider advertises as its default.
    pub fn set_default_max_pages(&self, pages: u32) {
        self.gauges.default_max_pages.store(pages, Ordering::SeqCst);
    }

    /// Return a copy of the page-request log.
    pub async fn calls(&self) -> Vec<PageCall> {
        let guard = self.state.lock().await;
        guard.calls.clone()
    }

    /// Page requests made for one chain, in order.
    pub async fn calls_for(&self, chain: ChainId) -> Vec<PageCall> {
        let guard = self.state.lock().await;
        guard
            .calls
            .iter()
            .filter(|c| c.chain == chain)
            .cloned()
            .collect()
    }

    /// Highest number of `fetch_page` calls observed running at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.gauges.max_in_flight.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
        self.gauges.max_in_flight.store(0, Ordering::SeqCst);
    }
}

/// A provider that defers all behavior to an external controller.
pub struct DynamicMockProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    gauges: Arc<Gauges>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TransactionProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let gauges = Arc::new(Gauges::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            gauges: Arc::clone(&gauges),
        };
        let me = Arc::new(Self {
            name,
            state,
            gauges,
        });
        (me as Arc<dyn TransactionProvider>, controller)
    }
}

async fn play<T>(behavior: MockBehavior<T>) -> Result<T, FlowError> {
    match behavior {
        MockBehavior::Return(v) => Ok(v),
        MockBehavior::Fail(e) => Err(e),
        MockBehavior::Hang => std::future::pending().await,
    }
}

#[async_trait]
impl TransactionProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn ensure_ready(&self) -> Result<(), FlowError> {
        let slot = self
            .gauges
            .not_ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.clone().map_or(Ok(()), Err)
    }

    fn effective_page_size(&self, requested: u32) -> u32 {
        match self.gauges.page_size_cap.load(Ordering::SeqCst) {
            0 => requested,
            cap => requested.min(cap),
        }
    }

    fn default_max_pages(&self) -> u32 {
        self.gauges.default_max_pages.load(Ordering::SeqCst)
    }

    async fn fetch_page(
        &self,
        chain: ChainId,
        address: &str,
        page: &PageRequest,
    ) -> Result<RawPage, FlowError> {
        let _in_flight = InFlight::enter(&self.gauges);
        // Snapshot behavior without holding the lock across await points
        let (behavior, latency) = {
            let mut guard = self.state.lock().await;
            guard.calls.push(PageCall {
                chain,
                address: address.to_string(),
                request: page.clone(),
                at: Instant::now(),
            });
            let latency = guard
                .latency
                .get(&chain)
                .copied()
                .or(guard.default_latency);
            (guard.page_rules.get(&(chain, page.page_number)).cloned(), latency)
        };
        if let Some(d) = latency {
            tokio::time::sleep(d).await;
        }
        play(behavior.unwrap_or(MockBehavior::Return(RawPage::empty()))).await
    }

    fn as_transaction_details_provider(&self) -> Option<&dyn TransactionDetailsProvider> {
        Some(self as &dyn TransactionDetailsProvider)
    }
}

#[async_trait]
impl TransactionDetailsProvider for DynamicMockProvider {
    async fn transaction_details(&self, _chain: ChainId, tx_hash: &str) -> Result<Value, FlowError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.details_rules.get(tx_hash).cloned()
        };
        match behavior {
            Some(b) => play(b).await,
            None => Err(FlowError::unsupported("transaction-details")),
        }
    }
}
