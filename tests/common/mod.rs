//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use blogdash::app::{App, Services};
use blogdash::config::ApiConfig;
use blogdash::fetch::{FetchError, Transport, TransportResponse};
use blogdash::session::{ContextProvider, StatRoller, Theme, ThemeSink};
use blogdash::storage::{DurableStore, MemoryStore, StoreError};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub const API_BASE: &str = "http://api.test";

pub fn api() -> ApiConfig {
    ApiConfig {
        base_url: API_BASE.to_string(),
    }
}

pub fn url(path: &str) -> String {
    api().url(path)
}

/// Let spawned and aborted tasks run to their next suspension point.
pub async fn drain() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

pub fn json(status: u16, body: &str) -> TransportResponse {
    TransportResponse::new(status, body.as_bytes().to_vec())
}

/// Transport whose requests stay pending until the test releases them.
///
/// Each GET parks a oneshot sender under its URL; [`GatedTransport::release`]
/// answers the oldest parked request for that URL.
#[derive(Default)]
pub struct GatedTransport {
    parked: Mutex<HashMap<String, VecDeque<oneshot::Sender<TransportResponse>>>>,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer the oldest parked request for `url`.
    ///
    /// Returns false when nothing is parked or the requester is gone.
    pub fn release(&self, url: &str, resp: TransportResponse) -> bool {
        let sender = self
            .parked
            .lock()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());
        match sender {
            Some(sender) => sender.send(resp).is_ok(),
            None => false,
        }
    }

    /// Wait until a request for `url` is parked.
    pub async fn wait_for_request(&self, url: &str) {
        let parked = async {
            loop {
                if self
                    .parked
                    .lock()
                    .get(url)
                    .is_some_and(|queue| !queue.is_empty())
                {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), parked)
            .await
            .unwrap_or_else(|_| panic!("no request for {} arrived", url));
    }

    /// Total GETs issued.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.parked
            .lock()
            .entry(url.to_string())
            .or_default()
            .push_back(tx);
        self.calls.fetch_add(1, Ordering::SeqCst);
        rx.await.map_err(|_| FetchError::Transport {
            url: url.to_string(),
            message: "gate closed".to_string(),
        })
    }
}

/// Transport answering immediately from a fixed table; unknown URLs get 404.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, TransportResponse>>,
    requested: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mount(&self, path: &str, resp: TransportResponse) {
        self.routes.lock().insert(url(path), resp);
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        self.requested.lock().push(url.to_string());
        Ok(self
            .routes
            .lock()
            .get(url)
            .cloned()
            .unwrap_or_else(|| json(404, "{}")))
    }
}

/// Store whose backend is always unavailable.
pub struct FailingStore;

impl DurableStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _raw: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

/// Records every theme pushed to it.
#[derive(Default)]
pub struct RecordingSink {
    pub applied: Mutex<Vec<Theme>>,
}

impl ThemeSink for RecordingSink {
    fn apply(&self, theme: Theme) {
        self.applied.lock().push(theme);
    }
}

/// Always rolls the lowest value of the range.
pub struct MinRoller;

impl StatRoller for MinRoller {
    fn roll(&mut self, range: Range<u32>) -> u32 {
        range.start
    }
}

pub fn make_app(transport: Arc<dyn Transport>, store: Arc<dyn DurableStore>) -> App {
    make_app_with(API_BASE, transport, store)
}

/// App with a dark theme, minimum stats on login and the given API base.
pub fn make_app_with(
    base_url: &str,
    transport: Arc<dyn Transport>,
    store: Arc<dyn DurableStore>,
) -> App {
    let services = Services {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        transport,
        store,
    };
    let context = ContextProvider::with_roller(
        Theme::Dark,
        Arc::new(RecordingSink::default()),
        Box::new(MinRoller),
    );
    App::new(services, context)
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub const POSTS_JSON: &str = r#"[
    {"userId": 1, "id": 1, "title": "The dragon of Ashfall", "body": "It slept."},
    {"userId": 1, "id": 2, "title": "Lost in the mines", "body": "Bring torches."},
    {"userId": 2, "id": 3, "title": "A tavern rumour", "body": "Ale was involved."}
]"#;

pub const POST_ONE_JSON: &str = r#"{"userId": 1, "id": 1, "title": "t", "body": "b"}"#;

pub const COMMENTS_JSON: &str = r#"[
    {"postId": 1, "id": 1, "name": "Bram", "email": "bram@inn.test", "body": "Huzzah"}
]"#;

/// Events captured by [`capture_logs`]: level and formatted message.
#[derive(Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<(tracing::Level, String)>>>);

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CapturedEvents {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().push((*event.metadata().level(), visitor.0));
    }
}

/// Run `f` with a thread-local subscriber and return what it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(tracing::Level, String)>) {
    use tracing_subscriber::layer::SubscriberExt;

    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.0.lock().clone();
    (result, captured)
}
