use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::cancel::CancelToken;
use super::error::FetchError;
use super::intent::FetchIntent;
use super::reducer::FetchReducer;
use super::state::{FetchSlot, FetchState};
use super::transport::Transport;
use crate::mvi::Reducer;

/// Tracks one remote resource for one view instance.
///
/// At most one request is outstanding. Observing a new key cancels the
/// previous request before issuing the next one; dropping the fetcher
/// cancels whatever is in flight and freezes the published state.
///
/// `observe` and `refetch` spawn onto the ambient Tokio runtime and must
/// be called from within one.
pub struct ResourceFetcher<T> {
    shared: Arc<Shared<T>>,
    transport: Arc<dyn Transport>,
}

struct Shared<T> {
    core: Mutex<Core<T>>,
    updates: watch::Sender<FetchState<T>>,
}

struct Core<T> {
    slot: FetchSlot<T>,
    last_ticket: u64,
    in_flight: Option<InFlight>,
    torn_down: bool,
}

/// Ownership of an outstanding request. Dropping it cancels the request.
struct InFlight {
    token: CancelToken,
    task: AbortHandle,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.abort();
    }
}

impl<T> ResourceFetcher<T>
where
    T: DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (updates, _) = watch::channel(FetchState::Idle);
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    slot: FetchSlot::default(),
                    last_ticket: 0,
                    in_flight: None,
                    torn_down: false,
                }),
                updates,
            }),
            transport,
        }
    }

    /// Point the fetcher at `key`, or at nothing.
    ///
    /// Re-observing the key that is already tracked does nothing.
    pub fn observe(&self, key: Option<&str>) {
        let mut core = self.shared.core.lock();
        if key == core.slot.state.request_key() {
            return;
        }

        // Dropping the guard cancels the superseded request.
        core.in_flight = None;
        let ticket = core.next_ticket();

        match key {
            None => self.shared.apply(&mut core, FetchIntent::Clear { ticket }),
            Some(key) => self.start(&mut core, ticket, key.to_string()),
        }
    }

    /// Issue the request for the current key again.
    ///
    /// Does nothing while idle.
    pub fn refetch(&self) {
        let mut core = self.shared.core.lock();
        let Some(key) = core.slot.state.request_key().map(str::to_string) else {
            return;
        };
        core.in_flight = None;
        let ticket = core.next_ticket();
        self.start(&mut core, ticket, key);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.shared.core.lock().slot.state.clone()
    }

    /// Receiver notified on every state transition.
    ///
    /// Once the fetcher is dropped the channel closes without delivering
    /// further values.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.updates.subscribe()
    }

    /// Wait until the state is no longer pending and return it.
    pub async fn settled(&self) -> FetchState<T> {
        let mut updates = self.shared.updates.subscribe();
        let settled = match updates.wait_for(|state| !state.is_pending()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    fn start(&self, core: &mut Core<T>, ticket: u64, key: String) {
        self.shared.apply(
            core,
            FetchIntent::Begin {
                ticket,
                key: key.clone(),
            },
        );

        let token = CancelToken::new();
        let task = tokio::spawn(run_request(
            Arc::clone(&self.shared),
            Arc::clone(&self.transport),
            key,
            ticket,
            token.clone(),
        ));
        core.in_flight = Some(InFlight {
            token,
            task: task.abort_handle(),
        });
    }
}

impl<T> Drop for ResourceFetcher<T> {
    fn drop(&mut self) {
        let mut core = self.shared.core.lock();
        core.torn_down = true;
        core.in_flight = None;
    }
}

impl<T> Core<T> {
    fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }
}

impl<T> Shared<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Run an intent through the reducer and publish the result.
    fn apply(&self, core: &mut Core<T>, intent: FetchIntent<T>) {
        core.slot = FetchReducer::<T>::reduce(std::mem::take(&mut core.slot), intent);

        let next = &core.slot.state;
        let changed = self.updates.send_if_modified(|current| {
            if current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
        if changed {
            tracing::debug!(
                key = next.request_key().unwrap_or("-"),
                status = next.status().as_str(),
                ticket = core.slot.ticket,
                "Fetch state changed"
            );
        }
    }
}

async fn run_request<T>(
    shared: Arc<Shared<T>>,
    transport: Arc<dyn Transport>,
    key: String,
    ticket: u64,
    token: CancelToken,
) where
    T: DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::trace!(key = %key, ticket, "Request cancelled before settling");
            return;
        }
        outcome = fetch_json::<T>(transport.as_ref(), &key) => outcome,
    };

    let mut core = shared.core.lock();
    // The abort signal may have raced the response; it still wins.
    if token.is_cancelled() || core.torn_down {
        tracing::trace!(key = %key, ticket, "Discarding result of cancelled request");
        return;
    }
    if let Err(err) = &outcome {
        tracing::warn!(key = %key, error_type = err.error_type(), "Fetch failed: {}", err);
    }
    shared.apply(&mut core, FetchIntent::Settle { ticket, outcome });
}

async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<T, FetchError> {
    let response = transport.get(url).await?;

    // A 404 is a response, not a transport failure; reject it here.
    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
