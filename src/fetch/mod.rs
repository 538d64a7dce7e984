//! Remote resource fetching.
//!
//! A [`ResourceFetcher`] owns at most one outstanding GET, keyed by URL.
//! Changing the key supersedes the request in flight; the superseded
//! request is cancelled and whatever it eventually produces is dropped.
//!
//! ```text
//! observe(key) ──→ Begin{ticket} ──→ Pending
//!                        │
//!           transport ───┴──→ Settle{ticket} ──→ Success | Error
//!                                   │
//!                  ticket != current ──→ discarded
//! ```

mod cancel;
mod error;
mod fetcher;
mod intent;
mod reducer;
mod state;
mod transport;

pub use cancel::CancelToken;
pub use error::FetchError;
pub use fetcher::ResourceFetcher;
pub use intent::FetchIntent;
pub use reducer::FetchReducer;
pub use state::{FetchSlot, FetchState, FetchStatus};
pub use transport::{HttpTransport, Transport, TransportResponse};
