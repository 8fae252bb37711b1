//! Type-ahead search that waits for typing to pause.
//!
//! Every keystroke bumps a generation counter and restarts the timer. When
//! the timer for the current generation elapses, exactly one search runs for
//! the latest text, and its answer is published only if that generation is
//! still current and the debouncer has not been closed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use braprime_core::{AppConfig, Coordinates, Place};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::service::PlaceSearch;

/// The answer currently on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Query these places answer. Empty when the search box is empty.
    pub query: String,
    pub places: Vec<Place>,
}

/// Shared between the debouncer and its timer tasks.
struct Gate {
    generation: AtomicU64,
    closed: AtomicBool,
}

impl Gate {
    fn is_current(&self, token: u64) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == token
    }
}

/// Debounced front end over a [`PlaceSearch`].
///
/// Owned by a single search box. Dropping it (or calling
/// [`SearchDebouncer::close`]) cancels the pending timer and suppresses any
/// answer still in flight.
pub struct SearchDebouncer<S> {
    searcher: Arc<S>,
    delay: Duration,
    bias: Option<Coordinates>,
    gate: Arc<Gate>,
    results: Arc<watch::Sender<SearchResults>>,
    pending: Option<JoinHandle<()>>,
}

impl<S> SearchDebouncer<S>
where
    S: PlaceSearch + 'static,
{
    #[must_use]
    pub fn new(searcher: Arc<S>, delay: Duration) -> Self {
        let (results, _) = watch::channel(SearchResults::default());
        Self {
            searcher,
            delay,
            bias: None,
            gate: Arc::new(Gate {
                generation: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
            results: Arc::new(results),
            pending: None,
        }
    }

    /// Debouncer using the configured `search_debounce_ms` window.
    #[must_use]
    pub fn from_config(searcher: Arc<S>, config: &AppConfig) -> Self {
        Self::new(searcher, Duration::from_millis(config.search_debounce_ms))
    }

    /// Biases every search issued from now on toward `bias`.
    #[must_use]
    pub fn with_bias(mut self, bias: Option<Coordinates>) -> Self {
        self.bias = bias;
        self
    }

    /// Receiver that observes each published [`SearchResults`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results.subscribe()
    }

    /// Snapshot of the results currently published.
    #[must_use]
    pub fn current(&self) -> SearchResults {
        self.results.borrow().clone()
    }

    /// Records new search-box text.
    ///
    /// Blank text clears the results at once without searching. Anything else
    /// restarts the debounce timer. Ignored after [`SearchDebouncer::close`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn on_query_changed(&mut self, text: &str) {
        if self.gate.closed.load(Ordering::SeqCst) {
            return;
        }
        // Bump before aborting: a task that already finished its search
        // re-checks the generation before publishing.
        let token = self.gate.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let query = text.trim().to_owned();
        if query.is_empty() {
            self.results.send_replace(SearchResults::default());
            return;
        }

        let searcher = Arc::clone(&self.searcher);
        let gate = Arc::clone(&self.gate);
        let results = Arc::clone(&self.results);
        let delay = self.delay;
        let bias = self.bias;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !gate.is_current(token) {
                return;
            }
            tracing::debug!(query = %query, token, "issuing debounced place search");
            let places = searcher.search_places(&query, bias).await;
            if !gate.is_current(token) {
                tracing::debug!(query = %query, token, "discarding stale search results");
                return;
            }
            results.send_replace(SearchResults { query, places });
        }));
    }

    /// Cancels the pending timer and stops publishing. Idempotent.
    pub fn close(&mut self) {
        shut_down(&self.gate, &mut self.pending);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.gate.closed.load(Ordering::SeqCst)
    }
}

fn shut_down(gate: &Gate, pending: &mut Option<JoinHandle<()>>) {
    gate.closed.store(true, Ordering::SeqCst);
    if let Some(handle) = pending.take() {
        handle.abort();
    }
}

impl<S> Drop for SearchDebouncer<S> {
    fn drop(&mut self) {
        shut_down(&self.gate, &mut self.pending);
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod tests;
