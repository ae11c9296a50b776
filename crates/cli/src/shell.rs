//! Async storefront shell.
//!
//! Wraps a [`Session`] in a shared results cell and simulates the latency a
//! real catalog backend would add before search and filter results come
//! back. Each request runs in its own task; whichever finishes last wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bazaar_core::filter::FilterCriteria;
use bazaar_core::{OrderError, OrderProcessor, Outcome, Session, SessionAction, SessionState};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::config::ShellConfig;

/// Shared handle to a session plus its simulated result loading.
#[derive(Debug)]
pub struct Storefront<P> {
    session: Arc<Mutex<Session<P>>>,
    pending: Arc<AtomicUsize>,
    search_delay: Duration,
    filter_delay: Duration,
}

impl<P> Clone for Storefront<P> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            pending: Arc::clone(&self.pending),
            search_delay: self.search_delay,
            filter_delay: self.filter_delay,
        }
    }
}

/// Decrements the pending count when a load finishes, even if it panics.
struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn start(pending: &Arc<AtomicUsize>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(pending))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<P> Storefront<P>
where
    P: OrderProcessor + Send + 'static,
{
    pub fn new(session: Session<P>, config: &ShellConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            pending: Arc::new(AtomicUsize::new(0)),
            search_delay: config.search_delay,
            filter_delay: config.filter_delay,
        }
    }

    /// Whether any search or filter request is still in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Copy of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }

    /// Start a search; results apply after the search delay.
    #[instrument(skip(self))]
    pub fn search(&self, query: String, category: Option<String>) -> JoinHandle<Result<Outcome, OrderError>> {
        self.load(self.search_delay, SessionAction::Search { query, category })
    }

    /// Start a filter change; results apply after the filter delay.
    #[instrument(skip_all, fields(active = criteria.active_filter_count()))]
    pub fn apply_filters(&self, criteria: FilterCriteria) -> JoinHandle<Result<Outcome, OrderError>> {
        self.load(self.filter_delay, SessionAction::SetFilters { criteria })
    }

    fn load(&self, delay: Duration, action: SessionAction) -> JoinHandle<Result<Outcome, OrderError>> {
        let guard = PendingGuard::start(&self.pending);
        let session = Arc::clone(&self.session);
        let name = action.name();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = session.lock().await.dispatch(action);
            debug!(action = name, "Results applied");
            drop(guard);
            outcome
        })
    }
}
