//! Query orchestration: one fetch-parse-deliver cycle per start.
//!
//! The orchestrator owns the record list between fetch and hand-off. A
//! cycle runs on a background thread and publishes exactly one
//! [`Delivery`] over an mpsc channel, so the caller observes the result
//! from its own thread without sharing mutable state with the worker.

use std::sync::{Arc, Mutex, mpsc};
use std::thread;

use tracing::{debug, warn};

use crate::client::{Connectivity, FeedSource, QueryParams, USGS_QUERY_URL};
use crate::models::Earthquake;
use crate::parser;

/// Lifecycle of a single query cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    /// No fetch triggered yet
    Idle,
    /// Fetch in flight
    Loading,
    /// Cycle finished with a (possibly empty) record list
    Loaded,
    /// Cycle finished without records: offline or fetch failure
    Failed,
}

/// Status signal delivered alongside the record list.
///
/// Network failure and an empty result both deliver an empty list; this
/// signal is how the display layer tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Probe reported no network path; the fetch was not attempted
    NoConnectivity,
    /// Fetch succeeded, zero records (or unparseable document)
    LoadedEmpty,
    /// Fetch succeeded with at least one record
    LoadedNonEmpty,
    /// Fetch was attempted and failed; carries the reason
    FetchError(String),
}

/// The single hand-off to the display layer for one cycle.
#[derive(Debug)]
pub struct Delivery {
    pub status: FeedStatus,
    pub records: Vec<Earthquake>,
}

/// Coordinates fetch, parse, and delivery for one feed query.
///
/// Each instance is created by and scoped to the caller that needs it;
/// there is no shared registry. Records are replaced wholesale on every
/// cycle.
pub struct QueryOrchestrator {
    source: Arc<dyn FeedSource>,
    params: QueryParams,
    base_url: String,
    state: Arc<Mutex<QueryState>>,
}

impl QueryOrchestrator {
    /// Create an orchestrator against the USGS query endpoint.
    #[must_use]
    pub fn new(source: Arc<dyn FeedSource>, params: QueryParams) -> Self {
        Self::with_base_url(source, params, USGS_QUERY_URL)
    }

    /// Create an orchestrator against a custom endpoint.
    #[must_use]
    pub fn with_base_url(
        source: Arc<dyn FeedSource>,
        params: QueryParams,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            source,
            params,
            base_url: base_url.into(),
            state: Arc::new(Mutex::new(QueryState::Idle)),
        }
    }

    /// Current cycle state.
    #[must_use]
    pub fn state(&self) -> QueryState {
        load_state(&self.state)
    }

    /// Trigger one fetch-parse-deliver cycle.
    ///
    /// Returns the receiving end of the delivery channel; exactly one
    /// [`Delivery`] arrives on it per call. The connectivity probe is
    /// consulted first: offline delivers `NoConnectivity` without
    /// attempting the fetch. A `start` while a previous cycle is still
    /// loading is ignored and returns `None`.
    pub fn start(&self, connectivity: &dyn Connectivity) -> Option<mpsc::Receiver<Delivery>> {
        {
            let mut state = match self.state.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };

            if *state == QueryState::Loading {
                warn!("fetch already in flight, ignoring start request");
                return None;
            }

            if !connectivity.is_online() {
                debug!("no network path, skipping fetch");
                *state = QueryState::Failed;
                drop(state);

                let (tx, rx) = mpsc::channel();
                let _ = tx.send(Delivery {
                    status: FeedStatus::NoConnectivity,
                    records: Vec::new(),
                });
                return Some(rx);
            }

            *state = QueryState::Loading;
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let url = self.params.request_url(&self.base_url);

        thread::spawn(move || {
            let delivery = match source.fetch(&url) {
                Ok(raw) => {
                    let records = parser::parse(&raw);
                    debug!("cycle loaded {} records", records.len());
                    let status = if records.is_empty() {
                        FeedStatus::LoadedEmpty
                    } else {
                        FeedStatus::LoadedNonEmpty
                    };
                    store_state(&state, QueryState::Loaded);
                    Delivery { status, records }
                }
                Err(e) => {
                    warn!("feed fetch failed: {e}");
                    store_state(&state, QueryState::Failed);
                    Delivery {
                        status: FeedStatus::FetchError(e.to_string()),
                        records: Vec::new(),
                    }
                }
            };

            if tx.send(delivery).is_err() {
                debug!("delivery receiver dropped before publish");
            }
        });

        Some(rx)
    }
}

fn load_state(cell: &Mutex<QueryState>) -> QueryState {
    match cell.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn store_state(cell: &Mutex<QueryState>, next: QueryState) {
    match cell.lock() {
        Ok(mut guard) => *guard = next,
        Err(poisoned) => *poisoned.into_inner() = next,
    }
}
