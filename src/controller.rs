//! Search state machine sitting between filter inputs and the displayed list.
//!
//! The controller owns the pending filter inputs, the last executed query and
//! the current [`SearchState`]. State snapshots are published through a
//! `watch` channel; the presentation layer only observes them.
//!
//! Every issued search gets a generation number. Searches run one at a time
//! behind a FIFO gate, a queued search whose generation is no longer current
//! skips its fetch, and a finished search only publishes if no later search
//! was issued in the meantime. The final state therefore always reflects the
//! most recently issued request, whatever order fetches complete in.

use crate::error::{ErrorKind, FetchError};
use crate::filter;
use crate::model::Recipe;
use crate::query::{PendingQuery, QueryModel};
use crate::stores::RecipeStore;
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{watch, Mutex as AsyncMutex};

/// What the presentation layer should currently show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    /// A search is running. Results of earlier searches are not retained.
    Loading,
    /// Recipes matching the executed query, in store order
    Loaded(Vec<Recipe>),
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn results(&self) -> Option<&[Recipe]> {
        match self {
            SearchState::Loaded(recipes) => Some(recipes),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<(ErrorKind, &str)> {
        match self {
            SearchState::Error { kind, message } => Some((*kind, message.as_str())),
            _ => None,
        }
    }

    /// Loaded, but nothing matched
    pub fn is_empty_result(&self) -> bool {
        matches!(self, SearchState::Loaded(recipes) if recipes.is_empty())
    }
}

/// How a search-issuing call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing to do: the query matched the last executed one, or the
    /// initial load already happened
    Unchanged,
    /// This search's result is now the published state
    Published,
    /// A later search was issued before this one could publish
    Superseded,
}

struct ControllerInner {
    pending: PendingQuery,
    last_executed: Option<QueryModel>,
    generation: u64,
    initial_load_requested: bool,
    loaded_once: bool,
}

pub struct SearchController {
    store: Box<dyn RecipeStore>,
    inner: Mutex<ControllerInner>,
    state: watch::Sender<SearchState>,
    fetch_gate: AsyncMutex<()>,
}

/// Rolls back an issued search if its future is dropped mid-flight
struct PendingSearch<'a> {
    controller: &'a SearchController,
    generation: u64,
    settled: bool,
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon(self.generation);
        }
    }
}

impl SearchController {
    pub fn new(store: Box<dyn RecipeStore>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            store,
            inner: Mutex::new(ControllerInner {
                pending: PendingQuery::default(),
                last_executed: None,
                generation: 0,
                initial_load_requested: false,
                loaded_once: false,
            }),
            state,
            fetch_gate: AsyncMutex::new(()),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn pending_query(&self) -> PendingQuery {
        self.lock_inner().pending.clone()
    }

    /// Canonical form of the pending inputs
    pub fn canonical_query(&self) -> QueryModel {
        self.lock_inner().pending.to_query()
    }

    pub fn last_executed_query(&self) -> Option<QueryModel> {
        self.lock_inner().last_executed.clone()
    }

    /// True if any clause-bearing input, search text included, is set
    pub fn has_active_filters(&self) -> bool {
        !self.canonical_query().is_empty()
    }

    /// Badge count for the filter button; see [`QueryModel::active_filter_count`]
    pub fn active_filter_count(&self) -> usize {
        self.canonical_query().active_filter_count()
    }

    /// Replace the pending inputs. Does not search.
    pub fn update_query(&self, pending: PendingQuery) {
        self.lock_inner().pending = pending;
    }

    /// Edit the pending inputs in place. Does not search.
    pub fn edit_query<F>(&self, edit: F)
    where
        F: FnOnce(&mut PendingQuery),
    {
        edit(&mut self.lock_inner().pending);
    }

    /// Reset every pending input, search text included. Does not search.
    pub fn clear_query(&self) {
        self.lock_inner().pending = PendingQuery::default();
    }

    /// Reset the filter-sheet inputs but keep the search text. Does not search.
    pub fn clear_filters(&self) {
        self.lock_inner().pending.clear_filters();
    }

    /// Run the first search. Later calls do nothing, unless every search so
    /// far has failed.
    pub async fn request_initial_load(&self) -> SearchOutcome {
        let (generation, query) = {
            let mut inner = self.lock_inner();
            if inner.initial_load_requested {
                debug!("Initial load already requested");
                return SearchOutcome::Unchanged;
            }
            inner.initial_load_requested = true;
            let query = inner.pending.to_query();
            self.issue(&mut inner, query)
        };
        self.run_search(generation, query).await
    }

    /// Search with the pending inputs unless they match the last executed query
    pub async fn apply_pending_query(&self) -> SearchOutcome {
        let (generation, query) = {
            let mut inner = self.lock_inner();
            let query = inner.pending.to_query();
            if inner.last_executed.as_ref() == Some(&query) {
                debug!("Query unchanged, skipping search");
                return SearchOutcome::Unchanged;
            }
            self.issue(&mut inner, query)
        };
        self.run_search(generation, query).await
    }

    /// Search with the pending inputs even if they match the last executed query
    pub async fn retry(&self) -> SearchOutcome {
        let (generation, query) = {
            let mut inner = self.lock_inner();
            let query = inner.pending.to_query();
            self.issue(&mut inner, query)
        };
        self.run_search(generation, query).await
    }

    fn lock_inner(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue(&self, inner: &mut ControllerInner, query: QueryModel) -> (u64, QueryModel) {
        inner.generation += 1;
        inner.last_executed = Some(query.clone());
        self.state.send_replace(SearchState::Loading);
        info!(
            "Issued search #{} ({} active filters)",
            inner.generation,
            query.active_filter_count()
        );
        (inner.generation, query)
    }

    async fn run_search(&self, generation: u64, query: QueryModel) -> SearchOutcome {
        let mut pending = PendingSearch {
            controller: self,
            generation,
            settled: false,
        };
        let _gate = self.fetch_gate.lock().await;

        let current = self.lock_inner().generation;
        if current != generation {
            debug!("Search #{} superseded before fetching", generation);
            pending.settled = true;
            return SearchOutcome::Superseded;
        }

        debug!(
            "Search #{} fetching from {}",
            generation,
            self.store.store_name()
        );
        let result = self
            .store
            .fetch(&query)
            .await
            .map(|candidates| filter::filter_recipes(candidates, &query));

        pending.settled = true;
        self.publish(generation, result)
    }

    /// Undo what `issue` did for a search whose future was dropped before it
    /// could publish, so the same query (or the initial load) can run again.
    fn abandon(&self, generation: u64) {
        let mut inner = self.lock_inner();
        if inner.generation != generation {
            return;
        }
        warn!("Search #{} was cancelled before completing", generation);
        inner.last_executed = None;
        if !inner.loaded_once {
            inner.initial_load_requested = false;
        }
        self.state.send_replace(SearchState::Idle);
    }

    fn publish(&self, generation: u64, result: Result<Vec<Recipe>, FetchError>) -> SearchOutcome {
        let mut inner = self.lock_inner();
        if inner.generation != generation {
            debug!("Discarding stale result of search #{}", generation);
            return SearchOutcome::Superseded;
        }

        let next = match result {
            Ok(recipes) => {
                info!("Search #{} matched {} recipes", generation, recipes.len());
                inner.loaded_once = true;
                SearchState::Loaded(recipes)
            }
            Err(e) => {
                warn!("Search #{} failed: {}", generation, e);
                // Forget the query so re-applying it retries
                inner.last_executed = None;
                if !inner.loaded_once {
                    inner.initial_load_requested = false;
                }
                SearchState::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        };
        self.state.send_replace(next);
        SearchOutcome::Published
    }
}
