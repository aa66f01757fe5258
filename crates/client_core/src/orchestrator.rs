//! Dispatches page fetches against the remote index and folds their results
//! back into the query session.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::SortSpec,
    error::TransientFetchFailure,
    protocol::{SearchRequest, SearchResponse},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{remote::RemoteSearch, session::QuerySession, throttle::Throttle};

pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(60);

/// What a dispatch should fetch. Unset fields fall back to page 1, an empty
/// query and no sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub page_number: Option<u32>,
    pub search_query: Option<String>,
    pub sort: Option<SortSpec>,
}

/// An admitted dispatch whose response has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: SearchRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Dropped by the throttle; nothing was sent and nothing changed.
    Throttled,
    Applied,
    Failed,
    /// A newer dispatch was issued while this one was in flight.
    Superseded,
}

pub struct FetchOrchestrator {
    remote: Arc<dyn RemoteSearch>,
    throttle: Mutex<Throttle>,
}

impl FetchOrchestrator {
    pub fn new(remote: Arc<dyn RemoteSearch>, throttle_interval: Duration) -> Self {
        Self {
            remote,
            throttle: Mutex::new(Throttle::new(throttle_interval)),
        }
    }

    /// Admits the dispatch through the throttle and records it on the session
    /// (page, query, sort, `loading`), before any I/O happens.
    pub async fn begin(
        &self,
        session: &mut QuerySession,
        params: FetchParams,
    ) -> Option<FetchTicket> {
        {
            let mut throttle = self.throttle.lock().await;
            if !throttle.try_acquire() {
                debug!(
                    interval_ms = throttle.interval().as_millis() as u64,
                    "dropping fetch inside throttle window"
                );
                return None;
            }
        }

        let page_number = session.normalize_page(params.page_number);
        let search_query = params.search_query.unwrap_or_default();
        let sort = params.sort;
        let generation = session.start_fetch(page_number, search_query.clone(), sort);

        info!(
            generation,
            page = page_number,
            query = %search_query,
            sort = ?sort,
            "dispatching exhibitions fetch"
        );
        Some(FetchTicket {
            generation,
            request: SearchRequest::new(page_number, search_query, sort),
        })
    }

    /// Applies a response only if it belongs to the latest dispatch.
    pub fn complete(
        &self,
        session: &mut QuerySession,
        ticket: &FetchTicket,
        result: Result<SearchResponse, TransientFetchFailure>,
    ) -> DispatchOutcome {
        if !session.is_latest(ticket.generation) {
            warn!(
                generation = ticket.generation,
                latest = session.generation(),
                "discarding response of superseded fetch"
            );
            return DispatchOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                info!(
                    generation = ticket.generation,
                    items = response.data.len(),
                    total_pages = response.pagination.total_pages,
                    "exhibitions fetch completed"
                );
                session.apply_success(response);
                DispatchOutcome::Applied
            }
            Err(failure) => {
                warn!(
                    generation = ticket.generation,
                    kind = ?failure.kind,
                    error = %failure,
                    "exhibitions fetch failed"
                );
                session.apply_failure();
                DispatchOutcome::Failed
            }
        }
    }

    /// Performs the round trip for an admitted ticket. The session lock is
    /// not held while waiting on the remote.
    pub async fn run(
        &self,
        session: &Mutex<QuerySession>,
        ticket: FetchTicket,
    ) -> DispatchOutcome {
        let result = self.remote.search(&ticket.request).await;
        let mut guard = session.lock().await;
        self.complete(&mut guard, &ticket, result)
    }

    pub async fn dispatch_fetch(
        &self,
        session: &Mutex<QuerySession>,
        params: FetchParams,
    ) -> DispatchOutcome {
        let ticket = {
            let mut guard = session.lock().await;
            match self.begin(&mut guard, params).await {
                Some(ticket) => ticket,
                None => return DispatchOutcome::Throttled,
            }
        };
        self.run(session, ticket).await
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
