//! Controller owning the query session. Turns discrete UI intents (search,
//! column click, page control click, resize) into guarded fetch dispatches.

use std::{sync::Arc, time::Duration};

use shared::domain::{ColumnId, ExhibitionRecord, SortSpec};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::{
    orchestrator::{DispatchOutcome, FetchOrchestrator, FetchParams, FetchTicket},
    pagination::{arrow_step, compute_window, ViewportClass, WindowItem},
    remote::RemoteSearch,
    session::QuerySession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Number(u32),
    Back,
    Forward,
}

impl From<WindowItem> for PageTarget {
    fn from(item: WindowItem) -> Self {
        match item {
            WindowItem::Page(number) => PageTarget::Number(number),
            WindowItem::BackArrow => PageTarget::Back,
            WindowItem::ForwardArrow => PageTarget::Forward,
        }
    }
}

/// A discrete user intent against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Refresh,
    Search(String),
    Sort(ColumnId),
    PageChange(PageTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Nothing to fetch; the outcome is final.
    Settled(IntentOutcome),
    /// A fetch was admitted and the session is now `loading`.
    Pending(FetchTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A fetch is in flight; the intent was ignored.
    Blocked,
    /// The intent would land on the page already shown.
    Unchanged,
    Dispatched(DispatchOutcome),
}

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    pub result_items: Vec<ExhibitionRecord>,
    pub loading: bool,
    pub error: bool,
    pub page_number: u32,
    pub last_page_number: u32,
    pub search_query: String,
    pub sort: Option<SortSpec>,
    pub viewport: ViewportClass,
    pub page_window: Vec<WindowItem>,
}

pub struct ExhibitionBrowser {
    session: Mutex<QuerySession>,
    orchestrator: FetchOrchestrator,
    viewport: RwLock<ViewportClass>,
}

impl ExhibitionBrowser {
    pub fn new(
        remote: Arc<dyn RemoteSearch>,
        throttle_interval: Duration,
        viewport: ViewportClass,
    ) -> Self {
        Self {
            session: Mutex::new(QuerySession::default()),
            orchestrator: FetchOrchestrator::new(remote, throttle_interval),
            viewport: RwLock::new(viewport),
        }
    }

    /// Re-fetches the current page with the current query and sort. Used for
    /// the first load and for manual retries after an error.
    pub async fn refresh(&self) -> IntentOutcome {
        self.settle(Intent::Refresh).await
    }

    /// New text search from page 1. Any active sort is dropped, which also
    /// resets the toggle to ascending.
    pub async fn handle_search(&self, query: &str) -> IntentOutcome {
        self.settle(Intent::Search(query.to_string())).await
    }

    pub async fn handle_sort(&self, column: ColumnId) -> IntentOutcome {
        self.settle(Intent::Sort(column)).await
    }

    pub async fn handle_page_change(&self, target: PageTarget) -> IntentOutcome {
        self.settle(Intent::PageChange(target)).await
    }

    /// First half of an intent: guard, throttle and session update. A pending
    /// admission leaves the session `loading` until [`Self::finish`] runs.
    pub async fn admit(&self, intent: Intent) -> Admission {
        match intent {
            Intent::Refresh => {
                self.admit_guarded(|session| {
                    Some(FetchParams {
                        page_number: Some(session.page_number()),
                        search_query: Some(session.search_query().to_string()),
                        sort: session.sort(),
                    })
                })
                .await
            }
            Intent::Search(query) => {
                info!(query = %query, "search submitted");
                self.admit_guarded(move |_| {
                    Some(FetchParams {
                        page_number: Some(1),
                        search_query: Some(query),
                        sort: None,
                    })
                })
                .await
            }
            Intent::Sort(column) => {
                info!(column = %column, "column sort requested");
                self.admit_guarded(|session| {
                    Some(FetchParams {
                        page_number: Some(1),
                        search_query: Some(session.search_query().to_string()),
                        sort: Some(session.next_sort(column)),
                    })
                })
                .await
            }
            Intent::PageChange(target) => {
                let viewport = *self.viewport.read().await;
                self.admit_guarded(|session| {
                    let current = session.page_number();
                    let step = arrow_step(current, session.last_page_number(), viewport);
                    let requested = match target {
                        PageTarget::Number(number) => number,
                        PageTarget::Back => current.saturating_sub(step),
                        PageTarget::Forward => current.saturating_add(step),
                    };
                    let page_number = session.normalize_page(Some(requested));
                    if page_number == current {
                        debug!(?target, page = current, "page change lands on current page");
                        return None;
                    }
                    Some(FetchParams {
                        page_number: Some(page_number),
                        search_query: Some(session.search_query().to_string()),
                        sort: session.sort(),
                    })
                })
                .await
            }
        }
    }

    /// Second half of an admitted intent: the round trip and its result.
    pub async fn finish(&self, ticket: FetchTicket) -> IntentOutcome {
        IntentOutcome::Dispatched(self.orchestrator.run(&self.session, ticket).await)
    }

    async fn settle(&self, intent: Intent) -> IntentOutcome {
        match self.admit(intent).await {
            Admission::Settled(outcome) => outcome,
            Admission::Pending(ticket) => self.finish(ticket).await,
        }
    }

    pub async fn handle_resize(&self, width_px: u32) -> ViewportClass {
        let class = ViewportClass::from_width(width_px);
        let mut viewport = self.viewport.write().await;
        if *viewport != class {
            debug!(width_px, ?class, "viewport class changed");
            *viewport = class;
        }
        class
    }

    pub async fn viewport(&self) -> ViewportClass {
        *self.viewport.read().await
    }

    pub async fn page_window(&self) -> Vec<WindowItem> {
        let viewport = *self.viewport.read().await;
        let session = self.session.lock().await;
        compute_window(session.page_number(), session.last_page_number(), viewport)
    }

    pub async fn view(&self) -> BrowserView {
        let viewport = *self.viewport.read().await;
        let session = self.session.lock().await;
        BrowserView {
            result_items: session.result_items().to_vec(),
            loading: session.loading(),
            error: session.error(),
            page_number: session.page_number(),
            last_page_number: session.last_page_number(),
            search_query: session.search_query().to_string(),
            sort: session.sort(),
            viewport,
            page_window: compute_window(
                session.page_number(),
                session.last_page_number(),
                viewport,
            ),
        }
    }

    /// Checks the in-flight guard and admits the dispatch under one lock, so
    /// two intents can never both pass the `loading` check.
    async fn admit_guarded<F>(&self, build: F) -> Admission
    where
        F: FnOnce(&QuerySession) -> Option<FetchParams>,
    {
        let mut session = self.session.lock().await;
        if session.loading() {
            debug!("intent ignored while a fetch is in flight");
            return Admission::Settled(IntentOutcome::Blocked);
        }
        let Some(params) = build(&session) else {
            return Admission::Settled(IntentOutcome::Unchanged);
        };
        match self.orchestrator.begin(&mut session, params).await {
            Some(ticket) => Admission::Pending(ticket),
            None => Admission::Settled(IntentOutcome::Dispatched(DispatchOutcome::Throttled)),
        }
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
