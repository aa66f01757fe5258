//! Fake remotes and fixtures shared by the client_core test suites.

use std::collections::VecDeque;

use async_trait::async_trait;
use shared::{
    domain::{ExhibitionRecord, ExhibitionStatus},
    error::TransientFetchFailure,
    protocol::{PaginationInfo, SearchRequest, SearchResponse},
};
use tokio::sync::{oneshot, Mutex};

use crate::remote::RemoteSearch;

pub(crate) type RemoteResult = Result<SearchResponse, TransientFetchFailure>;

pub(crate) fn record(title: &str) -> ExhibitionRecord {
    ExhibitionRecord {
        title: Some(title.to_string()),
        description: None,
        gallery_title: None,
        kind: None,
        is_featured: false,
        status: ExhibitionStatus::Confirmed,
    }
}

pub(crate) fn page(titles: &[&str], total_pages: u32) -> SearchResponse {
    SearchResponse {
        data: titles.iter().map(|title| record(title)).collect(),
        pagination: PaginationInfo { total_pages },
    }
}

/// Answers immediately with pre-scripted results, in order.
pub(crate) struct ScriptedRemote {
    responses: Mutex<VecDeque<RemoteResult>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedRemote {
    pub(crate) fn new(responses: Vec<RemoteResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) async fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl RemoteSearch for ScriptedRemote {
    async fn search(&self, request: &SearchRequest) -> RemoteResult {
        self.requests.lock().await.push(request.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TransientFetchFailure::transport("no scripted response")))
    }
}

/// Holds every request open until the test releases it through its gate.
pub(crate) struct GatedRemote {
    gates: Mutex<VecDeque<oneshot::Receiver<RemoteResult>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl GatedRemote {
    pub(crate) fn new() -> Self {
        Self {
            gates: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) async fn gate(&self) -> oneshot::Sender<RemoteResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.push_back(rx);
        tx
    }

    pub(crate) async fn wait_for_requests(&self, count: usize) {
        while self.requests.lock().await.len() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl RemoteSearch for GatedRemote {
    async fn search(&self, request: &SearchRequest) -> RemoteResult {
        self.requests.lock().await.push(request.clone());
        let gate = self.gates.lock().await.pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransientFetchFailure::transport("gate dropped"))),
            None => Err(TransientFetchFailure::transport("no gate prepared")),
        }
    }
}
