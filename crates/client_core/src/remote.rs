//! The remote exhibitions index, seen from the client.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::TransientFetchFailure,
    protocol::{SearchRequest, SearchResponse},
};
use thiserror::Error;
use url::Url;

#[async_trait]
pub trait RemoteSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest)
        -> Result<SearchResponse, TransientFetchFailure>;
}

#[derive(Debug, Error)]
pub enum RemoteSetupError {
    #[error("invalid exhibitions base url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("exhibitions base url '{0}' cannot carry a path")]
    NotHierarchical(String),
}

/// `GET {base}` for plain listings, `GET {base}/search` once text or a sort
/// is involved.
pub struct HttpSearchClient {
    http: Client,
    base_url: Url,
}

impl HttpSearchClient {
    pub fn new(base_url: &str) -> Result<Self, RemoteSetupError> {
        let parsed = Url::parse(base_url).map_err(|source| RemoteSetupError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(RemoteSetupError::NotHierarchical(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, request: &SearchRequest) -> Url {
        let mut url = self.base_url.clone();
        if request.needs_search_endpoint() {
            // checked in `new`: the base url is hierarchical
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push("search");
            }
        }
        url
    }
}

fn classify(err: reqwest::Error) -> TransientFetchFailure {
    if let Some(status) = err.status() {
        TransientFetchFailure::status(status.as_u16())
    } else if err.is_decode() {
        TransientFetchFailure::decode(err.to_string())
    } else {
        TransientFetchFailure::transport(err.to_string())
    }
}

#[async_trait]
impl RemoteSearch for HttpSearchClient {
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, TransientFetchFailure> {
        self.http
            .get(self.endpoint(request))
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?
            .json::<SearchResponse>()
            .await
            .map_err(classify)
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
