//! Query orchestration for browsing the remote exhibitions index: session
//! state, throttled fetch dispatch, intent handling and the page-control
//! window.

pub mod browser;
pub mod orchestrator;
pub mod pagination;
pub mod remote;
pub mod session;
pub mod throttle;

pub use browser::{Admission, BrowserView, ExhibitionBrowser, Intent, IntentOutcome, PageTarget};
pub use orchestrator::{
    DispatchOutcome, FetchOrchestrator, FetchParams, FetchTicket, DEFAULT_THROTTLE_INTERVAL,
};
pub use pagination::{compute_window, ViewportClass, WindowItem};
pub use remote::{HttpSearchClient, RemoteSearch, RemoteSetupError};
pub use session::QuerySession;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
