//! Routes parsed UI events to the browser core and decides what the terminal
//! shows next.

use std::sync::Arc;

use client_core::{Admission, DispatchOutcome, ExhibitionBrowser, Intent, IntentOutcome};
use tokio::task::JoinSet;
use tracing::debug;

use crate::{
    controller::events::{UiEvent, HELP_TEXT},
    render::TableState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStep {
    pub exit: bool,
    pub rerender: bool,
    pub status: Option<String>,
}

impl UiStep {
    fn render() -> Self {
        Self {
            exit: false,
            rerender: true,
            status: None,
        }
    }

    fn message(status: impl Into<String>) -> Self {
        Self {
            exit: false,
            rerender: false,
            status: Some(status.into()),
        }
    }
}

/// Maps the final outcome of an intent to what the terminal shows next.
pub fn settle(outcome: IntentOutcome, table: &mut TableState) -> UiStep {
    match outcome {
        IntentOutcome::Blocked => UiStep::message("Still loading exhibitions; please wait"),
        IntentOutcome::Unchanged => UiStep::render(),
        IntentOutcome::Dispatched(DispatchOutcome::Throttled) => {
            UiStep::message("Too many requests at once; please try again")
        }
        IntentOutcome::Dispatched(DispatchOutcome::Applied) => {
            table.clear();
            UiStep::render()
        }
        IntentOutcome::Dispatched(DispatchOutcome::Failed)
        | IntentOutcome::Dispatched(DispatchOutcome::Superseded) => UiStep::render(),
    }
}

/// Admits the intent right away and leaves the round trip to a task in
/// `in_flight`, so the loading view can be drawn while it runs.
async fn start_intent(
    browser: &Arc<ExhibitionBrowser>,
    intent: Intent,
    table: &mut TableState,
    in_flight: &mut JoinSet<IntentOutcome>,
) -> UiStep {
    match browser.admit(intent).await {
        Admission::Settled(outcome) => settle(outcome, table),
        Admission::Pending(ticket) => {
            let browser = Arc::clone(browser);
            in_flight.spawn(async move { browser.finish(ticket).await });
            UiStep::render()
        }
    }
}

pub async fn dispatch_ui_event(
    browser: &Arc<ExhibitionBrowser>,
    event: UiEvent,
    table: &mut TableState,
    in_flight: &mut JoinSet<IntentOutcome>,
) -> UiStep {
    debug!(?event, "handling ui event");
    let intent = match event {
        UiEvent::SearchSubmitted(query) => Intent::Search(query),
        UiEvent::ColumnHeaderClicked(column) => Intent::Sort(column),
        UiEvent::PageControlClicked(target) => Intent::PageChange(target),
        UiEvent::RetryRequested => Intent::Refresh,
        UiEvent::ViewportResized(width_px) => {
            browser.handle_resize(width_px).await;
            return UiStep::render();
        }
        UiEvent::DescriptionToggled(row) => {
            let rows = browser.view().await.result_items.len();
            if row == 0 || row > rows {
                return UiStep::message(format!("No row {row} on this page"));
            }
            table.toggle(row);
            return UiStep::render();
        }
        UiEvent::Help => return UiStep::message(HELP_TEXT),
        UiEvent::Quit => {
            return UiStep {
                exit: true,
                rerender: false,
                status: None,
            };
        }
    };
    start_intent(browser, intent, table, in_flight).await
}
