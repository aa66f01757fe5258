//! Text rendering of the browser view: result table and page controls.

use std::{collections::HashSet, fmt::Write as _};

use client_core::{BrowserView, WindowItem};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use shared::domain::{ColumnId, ExhibitionRecord, ExhibitionStatus};

pub const TITLE_BANNER: &str = "The Art Institute of Chicago - Exhibitions";
pub const ERROR_MESSAGE: &str = "We're sorry, we cannot show you any exhibitions - try again!";
pub const LOADING_MESSAGE: &str = "LOADING...";

const DESCRIPTION_PREVIEW_CHARS: usize = 200;
const MISSING: &str = "—";
const BACK_ARROW: &str = "🠔";
const FORWARD_ARROW: &str = "🠖";

/// Per-row display toggles. Row indices refer to the current result page.
#[derive(Debug, Default)]
pub struct TableState {
    expanded: HashSet<usize>,
    wrap_to_terminal: bool,
}

impl TableState {
    /// Cells wrap to the terminal width instead of overflowing it.
    pub fn wrapping() -> Self {
        Self {
            expanded: HashSet::new(),
            wrap_to_terminal: true,
        }
    }

    /// Returns whether the row is expanded afterwards.
    pub fn toggle(&mut self, row: usize) -> bool {
        if self.expanded.remove(&row) {
            false
        } else {
            self.expanded.insert(row);
            true
        }
    }

    pub fn is_expanded(&self, row: usize) -> bool {
        self.expanded.contains(&row)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING.to_string(),
    }
}

fn description_cell(description: Option<&str>, expanded: bool) -> String {
    let Some(text) = description.filter(|text| !text.is_empty()) else {
        return MISSING.to_string();
    };
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    if expanded {
        format!("{text} SHOW LESS")
    } else {
        let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{preview}... ...READ MORE")
    }
}

fn status_marker(status: ExhibitionStatus) -> &'static str {
    match status {
        ExhibitionStatus::Closed => "closed",
        ExhibitionStatus::Confirmed => "open",
        _ => "",
    }
}

pub fn render_table(items: &[ExhibitionRecord], state: &TableState) -> String {
    if items.is_empty() {
        return "No exhibitions found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(if state.wrap_to_terminal {
        ContentArrangement::Dynamic
    } else {
        ContentArrangement::Disabled
    });

    let mut header = vec![Cell::new("#").add_attribute(Attribute::Bold)];
    header.extend(
        ColumnId::ALL
            .iter()
            .map(|column| Cell::new(column.heading()).add_attribute(Attribute::Bold)),
    );
    header.push(Cell::new("").add_attribute(Attribute::Bold));
    table.set_header(header);

    for (index, record) in items.iter().enumerate() {
        let row = index + 1;
        let featured = if record.is_featured {
            "true".to_string()
        } else {
            MISSING.to_string()
        };
        let marker = status_marker(record.status);
        let mut title = Cell::new(or_missing(record.title.as_deref()));
        if record.status == ExhibitionStatus::Closed {
            title = title.add_attribute(Attribute::Dim);
        }
        table.add_row(vec![
            Cell::new(row),
            title,
            Cell::new(description_cell(
                record.description.as_deref(),
                state.is_expanded(row),
            )),
            Cell::new(or_missing(record.gallery_title.as_deref())),
            Cell::new(featured),
            Cell::new(or_missing(record.kind.as_deref())),
            Cell::new(marker),
        ]);
    }

    table.to_string()
}

pub fn render_pagination(window: &[WindowItem], current_page: u32) -> String {
    window
        .iter()
        .map(|item| match item {
            WindowItem::Page(page) if *page == current_page => format!("[{page}]"),
            WindowItem::Page(page) => page.to_string(),
            WindowItem::BackArrow => BACK_ARROW.to_string(),
            WindowItem::ForwardArrow => FORWARD_ARROW.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_query(view: &BrowserView) -> Option<String> {
    let mut parts = Vec::new();
    if !view.search_query.is_empty() {
        parts.push(format!("search: \"{}\"", view.search_query));
    }
    if let Some(sort) = view.sort {
        parts.push(format!(
            "sorted by {} ({})",
            sort.field.wire_name(),
            sort.direction.as_str()
        ));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Full screen: banner, query summary, pagination around the table. The
/// controls are hidden on error, and the lower bar also while loading.
pub fn render_view(view: &BrowserView, state: &TableState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE_BANNER}");
    if let Some(summary) = describe_query(view) {
        let _ = writeln!(out, "{summary}");
    }

    let pagination = render_pagination(&view.page_window, view.page_number);
    let show_pagination = !pagination.is_empty();

    if !view.error && show_pagination {
        let _ = writeln!(out, "{pagination}");
    }

    if view.error {
        let _ = writeln!(out, "{ERROR_MESSAGE}");
    } else if view.loading {
        let _ = writeln!(out, "{LOADING_MESSAGE}");
    } else {
        let _ = writeln!(out, "{}", render_table(&view.result_items, state));
    }

    if !view.error && !view.loading && show_pagination {
        let _ = writeln!(out, "{pagination}");
    }
    out
}
