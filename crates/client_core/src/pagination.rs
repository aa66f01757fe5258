//! Page-control window: which page numbers and jump arrows to show for a
//! given position in the result set.

/// Viewports at or below this width get the reduced control set.
pub const NARROW_MAX_WIDTH_PX: u32 = 791;

/// Up to this many pages are listed in full, without arrows.
const FULL_LIST_MAX_PAGES: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn from_width(width_px: u32) -> Self {
        if width_px <= NARROW_MAX_WIDTH_PX {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowItem {
    Page(u32),
    BackArrow,
    ForwardArrow,
}

/// Edge-distance rule: 6 at either end of the range, one less per step
/// inward, never below 2. Keeps a wide window at nine items.
pub fn edge_span(current_page: u32, last_page: u32) -> u32 {
    let current_page = current_page.clamp(1, last_page.max(1));
    let distance = (current_page - 1).min(last_page.saturating_sub(current_page));
    match distance {
        0 => 6,
        1 => 5,
        2 => 4,
        3 => 3,
        _ => 2,
    }
}

/// How many pages a single arrow click moves.
pub fn arrow_step(current_page: u32, last_page: u32, viewport: ViewportClass) -> u32 {
    match viewport {
        ViewportClass::Wide => edge_span(current_page, last_page),
        ViewportClass::Narrow => 1,
    }
}

pub fn compute_window(
    current_page: u32,
    last_page: u32,
    viewport: ViewportClass,
) -> Vec<WindowItem> {
    if last_page <= 1 {
        return Vec::new();
    }
    let current = current_page.clamp(1, last_page);

    match viewport {
        ViewportClass::Wide => wide_window(current, last_page),
        ViewportClass::Narrow => narrow_window(current, last_page),
    }
}

fn pages(start: u32, end: u32) -> impl Iterator<Item = WindowItem> {
    (start..=end).map(WindowItem::Page)
}

fn wide_window(current: u32, last: u32) -> Vec<WindowItem> {
    if last <= FULL_LIST_MAX_PAGES {
        return pages(1, last).collect();
    }

    let span = edge_span(current, last);
    let mut window = Vec::with_capacity(FULL_LIST_MAX_PAGES as usize);

    if current <= 4 {
        window.extend(pages(1, current + span));
        window.push(WindowItem::ForwardArrow);
        window.push(WindowItem::Page(last));
    } else if current >= last - 3 {
        window.push(WindowItem::Page(1));
        window.push(WindowItem::BackArrow);
        window.extend(pages(current - span, last));
    } else {
        window.push(WindowItem::Page(1));
        window.push(WindowItem::BackArrow);
        window.extend(pages(current - 2, current + 2));
        window.push(WindowItem::ForwardArrow);
        window.push(WindowItem::Page(last));
    }
    window
}

fn narrow_window(current: u32, last: u32) -> Vec<WindowItem> {
    if current == 1 {
        vec![
            WindowItem::Page(1),
            WindowItem::ForwardArrow,
            WindowItem::Page(last),
        ]
    } else if current == last {
        vec![
            WindowItem::Page(1),
            WindowItem::BackArrow,
            WindowItem::Page(last),
        ]
    } else {
        vec![
            WindowItem::Page(1),
            WindowItem::BackArrow,
            WindowItem::Page(current),
            WindowItem::ForwardArrow,
            WindowItem::Page(last),
        ]
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
