use shared::{
    domain::{ColumnId, ExhibitionRecord, SortDirection, SortSpec},
    protocol::SearchResponse,
};

/// Mutable browsing state: where the user is, what they asked for, and how
/// the last fetch turned out.
///
/// `result_items` always holds the last successful page; neither a failure
/// nor an in-flight fetch clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySession {
    page_number: u32,
    last_page_number: u32,
    search_query: String,
    sort: Option<SortSpec>,
    loading: bool,
    error: bool,
    result_items: Vec<ExhibitionRecord>,
    generation: u64,
}

impl Default for QuerySession {
    fn default() -> Self {
        Self {
            page_number: 1,
            last_page_number: 1,
            search_query: String::new(),
            sort: None,
            loading: false,
            error: false,
            result_items: Vec::new(),
            generation: 0,
        }
    }
}

impl QuerySession {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn last_page_number(&self) -> u32 {
        self.last_page_number
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> bool {
        self.error
    }

    pub fn result_items(&self) -> &[ExhibitionRecord] {
        &self.result_items
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether the page actually changed; only a change warrants a fetch.
    pub fn set_page_number(&mut self, page_number: u32) -> bool {
        let page_number = self.normalize_page(Some(page_number));
        if page_number == self.page_number {
            return false;
        }
        self.page_number = page_number;
        true
    }

    /// Missing or zero pages map to 1, anything past the end to the last page.
    pub fn normalize_page(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => 1,
            Some(page) => page.min(self.last_page_number.max(1)),
        }
    }

    /// Direction of the single global sort toggle.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort
            .map(|spec| spec.direction)
            .unwrap_or(SortDirection::Asc)
    }

    /// Flips the toggle and aims it at the field backing `column`.
    pub fn next_sort(&self, column: ColumnId) -> SortSpec {
        SortSpec {
            field: column.sort_field(),
            direction: self.sort_direction().flipped(),
        }
    }

    pub(crate) fn start_fetch(
        &mut self,
        page_number: u32,
        search_query: String,
        sort: Option<SortSpec>,
    ) -> u64 {
        self.set_page_number(page_number);
        self.search_query = search_query;
        self.sort = sort;
        self.error = false;
        self.loading = true;
        self.generation += 1;
        self.generation
    }

    pub(crate) fn is_latest(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub(crate) fn apply_success(&mut self, response: SearchResponse) {
        self.result_items = response.data;
        self.last_page_number = response.pagination.total_pages.max(1);
        self.page_number = self.page_number.min(self.last_page_number);
        self.loading = false;
        self.error = false;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.loading = false;
        self.error = true;
    }
}
