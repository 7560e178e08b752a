//! State of one search/browse page.
//!
//! DESIGN
//! ======
//! The full list is fetched once; everything after that (term, filters,
//! sort, "load more") is answered by `registry::query::ListQuery` over the
//! records held here. The raw search box text is debounced before it
//! becomes the applied term.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use registry::PersonRecord;
use registry::query::{Debouncer, ListFilter, ListQuery, SearchKind, SortOrder};

#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    pub kind: SearchKind,
    pub records: Vec<PersonRecord>,
    pub query: ListQuery,
    /// Text in the search box; may run ahead of `query.term()`.
    pub term_input: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Manual retries after a failed load.
    pub retry_count: u32,
    debounce: Debouncer<String>,
}

impl SearchState {
    pub fn new(kind: SearchKind, page_size: usize) -> Self {
        Self {
            kind,
            records: Vec::new(),
            query: ListQuery::new(page_size),
            term_input: String::new(),
            loading: false,
            error: None,
            retry_count: 0,
            debounce: Debouncer::default(),
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Begin a load triggered from the error banner.
    pub fn begin_retry(&mut self) {
        self.retry_count += 1;
        self.begin_load();
    }

    pub fn finish_load(&mut self, result: Result<Vec<PersonRecord>, String>) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
                self.retry_count = 0;
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// Lines for the error banner; after a manual retry the failure notes
    /// which attempt it was.
    pub fn error_lines(&self) -> Vec<String> {
        match (&self.error, self.retry_count) {
            (None, _) => Vec::new(),
            (Some(message), 0) => vec![message.clone()],
            (Some(message), n) => vec![format!("{message} (manual retry {n})")],
        }
    }

    /// Record a keystroke; returns the ticket to settle after the debounce delay.
    pub fn type_term(&mut self, input: String) -> u64 {
        self.term_input.clone_from(&input);
        self.debounce.schedule(input)
    }

    /// Apply the debounced term if `ticket` is still the latest keystroke.
    pub fn settle_term(&mut self, ticket: u64) -> bool {
        match self.debounce.settle(ticket) {
            Some(term) => {
                self.query.set_term(&term);
                true
            }
            None => false,
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.set_sort(sort);
    }

    pub fn update_filter(&mut self, edit: impl FnOnce(&mut ListFilter)) {
        self.query.update_filter(edit);
    }

    pub fn filtered_count(&self) -> usize {
        self.query.apply(&self.records).len()
    }

    /// The revealed page of filtered, sorted records.
    pub fn visible_records(&self) -> Vec<PersonRecord> {
        let filtered = self.query.apply(&self.records);
        self.query.page(&filtered).iter().map(|r| (*r).clone()).collect()
    }

    pub fn has_more(&self) -> bool {
        self.query.has_more(self.filtered_count())
    }

    pub fn load_more(&mut self) -> bool {
        let total = self.filtered_count();
        self.query.load_more(total)
    }

    /// e.g. `"Showing 20 of 45"`, or an empty-state message.
    pub fn summary(&self) -> String {
        let total = self.filtered_count();
        if total == 0 {
            if self.records.is_empty() {
                return "No records yet".to_owned();
            }
            return "No matches".to_owned();
        }
        format!("Showing {} of {total}", self.query.visible().min(total))
    }
}
