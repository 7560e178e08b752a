//! Client-side filtering, sorting, and incremental pagination for list views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Search pages fetch the whole collection once and keep it in memory; every
//! keystroke, filter toggle, or scroll trigger is answered from here without
//! touching the network.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::BTreeSet;

use crate::record::{Category, PersonRecord};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Record fields the search box matches against.
pub const SEARCHABLE_FIELDS: &[&str] = &[
    "name",
    "full_name",
    "nickname",
    "national_id",
    "phone_number",
    "address",
    "guardian_name",
    "disability_type",
    "last_seen_location",
];

/// Which list a search page browses. Each kind has its own endpoint and cache slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchKind {
    All,
    Children,
    Disabilities,
}

impl SearchKind {
    /// Session-storage key of the cached list.
    #[must_use]
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::All => "searchData",
            Self::Children => "childrenSearchData",
            Self::Disabilities => "disabilitiesSearchData",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::All => "Search registry",
            Self::Children => "Missing children",
            Self::Disabilities => "Missing disabled persons",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    Newest,
    Oldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [Self::NameAsc, Self::NameDesc, Self::Newest, Self::Oldest];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|order| order.as_str() == raw).unwrap_or_default()
    }
}

/// Checkbox/select filters layered on top of the search term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Empty means every category.
    pub categories: BTreeSet<Category>,
    pub gender: Option<String>,
    pub disability_type: Option<String>,
    pub with_photo_only: bool,
}

impl ListFilter {
    #[must_use]
    pub fn accepts(&self, record: &PersonRecord) -> bool {
        if !self.categories.is_empty() && !record.category().is_some_and(|c| self.categories.contains(&c)) {
            return false;
        }
        if !field_equals(record.gender.as_deref(), self.gender.as_deref()) {
            return false;
        }
        if !field_equals(record.disability_type.as_deref(), self.disability_type.as_deref()) {
            return false;
        }
        if self.with_photo_only && record.image_ref().is_none() {
            return false;
        }
        true
    }
}

fn field_equals(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(wanted) => actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(wanted)),
    }
}

/// Case-insensitive substring match of `term` over [`SEARCHABLE_FIELDS`].
/// A blank term matches every record.
#[must_use]
pub fn matches(record: &PersonRecord, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    SEARCHABLE_FIELDS
        .iter()
        .filter_map(|key| record.field(key))
        .any(|value| value.to_lowercase().contains(&needle))
}

/// View state of one list page: applied term, filters, order, and how many
/// rows are revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    term: String,
    filter: ListFilter,
    sort: SortOrder,
    page_size: usize,
    visible: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self { term: String::new(), filter: ListFilter::default(), sort: SortOrder::default(), page_size, visible: page_size }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn set_term(&mut self, term: &str) {
        if self.term != term {
            self.term = term.to_owned();
            self.reset_window();
        }
    }

    pub fn set_filter(&mut self, filter: ListFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.reset_window();
        }
    }

    /// Edit the filter in place; resets pagination when it actually changes.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut ListFilter)) {
        let mut next = self.filter.clone();
        edit(&mut next);
        self.set_filter(next);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.sort != sort {
            self.sort = sort;
            self.reset_window();
        }
    }

    /// Filter then stably sort.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [PersonRecord]) -> Vec<&'a PersonRecord> {
        let mut out: Vec<&PersonRecord> = records
            .iter()
            .filter(|record| self.filter.accepts(record) && matches(record, &self.term))
            .collect();
        sort_records(&mut out, self.sort);
        out
    }

    /// The revealed prefix of an already filtered list.
    #[must_use]
    pub fn page<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        &filtered[..self.visible.min(filtered.len())]
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Reveal one more page. Returns whether anything new became visible.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.visible = (self.visible + self.page_size).min(total.max(self.page_size));
        true
    }

    fn reset_window(&mut self) {
        self.visible = self.page_size;
    }
}

fn sort_records(records: &mut [&PersonRecord], order: SortOrder) {
    match order {
        SortOrder::NameAsc => records.sort_by_key(|r| r.sort_name()),
        SortOrder::NameDesc => records.sort_by(|a, b| b.sort_name().cmp(&a.sort_name())),
        SortOrder::Newest => records.sort_by(|a, b| match (a.created_at.as_deref(), b.created_at.as_deref()) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortOrder::Oldest => records.sort_by(|a, b| match (a.created_at.as_deref(), b.created_at.as_deref()) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
    }
}

/// Generation-counted debounce: only the most recently scheduled value
/// survives its delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { generation: 0, pending: None }
    }
}

impl<T> Debouncer<T> {
    /// Record a new value; the returned ticket must be presented to
    /// [`Debouncer::settle`] after the delay.
    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(value);
        self.generation
    }

    /// Take the pending value if `ticket` is still the latest schedule.
    pub fn settle(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }
}
