//! Registration fallback policy.
//!
//! DESIGN
//! ======
//! A registration walks an ordered list of strategies until one yields a
//! usable answer. A circuit breaker counts exhausted walks and skips the
//! network entirely after repeated ones, and an in-flight set rejects double submits of the same person.
//!
//! TRADE-OFFS
//! ==========
//! When every strategy fails the caller still gets a record back, marked
//! `Provisional`, so the operator's data is never silently lost; the UI is
//! expected to render that outcome as a warning.

#[cfg(test)]
#[path = "fallback_test.rs"]
mod fallback_test;

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::payload::FormPayload;
use crate::record::{Category, PersonRecord};

pub const PRIMARY_PATH: &str = "/register/upload";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Primary,
    /// Repeat of the primary upload.
    PrimaryRetry { attempt: u32 },
    /// Per-category create endpoint; only children and disabled persons have one.
    CategoryEndpoint,
}

impl Strategy {
    /// Endpoint for this strategy, or `None` when it does not apply to `category`.
    #[must_use]
    pub fn path(self, category: Category) -> Option<&'static str> {
        match self {
            Self::Primary | Self::PrimaryRetry { .. } => Some(PRIMARY_PATH),
            Self::CategoryEndpoint => match category {
                Category::Child => Some("/children"),
                Category::Disabled => Some("/disabled"),
                Category::Man | Category::Woman => None,
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary upload"),
            Self::PrimaryRetry { attempt } => write!(f, "upload retry #{attempt}"),
            Self::CategoryEndpoint => f.write_str("category endpoint"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub strategies: Vec<Strategy>,
    /// Pause between two strategies.
    pub retry_delay_ms: u64,
}

impl FallbackPolicy {
    /// Primary upload, then the category endpoint where one exists, then two
    /// more upload attempts.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let strategies = [
            Strategy::Primary,
            Strategy::CategoryEndpoint,
            Strategy::PrimaryRetry { attempt: 1 },
            Strategy::PrimaryRetry { attempt: 2 },
        ]
        .into_iter()
        .filter(|strategy| strategy.path(category).is_some())
        .collect();
        Self { strategies, retry_delay_ms: 500 }
    }
}

/// Consecutive-failure breaker driven by caller-supplied wall time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitBreaker {
    pub failure_threshold: u32,
    pub open_ms: u64,
    failure_count: u32,
    open_until: Option<u64>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(3, 30_000)
    }
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(failure_threshold: u32, open_ms: u64) -> Self {
        Self { failure_threshold: failure_threshold.max(1), open_ms, failure_count: 0, open_until: None }
    }

    /// Whether calls should be skipped at `now_ms`. An expired window
    /// half-opens the breaker: one more failure re-opens it immediately.
    pub fn is_open(&mut self, now_ms: u64) -> bool {
        match self.open_until {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.open_until = None;
                self.failure_count = self.failure_threshold.saturating_sub(1);
                false
            }
            None => false,
        }
    }

    pub fn record_success(&mut self) {
        self.failure_count = 0;
        self.open_until = None;
    }

    pub fn record_failure(&mut self, now_ms: u64) {
        self.failure_count = self.failure_count.saturating_add(1);
        if self.failure_count >= self.failure_threshold {
            self.open_until = Some(now_ms.saturating_add(self.open_ms));
        }
    }

    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProvisionalReason {
    /// The server accepted the upload but sent back nothing usable.
    EmptyResponse,
    /// Every strategy failed, or the breaker was open; carries the last error.
    Exhausted(String),
}

impl fmt::Display for ProvisionalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResponse => f.write_str("the server did not confirm the record"),
            Self::Exhausted(err) => write!(f, "the server could not be reached ({err})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegisterOutcome {
    Confirmed(PersonRecord),
    Provisional { record: PersonRecord, reason: ProvisionalReason },
}

impl RegisterOutcome {
    #[must_use]
    pub fn record(&self) -> &PersonRecord {
        match self {
            Self::Confirmed(record) | Self::Provisional { record, .. } => record,
        }
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Build the stand-in record for an unconfirmed registration from the
/// submitted fields. Its id is `temp-<now_ms>`.
#[must_use]
pub fn provisional_record(payload: &FormPayload, now_ms: u64) -> PersonRecord {
    let mut map = payload
        .fields
        .iter()
        .filter(|(key, _)| key != crate::payload::JSON_BLOB_FIELD)
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect::<Map<_, _>>();
    map.insert("id".to_owned(), Value::String(format!("temp-{now_ms}")));
    serde_json::from_value(Value::Object(map)).unwrap_or_else(|err| {
        log::warn!("provisional record fell back to id only: {err}");
        PersonRecord { id: format!("temp-{now_ms}"), ..PersonRecord::default() }
    })
}

/// Submission keys currently in flight.
#[derive(Clone, Debug, Default)]
pub struct PendingSubmissions {
    keys: BTreeSet<String>,
}

impl PendingSubmissions {
    /// Claim `key`. Returns `false` if it is already in flight.
    pub fn begin(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_owned())
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}
