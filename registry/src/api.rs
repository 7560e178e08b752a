//! Typed client for the registry backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page talks to the backend through [`RegistryApi`]. The HTTP stack
//! itself sits behind [`Transport`] so the browser (gloo-net), the host
//! (reqwest) and tests (an in-memory fake) share one request pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and undecodable bodies all map to
//! [`ApiError`]. Every failure is logged once, here, with method, path and
//! status; callers only decide how to present it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::fallback::{
    CircuitBreaker, FallbackPolicy, PendingSubmissions, ProvisionalReason, RegisterOutcome, Strategy,
    provisional_record,
};
use crate::payload::{FormPayload, PhotoUpload, build_payload, submission_key};
use crate::query::SearchKind;
use crate::record::{Category, ParseError, PersonRecord, parse_record, parse_record_list};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::schemas::schema_for;
use crate::storage::{KeyValueStore, ListCache, TOKEN_KEY, temp_registration_key};
use crate::wizard::FormDraft;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A photo attached to a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoPart {
    pub upload: PhotoUpload,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart { fields: FormPayload, photo: Option<PhotoPart> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, with a leading `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
    pub timeout_ms: u32,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: RequestBody::Empty, bearer: None, timeout_ms: 0 }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Absolute URL against `base`, without the query string.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

/// The HTTP stack under [`RegistryApi`].
///
/// Futures need not be `Send`; the browser runs them on `spawn_local`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;

    /// Wait `ms` milliseconds on the transport's timer.
    async fn sleep(&self, ms: u64);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("The request timed out")]
    Timeout,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("This registration is already being submitted")]
    DuplicateSubmission,
    #[error("The service is temporarily unavailable")]
    CircuitOpen,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Client errors that a retry cannot fix.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s) && s != 408 && s != 429)
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => Self::Network(msg),
            TransportError::Timeout => Self::Timeout,
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Human-readable message from an error body: `detail` (a string, or the
/// first `msg` of a validation list), then `message`, then `error`.
#[must_use]
pub fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        match map.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => return detail.clone(),
            Some(Value::Array(items)) => {
                if let Some(msg) = items.first().and_then(|item| item.get("msg")).and_then(Value::as_str) {
                    return msg.to_owned();
                }
            }
            _ => {}
        }
        for key in ["message", "error"] {
            if let Some(Value::String(text)) = map.get(key)
                && !text.trim().is_empty()
            {
                return text.clone();
            }
        }
    }
    format!("Request failed with status {status}")
}

/// Result of a face recognition call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub matched: bool,
    pub confidence: Option<f64>,
    pub record: Option<PersonRecord>,
    pub message: Option<String>,
}

/// Decode a `/recognize` response. The matched person may sit under `user`,
/// `record`, `person` or `match`; confidence under `confidence`,
/// `similarity` or `score`.
///
/// # Errors
///
/// Returns [`ParseError`] for non-JSON bodies or an undecodable record.
pub fn parse_recognition(body: &str) -> Result<RecognitionResult, ParseError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(map) = value else {
        return Err(ParseError::Shape("recognition result is not an object".to_owned()));
    };
    let record = ["user", "record", "person", "match"]
        .into_iter()
        .find_map(|key| map.get(key).filter(|v| v.is_object()).cloned())
        .map(serde_json::from_value::<PersonRecord>)
        .transpose()?;
    let matched = ["matched", "match_found", "found"]
        .into_iter()
        .find_map(|key| map.get(key).and_then(Value::as_bool))
        .unwrap_or(record.is_some());
    let confidence = ["confidence", "similarity", "score"]
        .into_iter()
        .find_map(|key| map.get(key).and_then(Value::as_f64));
    let message = ["message", "detail"]
        .into_iter()
        .find_map(|key| map.get(key).and_then(Value::as_str).map(str::to_owned));
    Ok(RecognitionResult { matched, confidence, record, message })
}

/// Decode `/count`: `{"count": n}`, `{"total": n}` or a bare number.
///
/// # Errors
///
/// Returns [`ParseError`] if no count can be found.
pub fn parse_count(body: &str) -> Result<u64, ParseError> {
    let value: Value = serde_json::from_str(body)?;
    let count = match &value {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.get("count").or_else(|| map.get("total")).and_then(Value::as_u64),
        _ => None,
    };
    count.ok_or_else(|| ParseError::Shape(format!("no count in {value}")))
}

/// Strip a `data:<mime>;base64,` prefix, leaving the raw base64 payload.
#[must_use]
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:")
        && let Some((_, payload)) = data.split_once(',')
    {
        return payload;
    }
    data
}

pub struct RegistryApi<T, S> {
    transport: T,
    store: S,
    config: ClientConfig,
    breaker: RefCell<CircuitBreaker>,
    pending: RefCell<PendingSubmissions>,
}

impl<T: Transport, S: KeyValueStore> RegistryApi<T, S> {
    pub fn new(transport: T, store: S, config: ClientConfig) -> Self {
        Self {
            transport,
            store,
            config,
            breaker: RefCell::new(CircuitBreaker::default()),
            pending: RefCell::new(PendingSubmissions::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request through the interceptors: bearer token from storage
    /// on the way out, status check and failure logging on the way back.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx status.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.bearer.is_none() {
            request.bearer = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        }
        if request.timeout_ms == 0 {
            request.timeout_ms = match request.body {
                RequestBody::Multipart { .. } => self.config.upload_timeout_ms,
                _ => self.config.request_timeout_ms,
            };
        }
        let method = request.method;
        let path = request.path.clone();
        log::debug!("{method} {path}");
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => {
                let message = extract_error_message(&response.body, response.status);
                log::warn!("{method} {path} failed with status {}: {message}", response.status);
                Err(ApiError::Http { status: response.status, message })
            }
            Err(err) => {
                log::warn!("{method} {path} failed: {err}");
                Err(err.into())
            }
        }
    }

    async fn get_json(&self, request: ApiRequest) -> Result<String, ApiError> {
        Ok(self.send(request).await?.body)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<Value, ApiError> {
        let body = self.get_json(ApiRequest::get("/health")).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an unrecognized body.
    pub async fn count(&self) -> Result<u64, ApiError> {
        let body = self.get_json(ApiRequest::get("/count")).await?;
        Ok(parse_count(&body)?)
    }

    /// Server-side search. A blank `query` lists everything.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an undecodable list.
    pub async fn search(&self, query: &str, category: Option<Category>) -> Result<Vec<PersonRecord>, ApiError> {
        let mut request = ApiRequest::get("/search");
        if !query.trim().is_empty() {
            request = request.with_query("q", query.trim());
        }
        if let Some(category) = category {
            request = request.with_query("category", category.query_value());
        }
        let body = self.get_json(request).await?;
        Ok(parse_record_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure; `Ok(None)` when the body is empty.
    pub async fn get_user(&self, id: &str) -> Result<Option<PersonRecord>, ApiError> {
        let body = self.get_json(ApiRequest::get(format!("/users/{id}"))).await?;
        Ok(parse_record(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::new(Method::Delete, format!("/users/{id}"))).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update_user(&self, id: &str, fields: Value) -> Result<Option<PersonRecord>, ApiError> {
        let request = ApiRequest::new(Method::Put, format!("/users/{id}")).with_body(RequestBody::Json(fields));
        let body = self.get_json(request).await?;
        Ok(parse_record(&body)?)
    }

    pub fn category(&self, category: Category) -> CategoryApi<'_, T, S> {
        CategoryApi { api: self, category }
    }

    /// One fetch of the list behind a search page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an undecodable list.
    pub async fn list(&self, kind: SearchKind) -> Result<Vec<PersonRecord>, ApiError> {
        match kind {
            SearchKind::All => self.search("", None).await,
            SearchKind::Children => self.category(Category::Child).get_all().await,
            SearchKind::Disabilities => self.category(Category::Disabled).get_all().await,
        }
    }

    /// List for a search page: served from `cache` unless `refresh` is set,
    /// otherwise fetched with backoff and written back to `cache`.
    ///
    /// # Errors
    ///
    /// Returns the last [`ApiError`] once every retry has failed.
    pub async fn load_list<C: KeyValueStore>(
        &self,
        kind: SearchKind,
        refresh: bool,
        policy: RetryPolicy,
        cache: &ListCache<C>,
    ) -> Result<Vec<PersonRecord>, ApiError> {
        if refresh {
            cache.invalidate(kind);
        } else if let Some(records) = cache.load(kind) {
            log::debug!("{} served from cache ({} records)", kind.cache_key(), records.len());
            return Ok(records);
        }
        let records = retry_with_backoff(policy, || self.list(kind), |ms| self.transport.sleep(ms)).await?;
        cache.store(kind, &records);
        Ok(records)
    }

    /// Register a person, walking the fallback strategies for `category`.
    ///
    /// Client errors (4xx) end the walk and are returned as-is. Any other
    /// failure moves to the next strategy. An open breaker skips the walk
    /// entirely, and an exhausted walk counts as one breaker failure. When no
    /// strategy succeeds the submitted
    /// data comes back as a [`RegisterOutcome::Provisional`] record, also
    /// backed up to storage.
    ///
    /// # Errors
    ///
    /// [`ApiError::DuplicateSubmission`] if the same person is already being
    /// submitted, or the client error the backend rejected the form with.
    pub async fn register_user(
        &self,
        category: Category,
        draft: &FormDraft,
        photo: Option<&PhotoPart>,
        now_ms: u64,
    ) -> Result<RegisterOutcome, ApiError> {
        let key = submission_key(category, draft);
        if !self.pending.borrow_mut().begin(&key) {
            log::warn!("duplicate submission blocked for {category}");
            return Err(ApiError::DuplicateSubmission);
        }
        let mut payload = build_payload(&schema_for(category), draft);
        payload.strip_problematic_fields();
        let result = self.register_with_fallback(category, &payload, photo, now_ms).await;
        self.pending.borrow_mut().finish(&key);
        result
    }

    async fn register_with_fallback(
        &self,
        category: Category,
        payload: &FormPayload,
        photo: Option<&PhotoPart>,
        now_ms: u64,
    ) -> Result<RegisterOutcome, ApiError> {
        if self.breaker.borrow_mut().is_open(now_ms) {
            log::warn!("circuit open, skipping registration for {category}");
            let reason = ProvisionalReason::Exhausted(ApiError::CircuitOpen.to_string());
            return Ok(self.provisional(payload, now_ms, reason));
        }

        let policy = FallbackPolicy::for_category(category);
        let mut last_error = None;
        for (index, strategy) in policy.strategies.iter().enumerate() {
            let Some(path) = strategy.path(category) else {
                continue;
            };
            if index > 0 {
                self.transport.sleep(policy.retry_delay_ms).await;
            }
            let request = ApiRequest::new(Method::Post, path).with_body(RequestBody::Multipart {
                fields: payload.clone(),
                photo: photo.cloned(),
            });
            match self.send(request).await {
                Ok(response) => {
                    self.breaker.borrow_mut().record_success();
                    return Ok(self.confirm_or_provisional(*strategy, payload, &response.body, now_ms));
                }
                Err(err) if err.is_client_error() => return Err(err),
                Err(err) => {
                    log::warn!("{strategy} failed: {err}");
                    last_error = Some(err);
                }
            }
        }

        // Counted once per exhausted walk, not per strategy.
        self.breaker.borrow_mut().record_failure(now_ms);
        let last_error = last_error.map_or_else(|| "no strategy applied".to_owned(), |err| err.to_string());
        Ok(self.provisional(payload, now_ms, ProvisionalReason::Exhausted(last_error)))
    }

    fn confirm_or_provisional(&self, strategy: Strategy, payload: &FormPayload, body: &str, now_ms: u64) -> RegisterOutcome {
        match parse_record(body) {
            Ok(Some(record)) => {
                log::info!("registered {} via {strategy}", record.id);
                RegisterOutcome::Confirmed(record)
            }
            Ok(None) => self.provisional(payload, now_ms, ProvisionalReason::EmptyResponse),
            Err(err) => {
                log::warn!("{strategy} returned an unusable body: {err}");
                self.provisional(payload, now_ms, ProvisionalReason::EmptyResponse)
            }
        }
    }

    fn provisional(&self, payload: &FormPayload, now_ms: u64, reason: ProvisionalReason) -> RegisterOutcome {
        let record = provisional_record(payload, now_ms);
        match serde_json::to_string(&record) {
            Ok(backup) => self.store.set(&temp_registration_key(&record.id), &backup),
            Err(err) => log::warn!("could not back up {}: {err}", record.id),
        }
        log::warn!("registration kept as {}: {reason}", record.id);
        RegisterOutcome::Provisional { record, reason }
    }

    /// Identify a face from an uploaded photo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an undecodable result.
    pub async fn recognize_face(&self, photo: &PhotoPart) -> Result<RecognitionResult, ApiError> {
        let request = ApiRequest::new(Method::Post, "/recognize").with_body(RequestBody::Multipart {
            fields: FormPayload::default(),
            photo: Some(photo.clone()),
        });
        let body = self.get_json(request).await?;
        Ok(parse_recognition(&body)?)
    }

    /// Identify a face from a base64 image, with or without a `data:` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an undecodable result.
    pub async fn recognize_face_base64(&self, data: &str) -> Result<RecognitionResult, ApiError> {
        let body = serde_json::json!({ "image": strip_data_url(data) });
        let request = ApiRequest::new(Method::Post, "/recognize").with_body(RequestBody::Json(body));
        let body = self.get_json(request).await?;
        Ok(parse_recognition(&body)?)
    }
}

/// CRUD over one category's collection.
pub struct CategoryApi<'a, T, S> {
    api: &'a RegistryApi<T, S>,
    category: Category,
}

impl<T: Transport, S: KeyValueStore> CategoryApi<'_, T, S> {
    fn collection(&self) -> &'static str {
        match self.category {
            Category::Man | Category::Woman => "/users",
            Category::Child => "/children",
            Category::Disabled => "/disabled",
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure or an undecodable list.
    pub async fn get_all(&self) -> Result<Vec<PersonRecord>, ApiError> {
        match self.category {
            Category::Man | Category::Woman => self.api.search("", Some(self.category)).await,
            Category::Child | Category::Disabled => {
                let body = self.api.get_json(ApiRequest::get(self.collection())).await?;
                Ok(parse_record_list(&body)?)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure; `Ok(None)` when the body is empty.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<PersonRecord>, ApiError> {
        let body = self.api.get_json(ApiRequest::get(format!("{}/{id}", self.collection()))).await?;
        Ok(parse_record(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn create(&self, fields: Value) -> Result<Option<PersonRecord>, ApiError> {
        let request = ApiRequest::new(Method::Post, self.collection()).with_body(RequestBody::Json(fields));
        let body = self.api.get_json(request).await?;
        Ok(parse_record(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update(&self, id: &str, fields: Value) -> Result<Option<PersonRecord>, ApiError> {
        let request =
            ApiRequest::new(Method::Put, format!("{}/{id}", self.collection())).with_body(RequestBody::Json(fields));
        let body = self.api.get_json(request).await?;
        Ok(parse_record(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.send(ApiRequest::new(Method::Delete, format!("{}/{id}", self.collection()))).await?;
        Ok(())
    }
}
