//! Registry calls used by pages.
//!
//! One `RegistryApi` per browser tab holds the circuit breaker and the
//! in-flight submission set; pages reach it through these functions.
//!
//! ERROR HANDLING
//! ==============
//! Errors come back as `ApiError` for the page to turn into a banner or
//! toast; logging already happened inside the registry client.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use registry::api::{PhotoPart, RecognitionResult};
use registry::query::SearchKind;
use registry::retry::RetryPolicy;
use registry::storage::ListCache;
use registry::wizard::FormDraft;
use registry::{ApiError, Category, ClientConfig, PersonRecord, RegisterOutcome, RegistryApi};

use super::transport::BrowserTransport;
use crate::util::storage::BrowserStore;

pub type ClientApi = RegistryApi<BrowserTransport, BrowserStore>;

thread_local! {
    static API: Rc<ClientApi> = {
        let config = ClientConfig::from_build_env();
        Rc::new(RegistryApi::new(BrowserTransport::new(&config.api_base_url), BrowserStore::Local, config))
    };
}

/// The tab-wide API client.
pub fn client() -> Rc<ClientApi> {
    API.with(Rc::clone)
}

/// Submit a finished registration through the fallback chain.
///
/// # Errors
///
/// See [`RegistryApi::register_user`].
pub async fn register(category: Category, draft: FormDraft, photo: Option<PhotoPart>) -> Result<RegisterOutcome, ApiError> {
    let api = client();
    api.register_user(category, &draft, photo.as_ref(), crate::util::time::now_ms()).await
}

/// List behind a search page, cached in session storage.
///
/// # Errors
///
/// Returns the last error once every retry has failed.
pub async fn load_list(kind: SearchKind, refresh: bool) -> Result<Vec<PersonRecord>, ApiError> {
    let api = client();
    let cache = ListCache::new(BrowserStore::Session);
    api.load_list(kind, refresh, RetryPolicy::default(), &cache).await
}

/// Drop every cached list so the next visit refetches; used after edits.
pub fn invalidate_lists() {
    let cache = ListCache::new(BrowserStore::Session);
    for kind in [SearchKind::All, SearchKind::Children, SearchKind::Disabilities] {
        cache.invalidate(kind);
    }
}

/// # Errors
///
/// Returns [`ApiError`] on failure.
pub async fn fetch_person(id: &str) -> Result<Option<PersonRecord>, ApiError> {
    client().get_user(id).await
}

/// Delete through the category collection when the record says which one it
/// belongs to, otherwise through `/users/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] on failure.
pub async fn delete_person(record: &PersonRecord) -> Result<(), ApiError> {
    let api = client();
    let result = match record.category() {
        Some(category @ (Category::Child | Category::Disabled)) => api.category(category).delete(&record.id).await,
        _ => api.delete_user(&record.id).await,
    };
    if result.is_ok() {
        invalidate_lists();
    }
    result
}

/// # Errors
///
/// Returns [`ApiError`] on failure.
pub async fn identify_upload(photo: PhotoPart) -> Result<RecognitionResult, ApiError> {
    client().recognize_face(&photo).await
}

/// # Errors
///
/// Returns [`ApiError`] on failure.
pub async fn identify_capture(data_url: String) -> Result<RecognitionResult, ApiError> {
    client().recognize_face_base64(&data_url).await
}

/// Backend reachability plus record count for the home page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendStatus {
    pub online: bool,
    pub total_records: Option<u64>,
}

pub async fn backend_status() -> BackendStatus {
    let api = client();
    let online = api.health().await.is_ok();
    let total_records = if online { api.count().await.ok() } else { None };
    BackendStatus { online, total_records }
}

/// Label for the home page's record counter.
pub fn status_label(status: &BackendStatus) -> String {
    match (status.online, status.total_records) {
        (false, _) => "Backend offline".to_owned(),
        (true, Some(1)) => "1 person registered".to_owned(),
        (true, Some(n)) => format!("{n} persons registered"),
        (true, None) => "Backend online".to_owned(),
    }
}
