use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::json;

use super::*;
use crate::storage::MemoryStore;
use crate::wizard::Wizard;

#[derive(Default)]
struct FakeTransport {
    responses: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
    sleeps: RefCell<Vec<u64>>,
}

impl FakeTransport {
    fn reply(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    fn fail(self, err: TransportError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }

    async fn sleep(&self, ms: u64) {
        self.sleeps.borrow_mut().push(ms);
    }
}

fn api(transport: FakeTransport) -> RegistryApi<FakeTransport, MemoryStore> {
    RegistryApi::new(transport, MemoryStore::new(), ClientConfig::default())
}

fn man_draft() -> FormDraft {
    let mut wizard = Wizard::new(crate::schemas::man());
    wizard.set_text("name", "Omar Hassan");
    wizard.set_text("national_id", "29004120101234");
    wizard.set_text("travel_date", "2024-01-02");
    wizard.draft().clone()
}

fn photo() -> PhotoPart {
    PhotoPart {
        upload: PhotoUpload { file_name: "face.jpg".to_owned(), content_type: "image/jpeg".to_owned(), size_bytes: 3 },
        bytes: vec![1, 2, 3],
    }
}

#[test]
fn error_message_prefers_detail_then_message_then_error() {
    assert_eq!(extract_error_message(r#"{"detail":"Not found"}"#, 404), "Not found");
    assert_eq!(
        extract_error_message(r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#, 422),
        "field required"
    );
    assert_eq!(extract_error_message(r#"{"message":"bad","error":"worse"}"#, 400), "bad");
    assert_eq!(extract_error_message(r#"{"error":"worse"}"#, 400), "worse");
    assert_eq!(extract_error_message("<html>", 502), "Request failed with status 502");
    assert_eq!(extract_error_message("", 500), "Request failed with status 500");
}

#[test]
fn count_accepts_three_shapes() {
    assert_eq!(parse_count(r#"{"count": 12}"#).unwrap(), 12);
    assert_eq!(parse_count(r#"{"total": 5}"#).unwrap(), 5);
    assert_eq!(parse_count("7").unwrap(), 7);
    assert!(parse_count(r#"{"n": 1}"#).is_err());
}

#[test]
fn recognition_result_shapes() {
    let hit = parse_recognition(r#"{"user":{"id":3,"name":"Omar"},"confidence":0.93}"#).unwrap();
    assert!(hit.matched);
    assert_eq!(hit.confidence, Some(0.93));
    assert_eq!(hit.record.unwrap().id, "3");

    let miss = parse_recognition(r#"{"matched":false,"message":"No match found"}"#).unwrap();
    assert!(!miss.matched);
    assert!(miss.record.is_none());
    assert_eq!(miss.message.as_deref(), Some("No match found"));
}

#[test]
fn data_url_prefix_is_stripped() {
    assert_eq!(strip_data_url("data:image/jpeg;base64,AAAA"), "AAAA");
    assert_eq!(strip_data_url("AAAA"), "AAAA");
}

#[tokio::test]
async fn bearer_token_and_timeout_are_attached() {
    let api = api(FakeTransport::default().reply(200, r#"{"status":"ok"}"#));
    api.store().set(TOKEN_KEY, "secret");
    api.health().await.unwrap();
    let requests = api.transport().requests.borrow();
    assert_eq!(requests[0].bearer.as_deref(), Some("secret"));
    assert_eq!(requests[0].timeout_ms, 30_000);
    assert_eq!(requests[0].path, "/health");
}

#[tokio::test]
async fn non_success_status_becomes_http_error() {
    let api = api(FakeTransport::default().reply(404, r#"{"detail":"User not found"}"#));
    let err = api.get_user("9").await.unwrap_err();
    assert_eq!(err, ApiError::Http { status: 404, message: "User not found".to_owned() });
}

#[tokio::test]
async fn transport_errors_map_across() {
    let api = api(FakeTransport::default().fail(TransportError::Timeout));
    assert_eq!(api.count().await.unwrap_err(), ApiError::Timeout);
}

#[tokio::test]
async fn category_routes() {
    let transport = FakeTransport::default().reply(200, "[]").reply(200, "[]").reply(200, "[]").reply(200, "");
    let api = api(transport);
    api.category(Category::Woman).get_all().await.unwrap();
    api.category(Category::Child).get_all().await.unwrap();
    api.category(Category::Disabled).get_all().await.unwrap();
    api.category(Category::Child).delete("4").await.unwrap();

    let requests = api.transport().requests.borrow();
    assert_eq!(requests[0].path, "/search");
    assert_eq!(requests[0].query, vec![("category".to_owned(), "female".to_owned())]);
    assert_eq!(requests[1].path, "/children");
    assert_eq!(requests[2].path, "/disabled");
    assert_eq!(requests[3].path, "/children/4");
    assert_eq!(requests[3].method, Method::Delete);
}

#[tokio::test]
async fn register_confirms_on_record_body() {
    let api = api(FakeTransport::default().reply(201, r#"{"id": 41, "name": "Omar Hassan"}"#));
    let outcome = api.register_user(Category::Man, &man_draft(), Some(&photo()), 1_000).await.unwrap();
    assert_eq!(outcome, RegisterOutcome::Confirmed(PersonRecord {
        id: "41".to_owned(),
        name: Some("Omar Hassan".to_owned()),
        ..PersonRecord::default()
    }));

    let requests = api.transport().requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/register/upload");
    assert_eq!(requests[0].timeout_ms, 60_000);
    let RequestBody::Multipart { fields, photo } = &requests[0].body else {
        panic!("expected multipart body");
    };
    assert!(photo.is_some());
    assert_eq!(fields.get("form_type"), Some("man"));
    assert!(!fields.contains("travel_date"));
}

#[tokio::test]
async fn empty_success_body_is_provisional_and_not_retried() {
    let api = api(FakeTransport::default().reply(200, ""));
    let outcome = api.register_user(Category::Man, &man_draft(), Some(&photo()), 1_700_000_000_000).await.unwrap();
    let RegisterOutcome::Provisional { record, reason } = outcome else {
        panic!("expected provisional outcome");
    };
    assert_eq!(reason, ProvisionalReason::EmptyResponse);
    assert_eq!(record.id, "temp-1700000000000");
    assert_eq!(record.display_name(), "Omar Hassan");
    assert_eq!(api.transport().requests.borrow().len(), 1);
    assert!(api.store().get("temp_registration_temp-1700000000000").is_some());
}

#[tokio::test]
async fn child_registration_walks_the_fallback_chain() {
    let transport = FakeTransport::default()
        .reply(500, "")
        .fail(TransportError::Network("offline".to_owned()))
        .reply(200, r#"{"user": {"id": "c-7", "full_name": "Yara"}}"#);
    let api = api(transport);
    let mut draft = FormDraft::default();
    draft.set_text("full_name", "Yara");
    let outcome = api.register_user(Category::Child, &draft, None, 5).await.unwrap();
    assert!(outcome.is_confirmed());
    assert_eq!(outcome.record().id, "c-7");
    assert_eq!(api.transport().paths(), vec!["/register/upload", "/children", "/register/upload"]);
    assert_eq!(*api.transport().sleeps.borrow(), vec![500, 500]);
}

#[tokio::test]
async fn exhausted_chain_yields_provisional_with_last_error() {
    let transport = FakeTransport::default().reply(500, "").reply(502, "").reply(503, r#"{"detail":"down"}"#);
    let api = api(transport);
    let outcome = api.register_user(Category::Woman, &man_draft(), None, 9).await.unwrap();
    assert_eq!(
        outcome,
        RegisterOutcome::Provisional {
            record: outcome.record().clone(),
            reason: ProvisionalReason::Exhausted("down".to_owned()),
        }
    );
    assert_eq!(api.transport().requests.borrow().len(), 3);
}

#[tokio::test]
async fn child_registration_reaches_the_last_strategy() {
    let transport = FakeTransport::default()
        .reply(500, "")
        .reply(500, "")
        .reply(500, "")
        .reply(200, r#"{"id": "c-9"}"#);
    let api = api(transport);
    let mut draft = FormDraft::default();
    draft.set_text("full_name", "Yara");
    let outcome = api.register_user(Category::Child, &draft, None, 5).await.unwrap();
    assert!(outcome.is_confirmed());
    assert_eq!(outcome.record().id, "c-9");
    assert_eq!(
        api.transport().paths(),
        vec!["/register/upload", "/children", "/register/upload", "/register/upload"]
    );
}

async fn exhaust_four_strategy_chain(category: Category, endpoint: &str) {
    let transport = FakeTransport::default()
        .reply(500, "")
        .fail(TransportError::Network("offline".to_owned()))
        .reply(502, "")
        .reply(503, r#"{"detail":"maintenance"}"#);
    let api = api(transport);
    let mut draft = FormDraft::default();
    draft.set_text("full_name", "Salma");
    let outcome = api.register_user(category, &draft, None, 7).await.unwrap();
    assert_eq!(
        outcome,
        RegisterOutcome::Provisional {
            record: outcome.record().clone(),
            reason: ProvisionalReason::Exhausted("maintenance".to_owned()),
        }
    );
    assert_eq!(api.transport().paths(), vec!["/register/upload", endpoint, "/register/upload", "/register/upload"]);
    assert_eq!(*api.transport().sleeps.borrow(), vec![500, 500, 500]);
    assert!(api.store().get("temp_registration_temp-7").is_some());
}

#[tokio::test]
async fn exhausted_child_chain_tries_every_strategy() {
    exhaust_four_strategy_chain(Category::Child, "/children").await;
}

#[tokio::test]
async fn exhausted_disabled_chain_tries_every_strategy() {
    exhaust_four_strategy_chain(Category::Disabled, "/disabled").await;
}

#[tokio::test]
async fn open_breaker_skips_the_network() {
    let transport = FakeTransport::default();
    for _ in 0..9 {
        transport.responses.borrow_mut().push_back(Ok(ApiResponse { status: 500, body: String::new() }));
    }
    let api = api(transport);
    for now_ms in [0, 1, 2] {
        let outcome = api.register_user(Category::Man, &man_draft(), None, now_ms).await.unwrap();
        assert!(!outcome.is_confirmed());
    }
    assert_eq!(api.transport().requests.borrow().len(), 9);

    let outcome = api.register_user(Category::Man, &man_draft(), None, 10).await.unwrap();
    assert_eq!(
        outcome,
        RegisterOutcome::Provisional {
            record: outcome.record().clone(),
            reason: ProvisionalReason::Exhausted(ApiError::CircuitOpen.to_string()),
        }
    );
    assert_eq!(api.transport().requests.borrow().len(), 9);
}

#[tokio::test]
async fn validation_errors_are_returned_not_masked() {
    let api = api(FakeTransport::default().reply(422, r#"{"detail":[{"msg":"national_id invalid"}]}"#));
    let err = api.register_user(Category::Man, &man_draft(), None, 0).await.unwrap_err();
    assert_eq!(err, ApiError::Http { status: 422, message: "national_id invalid".to_owned() });
    assert_eq!(api.transport().requests.borrow().len(), 1);
}

#[tokio::test]
async fn duplicate_submission_is_rejected_while_in_flight() {
    let api = api(FakeTransport::default().reply(200, r#"{"id": 1}"#));
    let draft = man_draft();
    let key = submission_key(Category::Man, &draft);
    api.pending.borrow_mut().begin(&key);
    let err = api.register_user(Category::Man, &draft, None, 0).await.unwrap_err();
    assert_eq!(err, ApiError::DuplicateSubmission);
    api.pending.borrow_mut().finish(&key);
    assert!(api.register_user(Category::Man, &draft, None, 0).await.is_ok());
    assert!(!api.pending.borrow().contains(&key));
}

#[tokio::test]
async fn load_list_retries_then_caches() {
    let transport = FakeTransport::default()
        .fail(TransportError::Network("offline".to_owned()))
        .reply(500, "")
        .reply(200, r#"[{"id": 1, "name": "Omar"}]"#);
    let api = api(transport);
    let session = MemoryStore::new();
    let cache = ListCache::new(session.clone());
    let records = api.load_list(SearchKind::All, false, RetryPolicy::default(), &cache).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(*api.transport().sleeps.borrow(), vec![1000, 2000]);
    assert!(session.get("searchData").is_some());
    assert!(api.store().get("searchData").is_none());

    let cached = api.load_list(SearchKind::All, false, RetryPolicy::default(), &cache).await.unwrap();
    assert_eq!(cached, records);
    assert_eq!(api.transport().requests.borrow().len(), 3);
}

#[tokio::test]
async fn load_list_reports_error_after_final_retry() {
    let transport = FakeTransport::default().reply(500, "").reply(500, "").reply(500, "").reply(500, "");
    let api = api(transport);
    let session = MemoryStore::new();
    session.set("childrenSearchData", "[]");
    let cache = ListCache::new(session.clone());
    let err = api.load_list(SearchKind::Children, true, RetryPolicy::default(), &cache).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(*api.transport().sleeps.borrow(), vec![1000, 2000, 3000]);
    assert_eq!(api.transport().requests.borrow().len(), 4);
    assert!(session.get("childrenSearchData").is_none());
}

#[tokio::test]
async fn recognize_base64_posts_json_without_prefix() {
    let api = api(FakeTransport::default().reply(200, r#"{"matched": false}"#));
    let result = api.recognize_face_base64("data:image/png;base64,QUJD").await.unwrap();
    assert!(!result.matched);
    let requests = api.transport().requests.borrow();
    assert_eq!(requests[0].body, RequestBody::Json(json!({ "image": "QUJD" })));
}
