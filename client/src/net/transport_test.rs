use super::*;

#[test]
fn readable_body_is_kept_with_its_status() {
    let response = into_response::<String>(201, Ok(r#"{"id": 3}"#.to_owned())).unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body, r#"{"id": 3}"#);
}

#[test]
fn unreadable_success_body_is_a_network_error() {
    let err = into_response(200, Err("stream aborted")).unwrap_err();
    assert_eq!(err, TransportError::Network("could not read response body: stream aborted".to_owned()));
}

#[test]
fn base_url_loses_trailing_slash() {
    let transport = BrowserTransport::new("https://example.test/api/");
    assert_eq!(transport.base_url, "https://example.test/api");
}
