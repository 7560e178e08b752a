use super::*;

#[test]
fn status_label_reports_offline_backend() {
    assert_eq!(status_label(&BackendStatus::default()), "Backend offline");
}

#[test]
fn status_label_pluralizes_the_count() {
    let one = BackendStatus { online: true, total_records: Some(1) };
    let many = BackendStatus { online: true, total_records: Some(42) };
    let unknown = BackendStatus { online: true, total_records: None };
    assert_eq!(status_label(&one), "1 person registered");
    assert_eq!(status_label(&many), "42 persons registered");
    assert_eq!(status_label(&unknown), "Backend online");
}
