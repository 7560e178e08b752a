use super::*;

#[test]
fn rows_follow_the_category_form() {
    let record = PersonRecord {
        id: "5".to_owned(),
        full_name: Some("Yara".to_owned()),
        guardian_name: Some("Mona".to_owned()),
        ..PersonRecord::default()
    };
    let rows = detail_rows(&record);
    assert_eq!(rows[0], ("Full name", "Yara".to_owned()));
    assert!(rows.contains(&("Guardian name", "Mona".to_owned())));
    assert!(rows.iter().all(|(label, _)| *label != "Photo"));
    assert_eq!(rows.last(), Some(&("Registered", "N/A".to_owned())));
}

#[test]
fn unknown_category_uses_generic_rows() {
    let record = PersonRecord { id: "5".to_owned(), name: Some("Omar".to_owned()), ..PersonRecord::default() };
    let rows = detail_rows(&record);
    assert_eq!(rows[0], ("Name", "Omar".to_owned()));
    assert_eq!(rows[1], ("Full name", "N/A".to_owned()));
}

#[test]
fn boolean_extras_render_as_yes_no() {
    let mut record = PersonRecord { id: "5".to_owned(), form_type: Some("man".to_owned()), ..PersonRecord::default() };
    record.extra.insert("has_vehicle".to_owned(), serde_json::Value::Bool(true));
    let rows = detail_rows(&record);
    let vehicle = rows.iter().find(|(label, _)| label.contains("vehicle")).map(|(_, v)| v.as_str());
    assert_eq!(vehicle, Some("Yes"));
}
