use super::*;
use crate::schemas;
use crate::wizard::Wizard;

fn filled_man() -> Wizard {
    let mut wizard = Wizard::new(schemas::man());
    wizard.set_text("name", "Omar Hassan");
    wizard.set_text("date_of_birth", "1990-04-12");
    wizard.set_text("national_id", "29004120101234");
    wizard.set_text("address", "12 Nile St, Cairo");
    wizard.set_text("phone_number", "01001234567");
    wizard.set_text("last_seen_location", "Ramses station");
    wizard.set_flag("has_vehicle", true);
    wizard.set_text("vehicle_model", "Lada");
    wizard.set_text("license_plate", "ABC 123");
    wizard.set_text("travel_date", "2024-01-02");
    wizard
}

#[test]
fn payload_contains_every_required_field_plus_form_type_and_blob() {
    let wizard = filled_man();
    let payload = build_payload(wizard.schema(), wizard.draft());
    for spec in wizard.schema().fields().filter(|f| f.required && f.kind != FieldKind::Photo) {
        assert!(payload.contains(spec.key), "missing {}", spec.key);
    }
    assert_eq!(payload.get("form_type"), Some("man"));
    assert!(payload.contains(JSON_BLOB_FIELD));
    assert_eq!(payload.fields.last().map(|(k, _)| k.as_str()), Some(JSON_BLOB_FIELD));
}

#[test]
fn booleans_stringify_as_one_and_zero_and_dates_pass_through() {
    let wizard = filled_man();
    let payload = build_payload(wizard.schema(), wizard.draft());
    assert_eq!(payload.get("has_vehicle"), Some("1"));
    assert_eq!(payload.get("has_criminal_record"), Some("0"));
    assert_eq!(payload.get("date_of_birth"), Some("1990-04-12"));
}

#[test]
fn json_blob_duplicates_the_draft_with_real_booleans() {
    let wizard = filled_man();
    let payload = build_payload(wizard.schema(), wizard.draft());
    let blob = payload.json_blob().unwrap();
    assert_eq!(blob.get("name"), Some(&Value::String("Omar Hassan".to_owned())));
    assert_eq!(blob.get("has_vehicle"), Some(&Value::Bool(true)));
    assert_eq!(blob.get("form_type"), Some(&Value::String("man".to_owned())));
}

#[test]
fn strip_problematic_fields_cleans_parts_and_blob() {
    let wizard = filled_man();
    let mut payload = build_payload(wizard.schema(), wizard.draft());
    assert_eq!(payload.get("travel_date"), Some("2024-01-02"));
    payload.strip_problematic_fields();
    for key in PROBLEMATIC_FIELDS {
        assert!(!payload.contains(key), "{key} still present");
        assert!(!payload.json_blob().unwrap().contains_key(*key));
    }
    assert_eq!(payload.get("name"), Some("Omar Hassan"));
}

#[test]
fn to_json_flattens_fields_without_the_blob() {
    let wizard = filled_man();
    let payload = build_payload(wizard.schema(), wizard.draft());
    let json = payload.to_json();
    assert_eq!(json["name"], "Omar Hassan");
    assert_eq!(json["has_vehicle"], "1");
    assert!(json.get(JSON_BLOB_FIELD).is_none());
}

#[test]
fn outer_whitespace_is_trimmed_but_inner_text_kept() {
    let mut wizard = filled_man();
    wizard.set_text("address", "  12  Nile St  ");
    let payload = build_payload(wizard.schema(), wizard.draft());
    assert_eq!(payload.get("address"), Some("12  Nile St"));
}

#[test]
fn validate_photo_accepts_supported_images() {
    let photo = PhotoUpload { file_name: "a.PNG".to_owned(), content_type: "image/PNG".to_owned(), size_bytes: 10 };
    assert_eq!(validate_photo(&photo), Ok(()));
}

#[test]
fn validate_photo_rejects_wrong_type_empty_and_oversized_files() {
    let mut photo = PhotoUpload { file_name: "a.gif".to_owned(), content_type: "image/gif".to_owned(), size_bytes: 10 };
    assert_eq!(validate_photo(&photo), Err(PhotoError::UnsupportedType("image/gif".to_owned())));

    photo.content_type = "image/jpeg".to_owned();
    photo.size_bytes = 0;
    assert_eq!(validate_photo(&photo), Err(PhotoError::Empty));

    photo.size_bytes = MAX_PHOTO_BYTES + 1;
    assert!(matches!(validate_photo(&photo), Err(PhotoError::TooLarge { .. })));
}

#[test]
fn submission_key_normalizes_identity_fields() {
    let wizard = filled_man();
    assert_eq!(
        submission_key(Category::Man, wizard.draft()),
        "man|omar hassan|29004120101234|01001234567"
    );
}

#[test]
fn submission_key_uses_child_spellings() {
    let mut wizard = Wizard::new(schemas::child());
    wizard.set_text("full_name", " Yara ");
    wizard.set_text("guardian_phone", "0111");
    assert_eq!(submission_key(Category::Child, wizard.draft()), "child|yara||0111");
}
