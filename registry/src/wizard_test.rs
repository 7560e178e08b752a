use super::*;
use crate::schemas;

fn photo() -> PhotoUpload {
    PhotoUpload { file_name: "face.jpg".to_owned(), content_type: "image/jpeg".to_owned(), size_bytes: 2048 }
}

fn fill_adult_personal(wizard: &mut Wizard) {
    wizard.set_text("name", "Omar Hassan");
    wizard.set_text("date_of_birth", "1990-04-12");
    wizard.set_text("national_id", "29004120101234");
    wizard.set_text("address", "12 Nile St, Cairo");
}

fn fill_adult(wizard: &mut Wizard) {
    fill_adult_personal(wizard);
    wizard.set_text("phone_number", "+20 100 123 4567");
    wizard.set_text("last_seen_location", "Ramses station");
    wizard.set_photo(Some(photo()));
}

#[test]
fn new_wizard_starts_on_first_section_with_blank_draft() {
    let wizard = Wizard::new(schemas::man());
    assert_eq!(wizard.current_section(), 1);
    assert_eq!(wizard.section_count(), 4);
    assert_eq!(wizard.draft().text("name"), "");
    assert_eq!(wizard.draft().get("has_vehicle"), Some(&FieldValue::Flag(false)));
    assert!(wizard.draft().get("photo").is_none());
    assert_eq!(wizard.status(), &WizardStatus::Editing);
}

#[test]
fn next_section_lists_every_missing_required_field() {
    let mut wizard = Wizard::new(schemas::man());
    assert!(!wizard.next_section());
    assert_eq!(wizard.current_section(), 1);
    assert_eq!(
        wizard.errors(),
        &[
            "Full name is required".to_owned(),
            "Date of birth is required".to_owned(),
            "National ID is required".to_owned(),
            "Address is required".to_owned(),
        ]
    );
}

#[test]
fn whitespace_only_values_count_as_missing() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult_personal(&mut wizard);
    wizard.set_text("name", "   ");
    assert!(!wizard.next_section());
    assert_eq!(wizard.errors(), &["Full name is required".to_owned()]);
}

#[test]
fn next_section_advances_and_clears_errors_once_valid() {
    let mut wizard = Wizard::new(schemas::man());
    assert!(!wizard.next_section());
    fill_adult_personal(&mut wizard);
    assert!(wizard.next_section());
    assert_eq!(wizard.current_section(), 2);
    assert!(wizard.errors().is_empty());
}

#[test]
fn prev_section_always_succeeds_and_is_bounded() {
    let mut wizard = Wizard::new(schemas::man());
    wizard.prev_section();
    assert_eq!(wizard.current_section(), 1);
    fill_adult_personal(&mut wizard);
    assert!(wizard.next_section());
    assert!(!wizard.next_section());
    wizard.prev_section();
    assert_eq!(wizard.current_section(), 1);
    assert!(wizard.errors().is_empty());
}

#[test]
fn format_rules_apply_to_filled_fields() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult_personal(&mut wizard);
    wizard.set_text("date_of_birth", "12/04/1990");
    wizard.set_text("national_id", "abc");
    assert!(!wizard.next_section());
    assert_eq!(
        wizard.errors(),
        &[
            "Date of birth must be a date (YYYY-MM-DD)".to_owned(),
            "National ID must be a number".to_owned(),
        ]
    );
}

#[test]
fn optional_fields_are_still_format_checked() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult_personal(&mut wizard);
    assert!(wizard.next_section());
    wizard.set_text("phone_number", "0100 123 4567");
    wizard.set_text("second_phone_number", "12");
    assert!(!wizard.next_section());
    assert_eq!(wizard.errors(), &["Second phone number must be a valid phone number".to_owned()]);
}

#[test]
fn conditional_fields_follow_their_flag() {
    let mut wizard = Wizard::new(schemas::woman());
    wizard.set_text("last_seen_location", "Alexandria");
    assert!(wizard.validate_section(3).is_empty());

    wizard.set_flag("has_vehicle", true);
    assert_eq!(
        wizard.validate_section(3),
        vec!["Vehicle model is required".to_owned(), "License plate is required".to_owned()]
    );

    wizard.set_text("vehicle_model", "Hyundai Elantra");
    wizard.set_text("license_plate", "ABC 123");
    assert!(wizard.validate_section(3).is_empty());
}

#[test]
fn choice_fields_accept_listed_values_case_insensitively() {
    let mut wizard = Wizard::new(schemas::child());
    wizard.set_text("full_name", "Yara");
    wizard.set_text("date_of_birth", "2016-02-29");
    wizard.set_text("gender", "Female");
    assert!(wizard.validate_section(1).is_empty());

    wizard.set_text("gender", "unknown");
    assert_eq!(wizard.validate_section(1), vec!["Gender must be one of: male, female".to_owned()]);
}

#[test]
fn photo_section_requires_an_attachment() {
    let mut wizard = Wizard::new(schemas::disabled());
    assert_eq!(wizard.validate_section(4), vec!["Photo is required".to_owned()]);
    wizard.set_photo(Some(photo()));
    assert!(wizard.validate_section(4).is_empty());
}

#[test]
fn validate_all_jumps_to_first_failing_section() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult(&mut wizard);
    wizard.set_photo(None);
    assert!(!wizard.validate_all());
    assert_eq!(wizard.current_section(), 4);
    assert_eq!(wizard.errors(), &["Photo is required".to_owned()]);
}

#[test]
fn submit_lifecycle_reaches_submitted_and_blocks_resubmission() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult(&mut wizard);
    assert!(wizard.begin_submit());
    assert_eq!(wizard.status(), &WizardStatus::Submitting);
    assert!(!wizard.begin_submit());
    wizard.finish_submit(Ok(()));
    assert_eq!(wizard.status(), &WizardStatus::Submitted);
    assert!(!wizard.begin_submit());
}

#[test]
fn failed_submit_can_be_retried() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult(&mut wizard);
    assert!(wizard.begin_submit());
    wizard.finish_submit(Err("Request failed with status 500".to_owned()));
    assert_eq!(wizard.status(), &WizardStatus::Failed("Request failed with status 500".to_owned()));
    assert_eq!(wizard.errors(), &["Request failed with status 500".to_owned()]);
    assert!(wizard.begin_submit());
}

#[test]
fn reset_restores_initial_state() {
    let mut wizard = Wizard::new(schemas::man());
    fill_adult(&mut wizard);
    assert!(wizard.begin_submit());
    wizard.finish_submit(Ok(()));
    wizard.reset();
    assert_eq!(wizard, Wizard::new(schemas::man()));
}

#[test]
fn phone_validation_rules() {
    assert!(is_valid_phone("+20 100-123-4567"));
    assert!(is_valid_phone("1234567"));
    assert!(!is_valid_phone("123456"));
    assert!(!is_valid_phone("1234567890123456"));
    assert!(!is_valid_phone("12345ab"));
}

#[test]
fn date_validation_checks_the_calendar() {
    assert!(is_valid_date("2024-02-29"));
    assert!(!is_valid_date("2023-02-29"));
    assert!(!is_valid_date("2023-13-01"));
    assert!(!is_valid_date("2023-1-01"));
    assert!(!is_valid_date("2023/01/01"));
}
