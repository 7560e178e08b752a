use registry::PersonRecord;
use registry::fallback::ProvisionalReason;

use super::*;

fn record(name: &str) -> PersonRecord {
    PersonRecord { id: "9".to_owned(), name: Some(name.to_owned()), ..PersonRecord::default() }
}

#[test]
fn step_label_and_progress() {
    assert_eq!(step_label(2, 4), "Step 2 of 4");
    assert_eq!(progress_percent(1, 4), 25);
    assert_eq!(progress_percent(4, 4), 100);
    assert_eq!(progress_percent(1, 0), 0);
}

#[test]
fn confirmed_outcome_reads_as_success() {
    let (title, detail) = outcome_message(&RegisterOutcome::Confirmed(record("Samir")));
    assert_eq!(title, "Registration complete");
    assert_eq!(detail, "Samir has been registered.");
}

#[test]
fn provisional_outcome_names_the_reason() {
    let outcome = RegisterOutcome::Provisional { record: record("Lina"), reason: ProvisionalReason::EmptyResponse };
    let (title, detail) = outcome_message(&outcome);
    assert_eq!(title, "Saved locally");
    assert!(detail.starts_with("Lina was saved on this device only"));
    assert!(detail.contains("did not confirm"));
}
