use registry::PersonRecord;

use super::*;

#[test]
fn begin_blocks_concurrent_recognition() {
    let mut state = IdentifyState::default();
    assert!(state.begin(Some("blob:1".to_owned())));
    assert!(!state.begin(Some("blob:2".to_owned())));
    assert_eq!(state.preview.as_deref(), Some("blob:1"));
    state.finish(Err("The request timed out".to_owned()));
    assert_eq!(state.status, IdentifyStatus::Failed("The request timed out".to_owned()));
    assert!(state.begin(None));
    assert_eq!(state.preview.as_deref(), Some("blob:1"));
}

#[test]
fn switching_mode_clears_previous_result() {
    let mut state = IdentifyState::default();
    state.begin(Some("blob:1".to_owned()));
    state.finish(Ok(RecognitionResult::default()));
    state.switch_mode(CaptureMode::Camera);
    assert_eq!(state, IdentifyState { mode: CaptureMode::Camera, ..IdentifyState::default() });
}

#[test]
fn headline_for_match_and_miss() {
    let hit = RecognitionResult {
        matched: true,
        confidence: Some(0.935),
        record: Some(PersonRecord { id: "1".to_owned(), name: Some("Omar".to_owned()), ..PersonRecord::default() }),
        message: None,
    };
    assert_eq!(result_headline(&hit), "Match: Omar (93.5%)");
    assert_eq!(result_headline(&RecognitionResult::default()), "No match found");
}

#[test]
fn confidence_accepts_fractions_and_percentages() {
    assert_eq!(format_confidence(0.5), "50.0%");
    assert_eq!(format_confidence(87.3), "87.3%");
}
