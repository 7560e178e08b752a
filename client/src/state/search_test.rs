use super::*;

fn people(count: usize) -> Vec<PersonRecord> {
    (0..count)
        .map(|i| PersonRecord { id: i.to_string(), name: Some(format!("Person {i:02}")), ..PersonRecord::default() })
        .collect()
}

#[test]
fn finish_load_stores_records_or_error() {
    let mut state = SearchState::new(SearchKind::All, 20);
    state.begin_load();
    assert!(state.loading);
    state.finish_load(Err("Request failed with status 500".to_owned()));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Request failed with status 500"));

    state.begin_load();
    assert!(state.error.is_none());
    state.finish_load(Ok(people(3)));
    assert_eq!(state.records.len(), 3);
}

#[test]
fn only_latest_keystroke_applies() {
    let mut state = SearchState::new(SearchKind::All, 20);
    state.finish_load(Ok(people(30)));
    let stale = state.type_term("Person 1".to_owned());
    let fresh = state.type_term("Person 12".to_owned());
    assert_eq!(state.term_input, "Person 12");
    assert!(!state.settle_term(stale));
    assert_eq!(state.filtered_count(), 30);
    assert!(state.settle_term(fresh));
    assert_eq!(state.filtered_count(), 1);
}

#[test]
fn pagination_and_summary() {
    let mut state = SearchState::new(SearchKind::Children, 20);
    state.finish_load(Ok(people(45)));
    assert_eq!(state.visible_records().len(), 20);
    assert_eq!(state.summary(), "Showing 20 of 45");
    assert!(state.has_more());
    assert!(state.load_more());
    assert!(state.load_more());
    assert_eq!(state.visible_records().len(), 45);
    assert!(!state.has_more());
    assert_eq!(state.summary(), "Showing 45 of 45");
}

#[test]
fn empty_states() {
    let mut state = SearchState::new(SearchKind::All, 20);
    assert_eq!(state.summary(), "No records yet");
    state.finish_load(Ok(people(2)));
    let ticket = state.type_term("zzz".to_owned());
    state.settle_term(ticket);
    assert_eq!(state.summary(), "No matches");
}

#[test]
fn retry_count_resets_after_a_successful_load() {
    let mut state = SearchState::new(SearchKind::Disabilities, 20);
    state.finish_load(Err("offline".to_owned()));
    state.begin_retry();
    state.finish_load(Err("offline".to_owned()));
    state.begin_retry();
    assert_eq!(state.retry_count, 2);
    assert!(state.loading);
    state.finish_load(Ok(people(1)));
    assert_eq!(state.retry_count, 0);
}

#[test]
fn error_lines_number_manual_retries() {
    let mut state = SearchState::new(SearchKind::All, 20);
    assert!(state.error_lines().is_empty());
    state.finish_load(Err("offline".to_owned()));
    assert_eq!(state.error_lines(), vec!["offline".to_owned()]);
    state.begin_retry();
    assert!(state.error_lines().is_empty());
    state.finish_load(Err("offline".to_owned()));
    assert_eq!(state.error_lines(), vec!["offline (manual retry 1)".to_owned()]);
}
