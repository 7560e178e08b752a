use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one");
    let b = state.push(ToastKind::Error, "two");
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[1].message, "two");
}

#[test]
fn dismiss_removes_only_the_given_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one");
    state.push(ToastKind::Success, "two");
    state.dismiss(a);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].message, "two");
    state.dismiss(999);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn queue_is_capped_dropping_oldest() {
    let mut state = ToastState::default();
    for i in 0..6 {
        state.push(ToastKind::Info, format!("t{i}"));
    }
    assert_eq!(state.toasts.len(), MAX_TOASTS);
    assert_eq!(state.toasts[0].message, "t2");
}

#[test]
fn kinds_map_to_css_modifiers() {
    assert_eq!(ToastKind::Warning.css_modifier(), "toast--warning");
}
