use super::*;

#[test]
fn signal_follows_observable_until_cleanup() {
    let owner = Owner::new();
    let value = ObservableValue::new(1);
    let signal = owner.with(|| use_observable(&value));
    assert_eq!(signal.get_untracked(), 1);
    assert_eq!(value.subscriber_count(), 1);

    value.set(2);
    assert_eq!(signal.get_untracked(), 2);

    owner.cleanup();
    assert_eq!(value.subscriber_count(), 0);
}

#[test]
fn theme_label_follows_store_changes() {
    use crate::util::theme::{THEMES, theme_label};

    let owner = Owner::new();
    let theme = ObservableValue::new("light".to_owned());
    let signal = owner.with(|| use_observable(&theme));
    let label = move || signal.with_untracked(|id| theme_label(id, THEMES));

    assert_eq!(label(), Some("theme.light"));
    theme.set("dark".to_owned());
    assert_eq!(label(), Some("theme.dark"));
    theme.set("sepia".to_owned());
    assert_eq!(label(), None);
}
