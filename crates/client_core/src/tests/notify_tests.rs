use super::*;

#[test]
fn broadcast_reaches_every_subscriber() {
    let notifier = BroadcastNotifier::new(4);
    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();

    notifier.notify(Notification::info("Signed in"));

    for rx in [&mut first, &mut second] {
        let notification = rx.try_recv().expect("delivered");
        assert_eq!(notification.level, NotificationLevel::Info);
        assert_eq!(notification.message, "Signed in");
        assert_eq!(notification.error, None);
    }
}

#[test]
fn error_notification_carries_the_error() {
    let err = ConsoleError::Transport("connection reset".into());
    let notification = Notification::error(&err);
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, err.to_string());
    assert_eq!(notification.error, Some(err));
}

#[test]
fn notifying_without_subscribers_is_harmless() {
    let notifier = BroadcastNotifier::default();
    notifier.notify(Notification::success("Saved"));
    LogNotifier.notify(Notification::info("Signed out"));
}
