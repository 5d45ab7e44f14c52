use homedash_core::{
    check_days, memorial_for, MemorialMatch, MonthDay, NotificationRequest, NullUiEffects,
    UiCapability, UiEffects, GRAYSCALE_STYLE_RULE, MEMORIAL_NOTIFICATION_DURATION_MS,
    MEMORIAL_NOTIFICATION_ICON,
};

#[derive(Default)]
struct CountingEffects {
    notifications_available: bool,
    style_calls: Vec<String>,
    notification_calls: Vec<NotificationRequest>,
}

impl UiEffects for CountingEffects {
    fn supports(&self, capability: UiCapability) -> bool {
        match capability {
            UiCapability::PageStyle => true,
            UiCapability::Notification => self.notifications_available,
        }
    }

    fn apply_page_style(&mut self, rule: &str) {
        self.style_calls.push(rule.to_string());
    }

    fn show_notification(&mut self, request: &NotificationRequest) {
        self.notification_calls.push(request.clone());
    }
}

#[test]
fn memorial_day_triggers_exactly_one_style_and_one_notification() {
    let mut effects = CountingEffects {
        notifications_available: true,
        ..CountingEffects::default()
    };

    let date = MonthDay::try_new(4, 4).expect("valid date");
    let matched = check_days(date, &mut effects).expect("4.4 is a memorial day");
    assert_eq!(
        matched,
        MemorialMatch {
            date,
            label: "清明节"
        }
    );

    assert_eq!(effects.style_calls, vec![GRAYSCALE_STYLE_RULE.to_string()]);
    assert_eq!(effects.notification_calls.len(), 1);

    let notification = &effects.notification_calls[0];
    assert_eq!(notification.message, "今天是清明节");
    assert_eq!(notification.duration_ms, MEMORIAL_NOTIFICATION_DURATION_MS);
    assert_eq!(notification.duration_ms, 14_000);
    assert_eq!(
        notification.icon.as_deref(),
        Some(MEMORIAL_NOTIFICATION_ICON)
    );
}

#[test]
fn ordinary_date_triggers_nothing() {
    let mut effects = CountingEffects {
        notifications_available: true,
        ..CountingEffects::default()
    };

    let outcome = check_days(MonthDay::try_new(1, 1).expect("valid date"), &mut effects);
    assert!(outcome.is_none());
    assert!(effects.style_calls.is_empty());
    assert!(effects.notification_calls.is_empty());
}

#[test]
fn missing_notification_capability_suppresses_only_the_notification() {
    let mut effects = CountingEffects::default();

    check_days(MonthDay::try_new(12, 13).expect("valid date"), &mut effects)
        .expect("12.13 is a memorial day");
    assert_eq!(effects.style_calls.len(), 1);
    assert!(effects.notification_calls.is_empty());
}

#[test]
fn null_effects_allow_headless_checks() {
    let mut effects = NullUiEffects;
    let matched = check_days(MonthDay::try_new(7, 7).expect("valid date"), &mut effects);
    assert_eq!(matched.map(|m| m.label), Some("中国人民抗日战争纪念日"));
}

#[test]
fn every_table_entry_is_reachable_through_lookup() {
    let listed = [
        (4, 4, "清明节"),
        (5, 12, "汶川大地震纪念日"),
        (7, 7, "中国人民抗日战争纪念日"),
        (9, 18, "九·一八事变纪念日"),
        (12, 13, "南京大屠杀死难者国家公祭日"),
    ];
    for (month, day, label) in listed {
        let date = MonthDay::try_new(month, day).expect("listed date is valid");
        assert_eq!(memorial_for(date), Some(label));
    }

    // Un-padded keys keep single-digit days distinct from double-digit ones:
    // "9.1" and "5.1" are not prefixes of "9.18" and "5.12".
    assert_eq!(
        memorial_for(MonthDay::try_new(9, 1).expect("valid date")),
        None
    );
    assert_eq!(
        memorial_for(MonthDay::try_new(5, 1).expect("valid date")),
        None
    );
}
