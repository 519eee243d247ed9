use super::*;

#[test]
fn default_gallery_has_two_links_then_two_submits() {
    let prompts = default_prompts();
    assert_eq!(prompts.len(), 4);
    assert!(matches!(prompts[0].action, PromptAction::OpenLink { ref url } if url == NEWSLETTER_URL));
    assert!(matches!(prompts[1].action, PromptAction::OpenLink { ref url } if url == BOOKING_URL));
    assert_eq!(prompts[2].action, PromptAction::Submit { text: "Summary of Newsletter".into() });
    assert_eq!(prompts[3].icon, Icon::Cpu);
}

#[test]
fn resolve_known_label() {
    let prompts = default_prompts();
    assert_eq!(
        resolve_action(&prompts, "Book an Appointment with RSM Team"),
        PromptAction::OpenLink { url: BOOKING_URL.into() }
    );
}

#[test]
fn resolve_unknown_label_submits_label() {
    assert_eq!(
        resolve_action(&default_prompts(), "What is a TCC?"),
        PromptAction::Submit { text: "What is a TCC?".into() }
    );
}

#[test]
fn resolve_falls_back_to_builtin_links_when_gallery_lacks_label() {
    assert_eq!(
        resolve_action(&[], "Download Newsletter"),
        PromptAction::OpenLink { url: NEWSLETTER_URL.into() }
    );
}

#[test]
fn resolve_prefers_current_gallery_over_builtin() {
    let custom = vec![PromptShortcut::submit(Icon::User, "Download Newsletter")];
    assert_eq!(
        resolve_action(&custom, "Download Newsletter"),
        PromptAction::Submit { text: "Download Newsletter".into() }
    );
}

#[test]
fn action_serializes_with_kind_tag() {
    let json = serde_json::to_value(PromptShortcut::submit(Icon::FileText, "Summary of Newsletter")).unwrap();
    assert_eq!(json["icon"], "file_text");
    assert_eq!(json["action"]["kind"], "submit");
}
