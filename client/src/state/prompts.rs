#[cfg(test)]
#[path = "prompts_test.rs"]
mod prompts_test;

use serde::{Deserialize, Serialize};

pub const NEWSLETTER_URL: &str =
    "https://cdn-nexlink.s3.us-east-2.amazonaws.com/RSMtaxes_a7e39cc3-3633-4701-94cc-7ab05d528315.pdf";
pub const BOOKING_URL: &str = "https://calendly.com/demo-link";

/// Symbolic icon id; the renderer picks the glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    User,
    Mail,
    FileText,
    Cpu,
}

/// What clicking a shortcut does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromptAction {
    /// Open an external resource; no chat turn is produced.
    OpenLink { url: String },
    /// Put `text` in the input box and submit it automatically.
    Submit { text: String },
}

/// A button in the prompt gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptShortcut {
    pub icon: Icon,
    pub label: String,
    pub action: PromptAction,
}

impl PromptShortcut {
    #[must_use]
    pub fn link(icon: Icon, label: &str, url: &str) -> Self {
        Self { icon, label: label.to_owned(), action: PromptAction::OpenLink { url: url.to_owned() } }
    }

    /// A shortcut that submits its own label.
    #[must_use]
    pub fn submit(icon: Icon, label: &str) -> Self {
        Self { icon, label: label.to_owned(), action: PromptAction::Submit { text: label.to_owned() } }
    }
}

/// The gallery shown on first load.
#[must_use]
pub fn default_prompts() -> Vec<PromptShortcut> {
    vec![
        PromptShortcut::link(Icon::User, "Download Newsletter", NEWSLETTER_URL),
        PromptShortcut::link(Icon::Mail, "Book an Appointment with RSM Team", BOOKING_URL),
        PromptShortcut::submit(Icon::FileText, "Summary of Newsletter"),
        PromptShortcut::submit(Icon::Cpu, "About Tax Retention"),
    ]
}

/// Resolve the action for `label`.
///
/// The current gallery wins; a label it lacks falls back to the built-in
/// catalog, so the link shortcuts keep opening after `set_prompts`. Any other
/// label submits itself.
#[must_use]
pub fn resolve_action(prompts: &[PromptShortcut], label: &str) -> PromptAction {
    if let Some(p) = prompts.iter().find(|p| p.label == label) {
        return p.action.clone();
    }
    default_prompts()
        .into_iter()
        .find(|p| p.label == label)
        .map_or_else(|| PromptAction::Submit { text: label.to_owned() }, |p| p.action)
}
