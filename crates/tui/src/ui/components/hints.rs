use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Shortcuts while editing the form.
pub const LEDGER_HINTS: [KeyHint; 6] = [
    KeyHint::new("Tab", "next field"),
    KeyHint::new("Ctrl+A", "add budget"),
    KeyHint::new("Ctrl+E", "change budget"),
    KeyHint::new("Ctrl+S", "record spend"),
    KeyHint::new("Esc", "clear"),
    KeyHint::new("Ctrl+R", "reset"),
];

/// Shortcuts while the reset confirmation is open.
pub const CONFIRM_HINTS: [KeyHint; 2] = [
    KeyHint::new("y", "reset everything"),
    KeyHint::new("any key", "cancel"),
];

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
