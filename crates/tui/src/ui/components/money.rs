use engine::MoneyCents;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Dollar rendering used throughout the shell: `$120.00`, `$-20.00`.
#[must_use]
pub fn dollars(amount: MoneyCents) -> String {
    format!("${amount}")
}

/// Creates a styled span for an amount; negative amounts (overspend) are red.
#[must_use]
pub fn styled_amount(amount: MoneyCents, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(dollars(amount), Style::default().fg(color))
}

/// Same as [`styled_amount`] but bold, for totals.
#[must_use]
pub fn styled_amount_bold(amount: MoneyCents, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    span.style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_keep_the_sign_after_the_symbol() {
        assert_eq!(dollars(MoneyCents::new(12_000)), "$120.00");
        assert_eq!(dollars(MoneyCents::new(-2_000)), "$-20.00");
    }

    #[test]
    fn overspend_is_highlighted() {
        let theme = Theme::default();
        assert_eq!(
            styled_amount(MoneyCents::new(-1), &theme).style.fg,
            Some(theme.negative)
        );
        assert_eq!(
            styled_amount(MoneyCents::new(1), &theme).style.fg,
            Some(theme.text)
        );
    }
}
