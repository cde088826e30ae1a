pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

use theme::Theme;

use components::{
    hints::{CONFIRM_HINTS, LEDGER_HINTS, hint_separator, hints_to_spans},
    money::dollars,
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Form and summary
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::ledger::render(frame, layout[1], state);
    render_bottom_bar(frame, layout[2], state, &theme);

    if state.confirm_reset {
        screens::confirm::render(frame, area);
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let saved = state
        .last_saved
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!("Available Funds: {}", dollars(state.available)),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        hint_separator(theme),
        Span::styled("File", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.state_path)),
        Span::styled("Saved", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {saved}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = if state.confirm_reset {
        hints_to_spans(&CONFIRM_HINTS, theme)
    } else {
        hints_to_spans(&LEDGER_HINTS, theme)
    };

    // Quit hint at the end
    parts.push(hint_separator(theme));
    parts.push(Span::styled("Ctrl+Q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
