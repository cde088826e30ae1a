use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use engine::SummaryRow;

use crate::{
    app::AppState,
    form::{AMOUNT_PLACEHOLDER, Field, NAME_PLACEHOLDER},
    ui::{
        components::money::{styled_amount, styled_amount_bold},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Inputs
            Constraint::Min(3),    // Summary table
        ])
        .split(area);

    render_form(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let form = &state.form;
    render_input(
        frame,
        rows[0],
        &form.name,
        NAME_PLACEHOLDER,
        form.focus == Field::Name,
        theme,
    );
    render_input(
        frame,
        rows[1],
        &form.amount,
        AMOUNT_PLACEHOLDER,
        form.focus == Field::Amount,
        theme,
    );
}

/// Renders a single input; an empty field shows its placeholder dimmed.
fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) {
    let marker = if focused { "› " } else { "  " };
    let cursor = if focused { "│" } else { "" };

    let text = if value.is_empty() && !focused {
        Span::styled(placeholder.to_string(), Style::default().fg(theme.text_muted))
    } else {
        let color = if focused { theme.accent } else { theme.text };
        Span::styled(format!("{value}{cursor}"), Style::default().fg(color))
    };

    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        text,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let header = Row::new(["Budget Name", "Budgeted", "Spent", "Remaining"]).style(
        Style::default()
            .fg(theme.header_bg)
            .add_modifier(Modifier::BOLD),
    );

    let mut rows: Vec<Row<'_>> = state
        .summary
        .rows
        .iter()
        .map(|row| summary_row(row, false, theme))
        .collect();
    rows.push(summary_row(&state.summary.total, true, theme));

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(Span::styled(" Summary ", Style::default().fg(theme.accent)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(table, area);
}

fn summary_row<'a>(row: &'a SummaryRow, total: bool, theme: &Theme) -> Row<'a> {
    let amount = if total { styled_amount_bold } else { styled_amount };
    let name_style = if total {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    Row::new(vec![
        Cell::from(Span::styled(row.name.as_str(), name_style)),
        Cell::from(amount(row.budgeted, theme)),
        Cell::from(amount(row.spent, theme)),
        Cell::from(amount(row.remaining, theme)),
    ])
}
