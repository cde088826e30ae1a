use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    AddBudget,
    ChangeBudget,
    RecordSpend,
    Reset,
    Backspace,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    // Windows reports releases too.
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Char('a') => AppAction::AddBudget,
            KeyCode::Char('e') => AppAction::ChangeBudget,
            KeyCode::Char('s') => AppAction::RecordSpend,
            KeyCode::Char('r') => AppAction::Reset,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter => AppAction::NextField,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
