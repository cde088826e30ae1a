use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::{Ledger, MoneyCents, Summary};

use crate::{
    error::{AppError, Result},
    form::{FormError, FormInput, FormState},
    store::Store,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// What the renderer needs; rebuilt from the ledger after every action.
#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    pub available: MoneyCents,
    pub summary: Summary,
    pub toast: Option<ToastState>,
    pub confirm_reset: bool,
    pub state_path: String,
    pub last_saved: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerAction {
    Add,
    Change,
    Spend,
}

pub struct App {
    ledger: Ledger,
    store: Store,
    toast_duration: Duration,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(ledger: Ledger, store: Store, toast_duration: Duration) -> Self {
        let state = AppState {
            form: FormState::default(),
            available: ledger.available(),
            summary: ledger.summarize(),
            toast: None,
            confirm_reset: false,
            state_path: store.path().display().to_string(),
            last_saved: None,
        };

        Self {
            ledger,
            store,
            toast_duration,
            state,
            should_quit: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit() {
            self.expire_toast(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.dispatch(map_key(key));
    }

    pub fn dispatch(&mut self, action: AppAction) {
        if self.state.confirm_reset {
            self.answer_reset(action);
            return;
        }

        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel => self.state.form.clear(),
            AppAction::NextField => self.state.form.next_field(),
            AppAction::AddBudget => self.submit(LedgerAction::Add),
            AppAction::ChangeBudget => self.submit(LedgerAction::Change),
            AppAction::RecordSpend => self.submit(LedgerAction::Spend),
            AppAction::Reset => {
                self.state.confirm_reset = true;
            }
            AppAction::Backspace => {
                self.state.form.active_mut().pop();
            }
            AppAction::Input(ch) => {
                if !ch.is_control() {
                    self.state.form.active_mut().push(ch);
                }
            }
            AppAction::None => {}
        }
    }

    /// Show a banner that disappears after the configured duration.
    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + self.toast_duration,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.state.toast = None;
        }
    }

    fn answer_reset(&mut self, action: AppAction) {
        self.state.confirm_reset = false;
        match action {
            AppAction::Input('y' | 'Y') => {
                self.ledger.reset();
                tracing::info!(available = %self.ledger.available(), "ledger reset");
                self.after_mutation("Ledger reset.".to_string());
            }
            AppAction::Quit => self.should_quit = true,
            _ => self.notify(ToastLevel::Info, "Reset cancelled."),
        }
    }

    fn submit(&mut self, action: LedgerAction) {
        let input = match self.state.form.read() {
            Ok(input) => input,
            Err(err) => {
                self.reject(action, &err);
                return;
            }
        };

        match self.apply(action, &input) {
            Ok(message) => {
                tracing::info!(?action, budget = %input.name, amount = %input.amount, "ledger updated");
                self.after_mutation(message);
            }
            Err(err) => {
                tracing::warn!(?action, budget = %input.name, amount = %input.amount, "{err}");
                self.notify(ToastLevel::Error, format!("Error: {err}"));
            }
        }
    }

    fn apply(&mut self, action: LedgerAction, input: &FormInput) -> engine::ResultLedger<String> {
        let name = input.name.as_str();
        let amount = input.amount;
        match action {
            LedgerAction::Add => {
                self.ledger.create_budget(name, amount)?;
                Ok(format!("Budget '{name}' added."))
            }
            LedgerAction::Change => {
                self.ledger.resize_budget(name, amount)?;
                Ok(format!("Budget '{name}' changed to ${amount}."))
            }
            LedgerAction::Spend => {
                self.ledger.record_spend(name, amount)?;
                Ok(format!("Spent ${amount} on '{name}'."))
            }
        }
    }

    fn reject(&mut self, action: LedgerAction, err: &FormError) {
        tracing::debug!(?action, "form rejected: {err}");
        self.notify(ToastLevel::Error, format!("Error: {err}"));
    }

    /// Persist, refresh the view and report. A failed save keeps the
    /// in-memory ledger and says so instead of the success message.
    fn after_mutation(&mut self, message: String) {
        self.refresh();
        match self.store.save(&self.ledger) {
            Ok(()) => {
                self.state.last_saved = Some(Local::now());
                self.notify(ToastLevel::Success, message);
            }
            Err(err) => {
                tracing::error!("failed to save ledger: {err}");
                self.notify(ToastLevel::Error, format!("{message} Error: not saved: {err}"));
            }
        }
    }

    fn refresh(&mut self) {
        self.state.available = self.ledger.available();
        self.state.summary = self.ledger.summarize();
    }
}
