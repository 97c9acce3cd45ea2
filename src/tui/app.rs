//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Form fields are kept as raw text and only parsed into the session when
//! Calculate runs.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{FundError, FundResult};
use crate::models::{
    next_fiscal_year, prev_fiscal_year, ApiCredential, AppropriationCode, Money,
};
use crate::services::{PendingTurn, Session, SessionInputs};

use super::widgets::TextInput;

/// Label column shared by every form row
pub const LABEL_WIDTH: usize = 16;

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Form,
    Chat,
}

/// Form rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    BranchSize,
    HourlyRate,
    ReportDate,
    FiscalYear,
    Omn,
    Opn,
    Scn,
    Attachment,
    ApiKey,
    ChatToggle,
    Calculate,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        Self::BranchSize,
        Self::HourlyRate,
        Self::ReportDate,
        Self::FiscalYear,
        Self::Omn,
        Self::Opn,
        Self::Scn,
        Self::Attachment,
        Self::ApiKey,
        Self::ChatToggle,
        Self::Calculate,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
}

/// Raw text of the editable form rows
#[derive(Debug, Clone)]
pub struct FormState {
    pub branch_size: TextInput,
    pub hourly_rate: TextInput,
    pub report_date: TextInput,
    pub omn: TextInput,
    pub opn: TextInput,
    pub scn: TextInput,
    pub attachment: TextInput,
    /// Selected fiscal year; cycled rather than typed
    pub fiscal_year: i32,
}

impl FormState {
    /// Pre-fill from the preference defaults
    pub fn new(settings: &Settings, today: NaiveDate) -> Self {
        let defaults = &settings.defaults;
        let field = |label: &str| TextInput::new().label(label).label_width(LABEL_WIDTH);
        Self {
            branch_size: field("Branch size").content(defaults.branch_size.to_string()),
            hourly_rate: field("Hourly rate").content(defaults.hourly_rate.amount().to_string()),
            report_date: field("Report date")
                .content(today.format("%Y-%m-%d").to_string())
                .placeholder("YYYY-MM-DD"),
            omn: field("OMN balance").placeholder("0.00"),
            opn: field("OPN balance").placeholder("0.00"),
            scn: field("SCN balance").placeholder("0.00"),
            attachment: field("Attachment").placeholder("optional .xlsx/.xls/.csv"),
            fiscal_year: defaults.fiscal_year,
        }
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::BranchSize => Some(&self.branch_size),
            FormField::HourlyRate => Some(&self.hourly_rate),
            FormField::ReportDate => Some(&self.report_date),
            FormField::Omn => Some(&self.omn),
            FormField::Opn => Some(&self.opn),
            FormField::Scn => Some(&self.scn),
            FormField::Attachment => Some(&self.attachment),
            _ => None,
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::BranchSize => Some(&mut self.branch_size),
            FormField::HourlyRate => Some(&mut self.hourly_rate),
            FormField::ReportDate => Some(&mut self.report_date),
            FormField::Omn => Some(&mut self.omn),
            FormField::Opn => Some(&mut self.opn),
            FormField::Scn => Some(&mut self.scn),
            FormField::Attachment => Some(&mut self.attachment),
            _ => None,
        }
    }

    /// Parse every row into session inputs
    pub fn parse(&self) -> FundResult<SessionInputs> {
        let branch_size: u32 = self
            .branch_size
            .value()
            .trim()
            .parse()
            .map_err(|_| FundError::invalid_field("Branch size", "must be a whole number"))?;
        let hourly_rate = Money::parse(self.hourly_rate.value())
            .map_err(|e| FundError::invalid_field("Hourly rate", e))?;
        let report_date = NaiveDate::parse_from_str(self.report_date.value().trim(), "%Y-%m-%d")
            .map_err(|_| FundError::invalid_field("Report date", "expected YYYY-MM-DD"))?;

        let mut inputs = SessionInputs::new(branch_size, hourly_rate, self.fiscal_year, report_date)
            .with_balance(AppropriationCode::Omn, parse_balance("OMN balance", &self.omn)?)
            .with_balance(AppropriationCode::Opn, parse_balance("OPN balance", &self.opn)?)
            .with_balance(AppropriationCode::Scn, parse_balance("SCN balance", &self.scn)?);

        let attachment = self.attachment.value().trim();
        if !attachment.is_empty() {
            inputs.attachment = Some(PathBuf::from(attachment));
        }
        Ok(inputs)
    }
}

/// Empty balance rows count as zero
fn parse_balance(label: &str, input: &TextInput) -> FundResult<Money> {
    let raw = input.value().trim();
    if raw.is_empty() {
        return Ok(Money::zero());
    }
    Money::parse(raw).map_err(|e| FundError::invalid_field(label, e))
}

/// Main application state
pub struct App<'a> {
    /// Application settings
    pub settings: &'a Settings,

    /// The dashboard session: inputs, context, transcript, credential
    pub session: Session,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Selected form row
    pub focused_field: FormField,

    /// Editable form text
    pub form: FormState,

    /// Chat question being typed
    pub chat_input: TextInput,

    /// User turn recorded but not yet answered
    pub pending_turn: Option<PendingTurn>,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Transcript lines scrolled up from the bottom
    pub chat_scroll: u16,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(settings: &'a Settings, credential: ApiCredential) -> Self {
        let today = Local::now().date_naive();
        let form = FormState::new(settings, today);
        let inputs = SessionInputs::new(
            settings.defaults.branch_size,
            settings.defaults.hourly_rate,
            settings.defaults.fiscal_year,
            today,
        );

        Self {
            settings,
            session: Session::new(inputs, credential, settings.chat_enabled),
            should_quit: false,
            focused_panel: FocusedPanel::default(),
            focused_field: FormField::default(),
            form,
            chat_input: TextInput::new().placeholder("Ask about your budget..."),
            pending_turn: None,
            active_dialog: ActiveDialog::default(),
            chat_scroll: 0,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Form => FocusedPanel::Chat,
            FocusedPanel::Chat => FocusedPanel::Form,
        };
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn cycle_fiscal_year(&mut self, forward: bool) {
        self.form.fiscal_year = if forward {
            next_fiscal_year(self.form.fiscal_year)
        } else {
            prev_fiscal_year(self.form.fiscal_year)
        };
    }

    pub fn toggle_chat(&mut self) {
        let enabled = !self.session.chat_enabled();
        self.session.set_chat_enabled(enabled);
        self.set_status(if enabled { "Chat enabled" } else { "Chat disabled" });
    }

    /// Parse the form and run Calculate
    ///
    /// Any error goes to the status bar; the previous analysis stays in place.
    pub fn calculate(&mut self) {
        let result = self.form.parse().and_then(|inputs| {
            *self.session.inputs_mut() = inputs;
            self.session.calculate().map(|_| ())
        });

        match result {
            Ok(()) => match self.session.inputs().attachment_warning() {
                Some(note) => self.set_status(format!("Analysis updated ({})", note)),
                None => self.set_status("Analysis updated"),
            },
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Record the typed question as a pending turn
    ///
    /// Blank questions are ignored. A gated chat leaves the text in the field.
    pub fn submit_chat(&mut self) {
        if self.pending_turn.is_some() || self.chat_input.value().trim().is_empty() {
            return;
        }

        let question = self.chat_input.value().trim().to_string();
        match self.session.begin_turn(question) {
            Ok(turn) => {
                self.chat_input.clear();
                self.chat_scroll = 0;
                self.pending_turn = Some(turn);
                self.set_status("Waiting for the assistant...");
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Whether a pending turn is waiting on the assistant
    pub fn is_waiting(&self) -> bool {
        self.pending_turn.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;

    fn app(settings: &Settings) -> App<'_> {
        App::new(settings, ApiCredential::new("key"))
    }

    #[test]
    fn test_form_prefilled_from_defaults() {
        let settings = Settings::default();
        let app = app(&settings);
        assert_eq!(app.form.branch_size.value(), "17");
        assert_eq!(app.form.hourly_rate.value(), "141.36");
        assert_eq!(app.form.fiscal_year, 2025);
        assert!(app.session.context().is_none());
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(FormField::Calculate.next(), FormField::BranchSize);
        assert_eq!(FormField::BranchSize.prev(), FormField::Calculate);
    }

    #[test]
    fn test_calculate_parses_form() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.form.omn.set_value("1,000");
        app.form.scn.set_value("-250.50");
        app.form.report_date.set_value("2025-03-14");
        app.cycle_fiscal_year(true);

        app.calculate();

        let ctx = app.session.context().unwrap();
        assert_eq!(ctx.fiscal_year, 2026);
        assert_eq!(ctx.total_balance, Money::from_cents(74_950));
        assert_eq!(app.status_message.as_deref(), Some("Analysis updated"));
    }

    #[test]
    fn test_calculate_reports_bad_input() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.form.branch_size.set_value("0");
        app.calculate();

        assert!(app.session.context().is_none());
        assert!(app.status_message.unwrap().contains("Branch size"));
    }

    #[test]
    fn test_missing_attachment_still_calculates() {
        let settings = Settings::default();
        let mut app = app(&settings);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("ledger.xlsx");
        app.form.attachment.set_value(missing.to_string_lossy().into_owned());
        app.calculate();

        assert!(app.session.context().is_some());
        let status = app.status_message.unwrap();
        assert!(status.starts_with("Analysis updated"));
        assert!(status.contains("attachment not found"));
    }

    #[test]
    fn test_oversized_balances_show_error() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.form.omn.set_value("79228162514264337593543950335");
        app.form.opn.set_value("79228162514264337593543950335");
        app.calculate();

        assert!(app.session.context().is_none());
        assert!(app.status_message.unwrap().contains("Total balance"));
    }

    #[test]
    fn test_blank_question_is_ignored() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.chat_input.set_value("   ");
        app.submit_chat();

        assert!(app.pending_turn.is_none());
        assert!(app.session.transcript().is_empty());
    }

    #[test]
    fn test_submit_records_user_turn() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.chat_input.set_value("  burn rate?  ");
        app.submit_chat();

        assert!(app.is_waiting());
        assert!(app.chat_input.value().is_empty());
        let last = app.session.transcript().last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "burn rate?");
    }

    #[test]
    fn test_gated_chat_keeps_question() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.toggle_chat();
        app.chat_input.set_value("hello");
        app.submit_chat();

        assert!(!app.is_waiting());
        assert_eq!(app.chat_input.value(), "hello");
        assert!(app.status_message.unwrap().contains("Chat is turned off."));
    }
}
