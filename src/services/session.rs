//! Session orchestrator
//!
//! Owns one dashboard session: the form inputs, the current analysis
//! context, the chat transcript, and the credential. Nothing here is
//! persisted; the whole session is dropped on exit.

use tracing::{info, warn};

use crate::ai::Assistant;
use crate::error::{FundError, FundResult};
use crate::models::{AnalysisContext, ApiCredential, ChatMessage, Transcript};

use super::analysis::{build_analysis, SessionInputs};

/// Reply used when a question arrives before any analysis exists
pub const MISSING_CONTEXT_REPLY: &str =
    "Please run the analysis first (Calculate) so I have your budget figures to work with.";

/// Whether chat can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Ready,
    /// The chat toggle is off
    Disabled,
    /// No API credential has been entered
    MissingCredential,
}

impl ChatStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Warning shown in place of the chat input
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::Disabled => Some("Chat is turned off."),
            Self::MissingCredential => Some("Enter an API key to enable chat."),
        }
    }
}

/// A user question that has been recorded but not yet answered
///
/// Produced by [`Session::begin_turn`] so the caller can redraw before the
/// blocking assistant call in [`Session::complete_turn`].
#[derive(Debug)]
#[must_use = "a pending turn must be completed to record the assistant reply"]
pub struct PendingTurn {
    question: String,
}

impl PendingTurn {
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// One interactive session
#[derive(Debug)]
pub struct Session {
    inputs: SessionInputs,
    context: Option<AnalysisContext>,
    transcript: Transcript,
    chat_enabled: bool,
    credential: ApiCredential,
}

impl Session {
    pub fn new(inputs: SessionInputs, credential: ApiCredential, chat_enabled: bool) -> Self {
        Self {
            inputs,
            context: None,
            transcript: Transcript::new(),
            chat_enabled,
            credential,
        }
    }

    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    /// Edit the form; the current context is left untouched until the next
    /// [`Session::calculate`]
    pub fn inputs_mut(&mut self) -> &mut SessionInputs {
        &mut self.inputs
    }

    /// Most recent analysis, if Calculate has run
    pub fn context(&self) -> Option<&AnalysisContext> {
        self.context.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn credential(&self) -> &ApiCredential {
        &self.credential
    }

    pub fn set_credential(&mut self, secret: impl Into<String>) {
        self.credential.set(secret);
    }

    /// In-place edits from the masked form field
    pub fn credential_mut(&mut self) -> &mut ApiCredential {
        &mut self.credential
    }

    pub fn chat_enabled(&self) -> bool {
        self.chat_enabled
    }

    pub fn set_chat_enabled(&mut self, enabled: bool) {
        self.chat_enabled = enabled;
    }

    pub fn chat_status(&self) -> ChatStatus {
        if !self.chat_enabled {
            ChatStatus::Disabled
        } else if self.credential.is_blank() {
            ChatStatus::MissingCredential
        } else {
            ChatStatus::Ready
        }
    }

    /// Validate the form and replace the analysis context wholesale
    ///
    /// On a validation error, including amounts too large to total, the
    /// previous context is kept as it was.
    pub fn calculate(&mut self) -> FundResult<&AnalysisContext> {
        self.inputs.validate()?;
        let fresh = build_analysis(&self.inputs)?;
        Ok(self.context.insert(fresh))
    }

    /// Record the user's question
    ///
    /// Fails without touching the transcript when chat is gated.
    pub fn begin_turn(&mut self, question: impl Into<String>) -> FundResult<PendingTurn> {
        if let Some(reason) = self.chat_status().warning() {
            return Err(FundError::ChatUnavailable(reason.to_string()));
        }

        let question = question.into();
        self.transcript.push(ChatMessage::user(question.clone()));
        Ok(PendingTurn { question })
    }

    /// Produce and record the assistant reply for a pending turn
    ///
    /// Without an analysis context the fixed guidance reply is recorded and
    /// the assistant is never called.
    pub fn complete_turn<A: Assistant + ?Sized>(
        &mut self,
        turn: PendingTurn,
        assistant: &A,
    ) -> &ChatMessage {
        let reply = match &self.context {
            None => {
                info!("question asked before analysis; replying with guidance");
                MISSING_CONTEXT_REPLY.to_string()
            }
            Some(context) => {
                let outcome = assistant.ask(&turn.question, context, &self.credential);
                if !outcome.is_answer() {
                    warn!("assistant returned a failure; recording it in the transcript");
                }
                outcome.into_text()
            }
        };

        self.transcript.push(ChatMessage::assistant(reply))
    }

    /// Record a question and its reply in one blocking step
    pub fn submit_question<A: Assistant + ?Sized>(
        &mut self,
        question: impl Into<String>,
        assistant: &A,
    ) -> FundResult<&ChatMessage> {
        let turn = self.begin_turn(question)?;
        Ok(self.complete_turn(turn, assistant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AskFailure, AskOutcome};
    use crate::models::{AppropriationCode, ChatRole, Money};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::cell::{Cell, RefCell};

    /// Assistant double that records calls and returns a canned outcome
    struct ScriptedAssistant {
        outcome: AskOutcome,
        calls: Cell<usize>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedAssistant {
        fn new(outcome: AskOutcome) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Assistant for ScriptedAssistant {
        fn ask(
            &self,
            question: &str,
            _context: &AnalysisContext,
            credential: &ApiCredential,
        ) -> AskOutcome {
            self.calls.set(self.calls.get() + 1);
            self.seen
                .borrow_mut()
                .push(format!("{}|{}", question, credential.expose()));
            self.outcome.clone()
        }
    }

    fn session() -> Session {
        let inputs = SessionInputs::new(
            17,
            Money::from_cents(14136),
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
        .with_balance(AppropriationCode::Omn, Money::from_cents(100_000));
        Session::new(inputs, ApiCredential::new("key-123"), true)
    }

    #[test]
    fn test_question_before_calculate_gets_guidance_without_call() {
        let mut session = session();
        let assistant = ScriptedAssistant::new(AskOutcome::Answer("unused".into()));

        let reply = session.submit_question("What is my burn?", &assistant).unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, MISSING_CONTEXT_REPLY);
        assert_eq!(assistant.calls.get(), 0);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript().messages()[0], ChatMessage::user("What is my burn?"));
    }

    #[test]
    fn test_answer_appended_after_user_turn() {
        let mut session = session();
        session.calculate().unwrap();
        let assistant = ScriptedAssistant::new(AskOutcome::Answer("Roughly 0.0 months.".into()));

        session.submit_question("How long?", &assistant).unwrap();

        assert_eq!(assistant.calls.get(), 1);
        assert_eq!(assistant.seen.borrow()[0], "How long?|key-123");
        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1], ChatMessage::assistant("Roughly 0.0 months."));
    }

    #[test]
    fn test_user_turn_recorded_before_assistant_call() {
        let mut session = session();
        session.calculate().unwrap();

        let turn = session.begin_turn("Expiry of SCN?").unwrap();
        assert_eq!(turn.question(), "Expiry of SCN?");
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().last().unwrap().role, ChatRole::User);

        let assistant = ScriptedAssistant::new(AskOutcome::Answer("2027-09-30".into()));
        session.complete_turn(turn, &assistant);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_provider_error_becomes_transcript_text() {
        let mut session = session();
        session.calculate().unwrap();
        let assistant = ScriptedAssistant::new(AskOutcome::Failed(AskFailure::Api {
            status: 500,
            body: "boom".into(),
        }));

        session.submit_question("first", &assistant).unwrap();
        session.submit_question("second", &assistant).unwrap();

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 4);
        assert!(messages[1].content.contains("API Error"));
        assert!(messages[1].content.contains("500"));
        assert_eq!(messages[2], ChatMessage::user("second"));
    }

    #[test]
    fn test_calculate_replaces_context() {
        let mut session = session();
        let first_total = session.calculate().unwrap().total_balance;

        *session.inputs_mut().balance_mut(AppropriationCode::Scn) = Money::from_cents(900_000);
        assert_eq!(session.context().unwrap().total_balance, first_total);

        let second = session.calculate().unwrap();
        assert_eq!(second.total_balance, Money::from_cents(1_000_000));
        assert_eq!(
            second.appropriation(AppropriationCode::Scn).unwrap().balance,
            Money::from_cents(900_000)
        );
    }

    #[test]
    fn test_invalid_inputs_keep_previous_context() {
        let mut session = session();
        session.calculate().unwrap();
        let before = session.context().cloned();

        session.inputs_mut().branch_size = 0;
        assert!(session.calculate().is_err());
        assert_eq!(session.context().cloned(), before);
    }

    #[test]
    fn test_overflowing_balances_keep_previous_context() {
        let mut session = session();
        session.calculate().unwrap();
        let before = session.context().cloned();

        let huge = Money::from_decimal(Decimal::MAX);
        *session.inputs_mut().balance_mut(AppropriationCode::Omn) = huge;
        *session.inputs_mut().balance_mut(AppropriationCode::Opn) = huge;

        let err = session.calculate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.context().cloned(), before);
    }

    #[test]
    fn test_chat_gating() {
        let mut session = session();
        assert_eq!(session.chat_status(), ChatStatus::Ready);

        session.set_chat_enabled(false);
        assert_eq!(session.chat_status(), ChatStatus::Disabled);
        let assistant = ScriptedAssistant::new(AskOutcome::Answer("x".into()));
        let err = session.submit_question("hi", &assistant).unwrap_err();
        assert!(err.is_chat_unavailable());
        assert!(session.transcript().is_empty());

        session.set_chat_enabled(true);
        session.set_credential("  ");
        assert_eq!(session.chat_status(), ChatStatus::MissingCredential);
        assert!(session.begin_turn("hi").is_err());
        assert_eq!(assistant.calls.get(), 0);
    }
}
