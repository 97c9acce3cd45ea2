//! Analysis and chat CLI commands
//!
//! One-shot versions of the dashboard's Calculate action and a single chat
//! turn against the generation endpoint.

use std::io::IsTerminal;

use tracing::debug;

use crate::ai::GeminiClient;
use crate::config::settings::Settings;
use crate::display::{format_analysis, format_analysis_json};
use crate::error::{FundError, FundResult};
use crate::models::ApiCredential;
use crate::services::Session;

use super::inputs::InputArgs;

/// Run Calculate once and print the metrics
pub fn handle_analyze_command(settings: &Settings, inputs: &InputArgs, json: bool) -> FundResult<()> {
    let mut session = Session::new(
        inputs.to_inputs(settings),
        ApiCredential::default(),
        false,
    );
    let context = session.calculate()?;

    if json {
        println!("{}", format_analysis_json(context)?);
    } else {
        print!(
            "{}",
            format_analysis(context, &settings.currency_symbol, &settings.date_format)
        );
    }
    Ok(())
}

/// Calculate, ask one question, and print the assistant's reply
pub fn handle_ask_command(
    settings: &Settings,
    question: &str,
    inputs: &InputArgs,
    api_key: Option<String>,
) -> FundResult<()> {
    if question.trim().is_empty() {
        return Err(FundError::invalid_field("Question", "cannot be empty"));
    }

    let credential = match api_key {
        Some(key) => ApiCredential::new(key),
        None => prompt_for_key()?,
    };

    let mut session = Session::new(inputs.to_inputs(settings), credential, settings.chat_enabled);
    session.calculate()?;

    let client = GeminiClient::new(&settings.ai)?;
    debug!(endpoint = %client.endpoint(), "asking assistant");
    let reply = session.submit_question(question.trim(), &client)?;

    println!("{}", reply.content);
    Ok(())
}

/// Hidden prompt when stdin is interactive; a blank credential otherwise
fn prompt_for_key() -> FundResult<ApiCredential> {
    if !std::io::stdin().is_terminal() {
        return Ok(ApiCredential::default());
    }

    let key = rpassword::prompt_password("Gemini API key: ")
        .map_err(|e| FundError::Io(format!("Failed to read API key: {}", e)))?;
    Ok(ApiCredential::new(key))
}
