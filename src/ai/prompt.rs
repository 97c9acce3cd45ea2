//! Prompt construction for the budget assistant

use chrono::NaiveDate;

use crate::error::FundResult;
use crate::models::AnalysisContext;

/// One combined prompt: system instruction, analysis data, then the question
pub fn build_prompt(
    question: &str,
    context: &AnalysisContext,
    today: NaiveDate,
) -> FundResult<String> {
    let context_json = context.to_prompt_json()?;

    let mut prompt = String::new();
    prompt.push_str(&system_instruction(today, &context_json));
    prompt.push_str("\n\nUSER QUESTION:\n");
    prompt.push_str(question.trim());
    prompt.push('\n');

    Ok(prompt)
}

fn system_instruction(today: NaiveDate, context_json: &str) -> String {
    format!(
        "You are a financial analyst assistant for a Navy budget office. \
         You help track OMN, OPN and SCN appropriation balances, burn rate and \
         expiry dates.\n\
         Today's date is {}.\n\
         Answer using the analysis data below. Amounts are US dollars. \
         If the data does not contain what is needed, say so plainly.\n\n\
         ANALYSIS DATA:\n{}",
        today.format("%Y-%m-%d"),
        context_json
    )
}
