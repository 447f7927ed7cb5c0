//! On-demand question generation: drive the completion provider, parse and
//! validate its output, retry once on garbage.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use quiz_core::model::{AnswerLetter, QuestionItem};
use quiz_core::time::Clock;

use crate::completion::{CallParams, CompletionProvider};
use crate::error::GenerateError;
use crate::prompt::{QUESTION_SYSTEM_PROMPT, build_question_prompt};
use crate::retry;

/// Attempts per generation request. The second attempt rebuilds the prompt
/// (fresh seed) before calling the provider again.
pub const MAX_ATTEMPTS: usize = 2;

/// One element of the provider's question array. Field names are the wire
/// contract (`q` / `options` / `a`).
#[derive(Debug, Deserialize)]
struct RawQuestion {
    q: String,
    options: Vec<String>,
    a: String,
}

/// Generates validated multiple-choice questions for a topic or document.
#[derive(Clone)]
pub struct QuestionGenerator {
    provider: Arc<dyn CompletionProvider>,
    clock: Clock,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, clock: Clock) -> Self {
        Self { provider, clock }
    }

    /// Generates up to `count` questions. Returns an empty vec once both
    /// attempts fail: a reported failure the caller turns into a chat
    /// reply, never a hard error.
    pub async fn generate(
        &self,
        topic: &str,
        count: usize,
        pdf_text: Option<&str>,
        asked: &[String],
    ) -> Vec<QuestionItem> {
        let outcome = retry::attempt(MAX_ATTEMPTS, async |attempt| {
            debug!(topic, attempt, "generating questions");
            self.generate_once(topic, count, pdf_text, asked).await
        })
        .await;

        match outcome {
            Ok(questions) => questions,
            Err(err) => {
                warn!(topic, error = %err, "question generation failed on all attempts");
                Vec::new()
            }
        }
    }

    async fn generate_once(
        &self,
        topic: &str,
        count: usize,
        pdf_text: Option<&str>,
        asked: &[String],
    ) -> Result<Vec<QuestionItem>, GenerateError> {
        let seed = self.clock.now().timestamp_millis() % 10_000;
        let prompt = build_question_prompt(topic, count, asked, pdf_text, seed);
        let raw = self
            .provider
            .complete(QUESTION_SYSTEM_PROMPT, &prompt, CallParams::question_generation())
            .await?;

        let mut questions = parse_questions(&raw)?;
        if questions.is_empty() {
            return Err(GenerateError::NoValidQuestions);
        }
        questions.truncate(count);
        Ok(questions)
    }
}

/// Strip surrounding markdown code fences from a model response.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        trimmed
    };
    let clean = clean.strip_suffix("```").unwrap_or(clean);
    clean.trim()
}

/// Parses a provider response into validated questions.
///
/// Items missing a field, with an option count other than 4, or with a
/// correct letter outside A–D are dropped; survivors keep their order.
///
/// # Errors
///
/// Returns `GenerateError::Parse` when the response is not a JSON array.
pub(crate) fn parse_questions(raw: &str) -> Result<Vec<QuestionItem>, GenerateError> {
    let clean = strip_code_fences(raw);
    let items: Vec<serde_json::Value> = serde_json::from_str(clean)?;

    let mut questions = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let raw: RawQuestion = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(index = idx, error = %err, "dropping malformed question item");
                continue;
            }
        };
        let Ok(correct) = AnswerLetter::from_str(&raw.a) else {
            debug!(index = idx, letter = %raw.a, "dropping question with invalid answer letter");
            continue;
        };
        match QuestionItem::new(raw.q, raw.options, correct) {
            Ok(question) => questions.push(question),
            Err(err) => {
                debug!(index = idx, error = %err, "dropping question with bad options");
            }
        }
    }
    Ok(questions)
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
