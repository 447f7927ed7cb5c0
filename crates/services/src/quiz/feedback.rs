//! Grading feedback: the reply payload and transcript annotation.

use quiz_core::model::{AnswerLetter, MessageId};
use storage::{MessageRepository, StorageError};

/// Outcome of grading one answer.
///
/// `render` produces the machine-readable payload the chat frontend splits
/// from the next question; the exact `FEEDBACK:` shape is a compatibility
/// contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct {
        correct: AnswerLetter,
    },
    /// `submitted` carries the user's canonicalized (trimmed, uppercased)
    /// input, which may be longer than one letter.
    Incorrect {
        submitted: String,
        correct: AnswerLetter,
    },
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerFeedback::Correct { .. })
    }

    #[must_use]
    pub fn correct_letter(&self) -> AnswerLetter {
        match self {
            AnswerFeedback::Correct { correct } | AnswerFeedback::Incorrect { correct, .. } => {
                *correct
            }
        }
    }

    /// Wire encoding of the feedback payload.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            AnswerFeedback::Correct { correct } => format!("FEEDBACK:CORRECT:{correct}"),
            AnswerFeedback::Incorrect { submitted, correct } => {
                format!("FEEDBACK:INCORRECT:{submitted}:{correct}")
            }
        }
    }
}

/// Rewrites a shown question message with correctness markers: the correct
/// option line gains a check mark, the chosen option line (when wrong) a
/// cross, and a verdict line is appended.
pub(crate) async fn annotate_question_message(
    store: &dyn MessageRepository,
    message_id: &MessageId,
    feedback: &AnswerFeedback,
) -> Result<(), StorageError> {
    let Some(message) = store.get_message(message_id).await? else {
        return Ok(());
    };
    let updated = annotate_content(&message.content, feedback);
    store.update_message_content(message_id, &updated).await?;
    Ok(())
}

fn annotate_content(content: &str, feedback: &AnswerFeedback) -> String {
    let correct = feedback.correct_letter().as_char();
    // only a bare-letter submission can match an option line
    let chosen: Option<char> = match feedback {
        AnswerFeedback::Incorrect { submitted, .. } if submitted.chars().count() == 1 => {
            submitted.chars().next()
        }
        _ => None,
    };

    let mut updated: Vec<String> = Vec::new();
    for line in content.split('\n') {
        match option_letter(line) {
            Some(letter) if letter == correct => updated.push(format!("✅ {line}")),
            Some(letter) if Some(letter) == chosen => updated.push(format!("❌ {line}")),
            _ => updated.push(line.to_owned()),
        }
    }

    updated.push(String::new());
    match feedback {
        AnswerFeedback::Correct { .. } => updated.push("✅ Correct!".to_owned()),
        AnswerFeedback::Incorrect { correct, .. } => {
            updated.push(format!("❌ Incorrect. The correct answer is {correct}."));
        }
    }

    updated.join("\n")
}

/// `Some('A'..='D')` when the line is an option line like `B. some text`.
fn option_letter(line: &str) -> Option<char> {
    let stripped = line.trim();
    let mut chars = stripped.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    // an option line has text beyond the "X." prefix
    chars.next()?;
    (matches!(first, 'A'..='D') && second == '.').then_some(first)
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
