//! Classification of free-text user messages into quiz intents.
//!
//! The default classifier works by substring keyword detection and ordered
//! stock-phrase stripping. Both are deliberately naive (a topic literally
//! named "stop" collides with the stop command), so the strategy sits behind
//! a trait and can be swapped without touching the session state machine.

/// The classified purpose of a user's message.
///
/// `Other` covers both answer submissions (when a session is active) and
/// unrecognized chatter (when none is); the session manager decides which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start a quiz on the extracted, non-empty topic.
    StartQuiz { topic: String },
    /// End the active quiz.
    Stop,
    /// Forget the uploaded document for this conversation.
    RemoveDocument,
    /// Anything else.
    Other,
}

/// Strategy for mapping a raw user message to an [`Intent`].
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Intent;
}

/// Keywords whose presence anywhere in the message marks a quiz request.
const QUIZ_KEYWORDS: [&str; 8] = [
    "quiz",
    "test",
    "learn",
    "teach",
    "practice",
    "study",
    "questions about",
    "ask me about",
];

/// Stock phrases removed from the message to leave the topic behind.
///
/// Order matters and replacement is by substring, not word boundary: `on`
/// also strips the tail of "python". This list and its order are the
/// authoritative behavior; widening a phrase or reordering changes which
/// topics survive extraction.
const STOCK_PHRASES: [&str; 17] = [
    "quiz",
    "test me on",
    "teach me",
    "teach me about",
    "i want to learn",
    "learn about",
    "practice",
    "study",
    "questions about",
    "questions on",
    "ask me about",
    "ask me",
    "give me",
    "start",
    "begin",
    "on",
    "about",
];

/// Exact phrases (after lowercase + trim) that clear the uploaded document.
const REMOVE_DOCUMENT_PHRASES: [&str; 3] = ["remove pdf", "delete pdf", "clear pdf"];

const STOP_COMMAND: &str = "stop";

/// Default keyword-based classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Whether the message contains any quiz-request keyword.
    #[must_use]
    pub fn is_quiz_request(message_lower: &str) -> bool {
        QUIZ_KEYWORDS
            .iter()
            .any(|keyword| message_lower.contains(keyword))
    }

    /// Strips the stock phrases from an already-lowercased message and trims
    /// the remainder. The remainder may be empty.
    #[must_use]
    pub fn extract_topic(message_lower: &str) -> String {
        let mut topic = message_lower.to_owned();
        for phrase in STOCK_PHRASES {
            topic = topic.replace(phrase, " ");
        }
        topic.trim().to_owned()
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Intent {
        let lower = text.trim().to_lowercase();

        if Self::is_quiz_request(&lower) {
            let topic = Self::extract_topic(&lower);
            if !topic.is_empty() {
                return Intent::StartQuiz { topic };
            }
        }

        if REMOVE_DOCUMENT_PHRASES.contains(&lower.as_str()) {
            return Intent::RemoveDocument;
        }

        if lower == STOP_COMMAND {
            return Intent::Stop;
        }

        Intent::Other
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        KeywordClassifier.classify(text)
    }

    #[test]
    fn detects_quiz_request_with_topic() {
        assert_eq!(
            classify("quiz rust"),
            Intent::StartQuiz {
                topic: "rust".into()
            }
        );
        assert_eq!(
            classify("Ask me about world war 2"),
            Intent::StartQuiz {
                topic: "world war 2".into()
            }
        );
    }

    #[test]
    fn keyword_without_topic_is_not_a_start() {
        assert_eq!(classify("quiz"), Intent::Other);
        assert_eq!(classify("  practice  "), Intent::Other);
    }

    #[test]
    fn topic_extraction_overstrips_embedded_stopwords() {
        // `on` is a stock phrase and replacement is by substring, so the
        // tail of "python" is stripped too. The phrase list and its order
        // are load-bearing; this pins the behavior so nobody narrows the
        // matching to word boundaries by accident.
        assert_eq!(
            classify("quiz python"),
            Intent::StartQuiz {
                topic: "pyth".into()
            }
        );
    }

    #[test]
    fn pdf_token_survives_extraction() {
        assert_eq!(
            classify("quiz pdf"),
            Intent::StartQuiz {
                topic: "pdf".into()
            }
        );
    }

    #[test]
    fn stop_requires_exact_match() {
        assert_eq!(classify("stop"), Intent::Stop);
        assert_eq!(classify("  STOP "), Intent::Stop);
        // "stop the quiz" carries the quiz keyword and becomes a restart
        assert!(matches!(
            classify("stop the quiz"),
            Intent::StartQuiz { .. }
        ));
    }

    #[test]
    fn remove_document_phrases_match_exactly() {
        assert_eq!(classify("remove pdf"), Intent::RemoveDocument);
        assert_eq!(classify("Delete PDF"), Intent::RemoveDocument);
        assert_eq!(classify("clear pdf"), Intent::RemoveDocument);
        assert_eq!(classify("please remove pdf"), Intent::Other);
    }

    #[test]
    fn plain_answers_are_other() {
        assert_eq!(classify("A"), Intent::Other);
        assert_eq!(classify("hello there"), Intent::Other);
    }
}
