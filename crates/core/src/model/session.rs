use chrono::{DateTime, Utc};
use std::fmt;

use super::question::QuestionItem;

/// Reserved topic token meaning "generate from the uploaded document".
pub const PDF_TOPIC: &str = "pdf";

/// Per-conversation quiz state.
///
/// One active session per conversation at most. The session is plain mutable
/// state with no internal locking; callers serialize access per conversation.
/// `asked_questions` grows without bound for the lifetime of the session;
/// only the most recent entries are surfaced to prompts via `recent_asked`.
#[derive(Clone, PartialEq)]
pub struct QuizSession {
    topic: String,
    topic_display: String,
    score: u32,
    answered: u32,
    current_question: Option<QuestionItem>,
    use_pdf: bool,
    asked_questions: Vec<String>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Creates a session for the given topic.
    ///
    /// The topic is normalized to lowercase for prompting; the string as
    /// passed is kept for display. `use_pdf` is fixed here and is true only
    /// when the normalized topic is the literal `pdf` token.
    #[must_use]
    pub fn new(topic: &str, started_at: DateTime<Utc>) -> Self {
        let normalized = topic.trim().to_lowercase();
        let use_pdf = normalized == PDF_TOPIC;
        Self {
            topic: normalized,
            topic_display: topic.to_owned(),
            score: 0,
            answered: 0,
            current_question: None,
            use_pdf,
            asked_questions: Vec::new(),
            started_at,
        }
    }

    /// Normalized lowercase topic used in prompts.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Topic as the user typed it, used for UI labels.
    #[must_use]
    pub fn topic_display(&self) -> &str {
        &self.topic_display
    }

    /// Count of correctly answered questions so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Count of questions answered so far. Always >= `score`.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn use_pdf(&self) -> bool {
        self.use_pdf
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question currently awaiting an answer, if one was generated.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionItem> {
        self.current_question.as_ref()
    }

    /// 1-based label number for the next question to show.
    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.answered + 1
    }

    /// Attaches a freshly generated question and records its text so later
    /// prompts can suppress repeats.
    pub fn set_current_question(&mut self, question: QuestionItem) {
        self.asked_questions.push(question.text().to_owned());
        self.current_question = Some(question);
    }

    /// Records a graded answer. Counters only ever grow.
    pub fn record_answer(&mut self, correct: bool) {
        if correct {
            self.score += 1;
        }
        self.answered += 1;
    }

    /// The most recent `limit` previously issued question texts, oldest first.
    #[must_use]
    pub fn recent_asked(&self, limit: usize) -> &[String] {
        let start = self.asked_questions.len().saturating_sub(limit);
        &self.asked_questions[start..]
    }

    /// Score as a percentage of answered questions; 0 when nothing was
    /// answered yet.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.answered) * 100.0
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", &self.topic)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("use_pdf", &self.use_pdf)
            .field("asked", &self.asked_questions.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

/// Qualitative result band for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    Outstanding,
    Good,
    Fair,
    KeepLearning,
}

impl PerformanceBand {
    /// Band for a score percentage (>=80, >=60, >=40, else).
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            PerformanceBand::Outstanding
        } else if percentage >= 60.0 {
            PerformanceBand::Good
        } else if percentage >= 40.0 {
            PerformanceBand::Fair
        } else {
            PerformanceBand::KeepLearning
        }
    }

    /// Canned encouragement line shown in the quiz summary.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            PerformanceBand::Outstanding => "Outstanding! Excellent work!",
            PerformanceBand::Good => "Good job! Keep it up!",
            PerformanceBand::Fair => "Not bad! Practice makes perfect!",
            PerformanceBand::KeepLearning => "Keep learning! You'll get better!",
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{AnswerLetter, QuestionItem};
    use crate::time::fixed_now;

    fn build_question(text: &str) -> QuestionItem {
        let options = vec!["w".into(), "x".into(), "y".into(), "z".into()];
        QuestionItem::new(text, options, AnswerLetter::A).unwrap()
    }

    #[test]
    fn new_session_normalizes_topic_and_keeps_display() {
        let session = QuizSession::new("Rust Ownership", fixed_now());
        assert_eq!(session.topic(), "rust ownership");
        assert_eq!(session.topic_display(), "Rust Ownership");
        assert!(!session.use_pdf());
    }

    #[test]
    fn pdf_token_enables_document_mode() {
        let session = QuizSession::new("pdf", fixed_now());
        assert!(session.use_pdf());
        assert!(!QuizSession::new("pdf summary", fixed_now()).use_pdf());
    }

    #[test]
    fn score_never_exceeds_answered() {
        let mut session = QuizSession::new("rust", fixed_now());
        for correct in [true, false, true, true, false] {
            session.record_answer(correct);
            assert!(session.score() <= session.answered());
        }
        assert_eq!(session.score(), 3);
        assert_eq!(session.answered(), 5);
    }

    #[test]
    fn recent_asked_windows_the_history() {
        let mut session = QuizSession::new("rust", fixed_now());
        for i in 0..15 {
            session.set_current_question(build_question(&format!("q{i}")));
        }
        let recent = session.recent_asked(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().map(String::as_str), Some("q5"));
        assert_eq!(recent.last().map(String::as_str), Some("q14"));
        // shorter history is returned whole
        let short = QuizSession::new("rust", fixed_now());
        assert!(short.recent_asked(10).is_empty());
    }

    #[test]
    fn percentage_handles_zero_answered() {
        let session = QuizSession::new("rust", fixed_now());
        assert_eq!(session.percentage(), 0.0);

        let mut session = QuizSession::new("rust", fixed_now());
        session.record_answer(true);
        session.record_answer(false);
        assert_eq!(session.percentage(), 50.0);
    }

    #[test]
    fn performance_bands_cover_boundaries() {
        assert_eq!(
            PerformanceBand::for_percentage(100.0),
            PerformanceBand::Outstanding
        );
        assert_eq!(
            PerformanceBand::for_percentage(80.0),
            PerformanceBand::Outstanding
        );
        assert_eq!(PerformanceBand::for_percentage(79.9), PerformanceBand::Good);
        assert_eq!(PerformanceBand::for_percentage(60.0), PerformanceBand::Good);
        assert_eq!(PerformanceBand::for_percentage(40.0), PerformanceBand::Fair);
        assert_eq!(
            PerformanceBand::for_percentage(39.9),
            PerformanceBand::KeepLearning
        );
        assert_eq!(
            PerformanceBand::for_percentage(0.0),
            PerformanceBand::KeepLearning
        );
    }

    #[test]
    fn current_question_is_replaced_not_cleared_on_answer() {
        let mut session = QuizSession::new("rust", fixed_now());
        session.set_current_question(build_question("first"));
        session.record_answer(true);
        // the answered question stays attached until the next one arrives
        assert_eq!(session.current_question().unwrap().text(), "first");
        session.set_current_question(build_question("second"));
        assert_eq!(session.current_question().unwrap().text(), "second");
        assert_eq!(session.recent_asked(10).len(), 2);
    }
}
