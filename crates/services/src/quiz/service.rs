use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use quiz_core::intent::{Intent, IntentClassifier, KeywordClassifier};
use quiz_core::model::{ChatId, MessageId, PDF_TOPIC, PerformanceBand, QuizSession};
use quiz_core::time::Clock;
use storage::MessageRepository;

use crate::completion::{CompletionProvider, HttpCompletionProvider};
use crate::documents::DocumentCache;
use crate::generator::QuestionGenerator;
use crate::prompt::ASKED_WINDOW;
use crate::topics::{RecentChat, TopicSuggester};

use super::feedback::{AnswerFeedback, annotate_question_message};
use super::reply;

/// Questions generated per turn; the quiz is open-ended and serves one at
/// a time.
const QUESTIONS_PER_TURN: usize = 1;

/// The previously shown question message, for correctness annotation.
pub struct AnnotationTarget<'a> {
    pub store: &'a dyn MessageRepository,
    pub message_id: MessageId,
}

/// Quiz-session state machine and question lifecycle.
///
/// Owns one optional [`QuizSession`] per conversation plus the document
/// cache. Neither map is ever evicted: a conversation that goes quiet keeps
/// its session until a stop or restart, and document text stays until
/// explicitly removed.
///
/// The service is `Send + Sync` and lock scopes are short, but operations
/// are not serialized per conversation: two concurrent messages for the
/// same chat can interleave between scoring and next-question attachment.
/// Callers are expected to process one message per conversation at a time.
pub struct ChatbotService {
    sessions: Mutex<HashMap<ChatId, QuizSession>>,
    documents: DocumentCache,
    provider: Arc<dyn CompletionProvider>,
    generator: QuestionGenerator,
    suggester: TopicSuggester,
    classifier: Box<dyn IntentClassifier>,
    clock: Clock,
}

impl ChatbotService {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, clock: Clock) -> Self {
        let generator = QuestionGenerator::new(Arc::clone(&provider), clock);
        let suggester = TopicSuggester::new(Arc::clone(&provider));
        Self {
            sessions: Mutex::new(HashMap::new()),
            documents: DocumentCache::new(),
            provider,
            generator,
            suggester,
            classifier: Box::new(KeywordClassifier),
            clock,
        }
    }

    /// Service wired to the environment-configured HTTP provider.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            Arc::new(HttpCompletionProvider::from_env()),
            Clock::default_clock(),
        )
    }

    /// Swap the intent-matching strategy.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<ChatId, QuizSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Document cache passthrough ────────────────────────────────────────

    /// Stores extracted document text, as the ingestion step does on upload.
    pub fn set_document_text(&self, chat_id: &ChatId, text: impl Into<String>) {
        self.documents.set(chat_id, text);
    }

    #[must_use]
    pub fn document_text(&self, chat_id: &ChatId) -> Option<String> {
        self.documents.get(chat_id)
    }

    /// Forgets cached document text. Safe to call repeatedly.
    pub fn clear_document_text(&self, chat_id: &ChatId) -> bool {
        self.documents.clear(chat_id)
    }

    // ─── Session inspection ────────────────────────────────────────────────

    #[must_use]
    pub fn has_session(&self, chat_id: &ChatId) -> bool {
        self.lock_sessions().contains_key(chat_id)
    }

    /// Point-in-time copy of the active session, if any.
    #[must_use]
    pub fn active_session(&self, chat_id: &ChatId) -> Option<QuizSession> {
        self.lock_sessions().get(chat_id).cloned()
    }

    // ─── Entry point ───────────────────────────────────────────────────────

    /// Handles one user utterance and produces the bot reply.
    ///
    /// Decision order, first match wins: restart while active, remove
    /// document, stop/answer within an active session, fresh start, help.
    pub async fn handle_message(
        &self,
        chat_id: &ChatId,
        text: &str,
        annotation: Option<AnnotationTarget<'_>>,
    ) -> String {
        let intent = self.classifier.classify(text);
        let has_session = self.has_session(chat_id);

        match intent {
            Intent::StartQuiz { topic } if has_session => {
                let previous = self.lock_sessions().remove(chat_id);
                let first = self.start_quiz(chat_id, &topic).await;
                match previous {
                    Some(old) => reply::previous_quiz_terminated(
                        old.topic_display(),
                        old.score(),
                        old.answered(),
                        &first,
                    ),
                    None => first,
                }
            }
            Intent::RemoveDocument => {
                if self.documents.clear(chat_id) {
                    reply::DOCUMENT_REMOVED.to_owned()
                } else {
                    reply::NO_DOCUMENT_TO_REMOVE.to_owned()
                }
            }
            Intent::Stop if has_session => self.end_quiz(chat_id),
            _ if has_session => self.check_answer(chat_id, text, annotation).await,
            Intent::StartQuiz { topic } => self.start_quiz(chat_id, &topic).await,
            _ => reply::help_message(),
        }
    }

    // ─── Lifecycle operations ──────────────────────────────────────────────

    /// Starts a session and serves the first question.
    ///
    /// Refuses without creating a session when document mode is requested
    /// with nothing uploaded, or when no provider credential is configured.
    pub async fn start_quiz(&self, chat_id: &ChatId, topic: &str) -> String {
        let normalized = topic.trim().to_lowercase();
        debug!(chat = %chat_id, topic = %normalized, "starting quiz");

        if normalized == PDF_TOPIC && self.documents.get(chat_id).is_none() {
            return reply::NO_DOCUMENT_UPLOADED.to_owned();
        }
        if !self.provider.is_configured() {
            return reply::PROVIDER_UNCONFIGURED.to_owned();
        }

        self.lock_sessions()
            .insert(chat_id.clone(), QuizSession::new(topic, self.clock.now()));
        self.ask_next_question(chat_id).await
    }

    /// Generates the next question and attaches it to the session.
    ///
    /// On generation failure the session is left as it was; the reply asks
    /// the user to stop, and the next message can try again.
    async fn ask_next_question(&self, chat_id: &ChatId) -> String {
        let snapshot = {
            let sessions = self.lock_sessions();
            sessions.get(chat_id).map(|session| {
                (
                    session.topic().to_owned(),
                    session.use_pdf(),
                    session.recent_asked(ASKED_WINDOW).to_vec(),
                )
            })
        };
        let Some((topic, use_pdf, asked)) = snapshot else {
            return reply::NO_ACTIVE_QUIZ_FOR_QUESTION.to_owned();
        };

        let pdf_text = if use_pdf {
            self.documents.get(chat_id)
        } else {
            None
        };

        let questions = self
            .generator
            .generate(&topic, QUESTIONS_PER_TURN, pdf_text.as_deref(), &asked)
            .await;
        let Some(question) = questions.into_iter().next() else {
            return reply::GENERATION_FAILED.to_owned();
        };

        let mut sessions = self.lock_sessions();
        let Some(session) = sessions.get_mut(chat_id) else {
            return reply::NO_ACTIVE_QUIZ_FOR_QUESTION.to_owned();
        };
        let rendered =
            reply::render_question(session.topic_display(), session.question_number(), &question);
        session.set_current_question(question);
        rendered
    }

    /// Grades an answer, annotates the shown question message when a target
    /// is supplied, and chains the next question onto the reply.
    pub async fn check_answer(
        &self,
        chat_id: &ChatId,
        answer: &str,
        annotation: Option<AnnotationTarget<'_>>,
    ) -> String {
        let feedback = {
            let mut sessions = self.lock_sessions();
            let Some(session) = sessions.get_mut(chat_id) else {
                return reply::NO_ACTIVE_QUIZ.to_owned();
            };
            let submitted = answer.trim().to_uppercase();
            let Some((correct, is_correct)) = session
                .current_question()
                .map(|question| (question.correct(), question.is_correct(&submitted)))
            else {
                return reply::NO_ACTIVE_QUESTION.to_owned();
            };
            session.record_answer(is_correct);
            if is_correct {
                AnswerFeedback::Correct { correct }
            } else {
                AnswerFeedback::Incorrect { submitted, correct }
            }
        };

        if let Some(target) = annotation {
            if let Err(err) =
                annotate_question_message(target.store, &target.message_id, &feedback).await
            {
                warn!(error = %err, "failed to annotate question message");
            }
        }

        let next = self.ask_next_question(chat_id).await;
        format!("{}\n\nNEXT_QUESTION:{next}", feedback.render())
    }

    /// Ends the quiz, removing the session unconditionally, and returns the
    /// score summary.
    pub fn end_quiz(&self, chat_id: &ChatId) -> String {
        let Some(session) = self.lock_sessions().remove(chat_id) else {
            return reply::NO_QUIZ_FOUND.to_owned();
        };
        let percentage = session.percentage();
        let band = PerformanceBand::for_percentage(percentage);
        reply::quiz_complete(session.score(), session.answered(), percentage, band)
    }

    /// Trending topic labels for the UI, always exactly six.
    pub async fn suggest_topics(&self, recent_chats: &[RecentChat]) -> Vec<String> {
        self.suggester.suggest(recent_chats).await
    }
}
