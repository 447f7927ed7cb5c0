//! User-facing reply text. Wording is part of the product surface (the
//! frontend pattern-matches some of it), so strings here change carefully.

use quiz_core::model::{AnswerLetter, PerformanceBand, QuestionItem};

use crate::topics::FALLBACK_TOPICS;

pub(crate) const NO_DOCUMENT_UPLOADED: &str = "📄 No PDF uploaded yet. Please upload a PDF file \
first using the 📎 button, then type 'quiz pdf'.";

pub(crate) const PROVIDER_UNCONFIGURED: &str =
    "⚠️ AI service is not configured. Please set QUIZ_AI_API_KEY environment variable.";

pub(crate) const DOCUMENT_REMOVED: &str = "✅ PDF content has been removed. You can now upload a \
new PDF or start topic-based quizzes.";

pub(crate) const NO_DOCUMENT_TO_REMOVE: &str = "ℹ️ No PDF content found to remove.";

pub(crate) const NO_ACTIVE_QUIZ: &str = "No active quiz. Type 'quiz [topic]' to start a quiz!";

pub(crate) const NO_ACTIVE_QUIZ_FOR_QUESTION: &str =
    "No active quiz. Type 'quiz [topic]' to start!";

pub(crate) const NO_ACTIVE_QUESTION: &str = "No active question. Something went wrong.";

pub(crate) const GENERATION_FAILED: &str =
    "Sorry, I couldn't generate a new question. Type 'stop' to end the quiz.";

pub(crate) const NO_QUIZ_FOUND: &str = "No quiz found.";

/// Static help/welcome message listing the fallback topics and usage.
pub(crate) fn help_message() -> String {
    let topics = FALLBACK_TOPICS.join(", ");
    format!(
        "👋 Welcome to QuizBot - Your Learning Companion!\n\n\
         I help you learn through interactive quizzes with AI-generated questions. Here's how to \
         get started:\n\n\
         📚 **Popular Topics:**\n{topics}\n\n\
         💡 **How to Start:**\n\
         Just ask naturally! Examples: \n\
         \u{2022} quiz python\n\
         \u{2022} test me on machine learning\n\
         \u{2022} teach me about biology\n\
         \u{2022} I want to learn world war 2\n\
         \u{2022} ask me questions about chemistry\n\n\
         📎 **Upload PDF:**\n\
         You can also upload any PDF document and type 'quiz pdf' to generate questions from it!\n\
         To remove uploaded PDF, type: 'remove pdf'\n\n\
         🎯 **How it Works:**\n\
         1. I'll generate fresh questions for you\n\
         2. Answer each question one by one\n\
         3. Get instant feedback\n\
         4. See your final score!\n\n\
         Ready to learn? Type 'quiz' followed by any topic you want to learn about! 🚀"
    )
}

/// Renders a question for display, with the hidden `[CORRECT:X]` marker the
/// frontend uses for instant validation.
pub(crate) fn render_question(
    topic_display: &str,
    question_number: u32,
    question: &QuestionItem,
) -> String {
    let mut options_text = String::new();
    for (letter, option) in AnswerLetter::ALL.iter().zip(question.options()) {
        if !options_text.is_empty() {
            options_text.push('\n');
        }
        options_text.push_str(&format!("{letter}. {option}"));
    }
    format!(
        "**{topic_display} Assessment**\nQuestion {question_number}\n\n{}\n\n{options_text}\n\n\
         Type your answer (A, B, C, or D) or 'stop' to end:\n[CORRECT:{}]",
        question.text(),
        question.correct(),
    )
}

/// Summary emitted when a new quiz start terminates an active one.
pub(crate) fn previous_quiz_terminated(
    old_topic_display: &str,
    old_score: u32,
    old_answered: u32,
    new_quiz_reply: &str,
) -> String {
    format!(
        "**Previous Quiz Terminated**\n\nTopic: {old_topic_display}\nScore: \
         {old_score}/{old_answered} questions answered\n\n---\n\n{new_quiz_reply}"
    )
}

/// End-of-quiz summary with score, percentage and encouragement.
pub(crate) fn quiz_complete(
    score: u32,
    answered: u32,
    percentage: f64,
    band: PerformanceBand,
) -> String {
    format!(
        "**Quiz Complete!**\n\n**Your Score:** {score}/{answered} ({percentage:.0}%)\n\n{}\n\n\
         Want to try again or explore another topic?\n\
         Type: quiz [any topic you want]\n\
         Example: quiz Machine Learning, quiz History, quiz Biology, etc.",
        band.message()
    )
}
