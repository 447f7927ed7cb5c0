#![forbid(unsafe_code)]

pub mod intent;
pub mod model;
pub mod time;

pub use intent::{Intent, IntentClassifier, KeywordClassifier};
pub use model::{
    AnswerLetter, ChatId, MessageId, ParseLetterError, PerformanceBand, QuestionError,
    QuestionItem, QuizSession,
};
pub use time::Clock;
