mod ids;
mod question;
mod session;

pub use ids::{ChatId, MessageId};
pub use question::{AnswerLetter, ParseLetterError, QuestionError, QuestionItem};
pub use session::{PDF_TOPIC, PerformanceBand, QuizSession};
