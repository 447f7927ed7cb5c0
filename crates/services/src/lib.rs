#![forbid(unsafe_code)]

pub mod completion;
pub mod documents;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod quiz;
pub mod retry;
pub mod topics;

pub use quiz_core::Clock;

pub use completion::{CallParams, CompletionConfig, CompletionProvider, HttpCompletionProvider};
pub use documents::DocumentCache;
pub use error::{CompletionError, GenerateError};
pub use generator::QuestionGenerator;
pub use quiz::{AnnotationTarget, AnswerFeedback, ChatbotService};
pub use topics::{FALLBACK_TOPICS, RecentChat, TopicSuggester};
