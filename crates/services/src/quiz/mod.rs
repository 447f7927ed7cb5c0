//! Quiz session management: intents, grading, lifecycle.

mod feedback;
mod reply;
mod service;

pub use feedback::AnswerFeedback;
pub use service::{AnnotationTarget, ChatbotService};
