#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{InMemoryMessageStore, MessageRecord, MessageRepository, StorageError};
