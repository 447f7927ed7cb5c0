use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{ChatId, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by chat-store adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Persisted shape of one chat transcript message.
///
/// The transcript itself is owned by an external store; this record carries
/// just enough for the answer-checking flow to annotate a previously shown
/// question message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Contract with the external chat transcript store.
///
/// Both operations resolve to `Ok(None)` for unknown message ids; transport
/// problems come back as `StorageError`.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Fetch a message by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn get_message(&self, id: &MessageId) -> Result<Option<MessageRecord>, StorageError>;

    /// Replace the content of a message, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn update_message_content(
        &self,
        id: &MessageId,
        content: &str,
    ) -> Result<Option<MessageRecord>, StorageError>;
}

/// Simple in-memory message store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<Mutex<HashMap<MessageId, MessageRecord>>>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed the store with a message, as the chat layer would after sending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store mutex is poisoned.
    pub fn insert(&self, record: MessageRecord) -> Result<(), StorageError> {
        let mut guard = self
            .messages
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.id.clone(), record);
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageStore {
    async fn get_message(&self, id: &MessageId) -> Result<Option<MessageRecord>, StorageError> {
        let guard = self
            .messages
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn update_message_content(
        &self,
        id: &MessageId,
        content: &str,
    ) -> Result<Option<MessageRecord>, StorageError> {
        let mut guard = self
            .messages
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get_mut(id).map(|record| {
            record.content = content.to_owned();
            record.clone()
        }))
    }
}
