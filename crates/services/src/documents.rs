//! Extracted document text, cached per conversation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use quiz_core::model::ChatId;

/// Cache of extracted document text keyed by conversation.
///
/// Populated by the external ingestion step after an upload, read at quiz
/// start when the session is in document mode, cleared by the
/// remove-document intent. Its lifecycle is independent of quiz sessions,
/// and entries are never evicted.
#[derive(Default)]
pub struct DocumentCache {
    texts: Mutex<HashMap<ChatId, String>>,
}

impl DocumentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, String>> {
        self.texts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores extracted text for a conversation, replacing any previous one.
    pub fn set(&self, chat_id: &ChatId, text: impl Into<String>) {
        self.lock().insert(chat_id.clone(), text.into());
    }

    /// Returns the cached text for a conversation, if any.
    #[must_use]
    pub fn get(&self, chat_id: &ChatId) -> Option<String> {
        self.lock().get(chat_id).cloned()
    }

    /// Removes the cached text. Returns whether anything was removed;
    /// calling again is safe and reports `false`.
    pub fn clear(&self, chat_id: &ChatId) -> bool {
        self.lock().remove(chat_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_round_trip() {
        let cache = DocumentCache::new();
        let chat = ChatId::new("c1");

        assert!(cache.get(&chat).is_none());
        cache.set(&chat, "extracted text");
        assert_eq!(cache.get(&chat).as_deref(), Some("extracted text"));

        assert!(cache.clear(&chat));
        assert!(cache.get(&chat).is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let cache = DocumentCache::new();
        let chat = ChatId::new("c1");
        cache.set(&chat, "text");
        assert!(cache.clear(&chat));
        assert!(!cache.clear(&chat));
    }

    #[test]
    fn entries_are_per_conversation() {
        let cache = DocumentCache::new();
        cache.set(&ChatId::new("a"), "doc a");
        cache.set(&ChatId::new("b"), "doc b");
        assert!(cache.clear(&ChatId::new("a")));
        assert_eq!(cache.get(&ChatId::new("b")).as_deref(), Some("doc b"));
    }
}
