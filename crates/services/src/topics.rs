//! Trending-topic suggestions with a static fallback.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::completion::{CallParams, CompletionProvider};
use crate::generator::strip_code_fences;
use crate::prompt::{SUGGESTION_SYSTEM_PROMPT, build_suggestion_prompt};

/// Topics served when the provider is unavailable or returns garbage.
/// Order matters: padding draws from the front of this list.
pub const FALLBACK_TOPICS: [&str; 6] = [
    "Python Programming",
    "Data Science",
    "Web Development",
    "Cloud Computing",
    "React",
    "Databases",
];

/// Suggestions always come back with exactly this many entries.
pub const SUGGESTED_TOPIC_COUNT: usize = 6;

/// Most recent chat titles surfaced to the model.
pub const RECENT_TITLES_LIMIT: usize = 100;

/// A recently created conversation, as reported by the chat layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentChat {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Asks the completion provider for trending quiz topics, degrading to the
/// fallback list on any problem.
#[derive(Clone)]
pub struct TopicSuggester {
    provider: Arc<dyn CompletionProvider>,
}

impl TopicSuggester {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Returns exactly [`SUGGESTED_TOPIC_COUNT`] topic labels.
    ///
    /// Provider unconfigured, call failure, or a response that is not a JSON
    /// string array all yield the fallback list unmodified; a short but
    /// non-empty result is padded from the fallback list in order.
    pub async fn suggest(&self, recent_chats: &[RecentChat]) -> Vec<String> {
        if !self.provider.is_configured() {
            return fallback_topics();
        }

        let titles = most_recent_titles(recent_chats, RECENT_TITLES_LIMIT);
        let prompt = build_suggestion_prompt(&titles);
        let raw = match self
            .provider
            .complete(SUGGESTION_SYSTEM_PROMPT, &prompt, CallParams::topic_suggestion())
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "topic suggestion call failed, using fallback");
                return fallback_topics();
            }
        };

        match parse_topic_list(&raw) {
            Some(topics) => normalize_topics(topics),
            None => {
                warn!("topic suggestion response was not a string array, using fallback");
                fallback_topics()
            }
        }
    }
}

#[must_use]
pub fn fallback_topics() -> Vec<String> {
    FALLBACK_TOPICS.iter().map(|t| (*t).to_owned()).collect()
}

/// Titles of the `limit` most recently created chats, newest first.
fn most_recent_titles(chats: &[RecentChat], limit: usize) -> Vec<String> {
    let mut sorted: Vec<&RecentChat> = chats.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(limit)
        .map(|chat| chat.title.clone())
        .collect()
}

/// `Some(list)` if the response parses as a JSON array of strings.
fn parse_topic_list(raw: &str) -> Option<Vec<String>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(strip_code_fences(raw)).ok()?;
    values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Forces the parsed list to exactly [`SUGGESTED_TOPIC_COUNT`] entries:
/// truncate a long list, pad a short one from the fallback list in order,
/// and replace an empty one entirely.
pub(crate) fn normalize_topics(mut topics: Vec<String>) -> Vec<String> {
    if topics.is_empty() {
        return fallback_topics();
    }
    if topics.len() >= SUGGESTED_TOPIC_COUNT {
        topics.truncate(SUGGESTED_TOPIC_COUNT);
        return topics;
    }
    let missing = SUGGESTED_TOPIC_COUNT - topics.len();
    topics.extend(FALLBACK_TOPICS.iter().take(missing).map(|t| (*t).to_owned()));
    topics
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn normalize_pads_short_lists_in_fallback_order() {
        let topics = normalize_topics(vec!["One".into(), "Two".into(), "Three".into()]);
        assert_eq!(
            topics,
            vec![
                "One",
                "Two",
                "Three",
                "Python Programming",
                "Data Science",
                "Web Development"
            ]
        );
    }

    #[test]
    fn normalize_truncates_long_lists() {
        let topics: Vec<String> = (0..9).map(|i| format!("t{i}")).collect();
        let normalized = normalize_topics(topics);
        assert_eq!(normalized.len(), SUGGESTED_TOPIC_COUNT);
        assert_eq!(normalized[0], "t0");
        assert_eq!(normalized[5], "t5");
    }

    #[test]
    fn normalize_replaces_empty_lists() {
        assert_eq!(normalize_topics(Vec::new()), fallback_topics());
    }

    #[test]
    fn parse_rejects_non_string_entries() {
        assert!(parse_topic_list(r#"["a", 2, "c"]"#).is_none());
        assert!(parse_topic_list(r#"{"topics": []}"#).is_none());
        assert_eq!(
            parse_topic_list(r#"["a", "b"]"#),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn recent_titles_sorted_newest_first_and_capped() {
        let chats: Vec<RecentChat> = (0..120i64)
            .map(|i| RecentChat {
                title: format!("chat {i}"),
                created_at: fixed_now() + chrono::Duration::minutes(i),
            })
            .collect();
        let titles = most_recent_titles(&chats, RECENT_TITLES_LIMIT);
        assert_eq!(titles.len(), RECENT_TITLES_LIMIT);
        assert_eq!(titles[0], "chat 119");
        assert_eq!(titles[99], "chat 20");
    }
}
