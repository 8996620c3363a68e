use crate::domain::model::{Product, UserSync};
use serde::{Deserialize, Serialize};

pub const STATE_FILE: &str = "state.json";
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Signed-in identity obtained from the external auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Session {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }

    pub fn to_sync(&self) -> UserSync {
        UserSync {
            clerk_id: self.user_id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Everything the front end remembers between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub guest_chat_usage: u32,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    #[serde(default)]
    pub last_results: Vec<Product>,
    #[serde(default)]
    pub session: Option<Session>,
}

impl ClientState {
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Most recent first, case-insensitive de-duplication, capped.
    pub fn push_recent_search(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        let lowered = term.to_lowercase();
        self.recent_searches
            .retain(|existing| existing.to_lowercase() != lowered);
        self.recent_searches.insert(0, term.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn clear_recent_searches(&mut self) {
        self.recent_searches.clear();
    }

    /// Consumes one guest chat message. Returns false once the limit is reached.
    pub fn try_consume_guest_message(&mut self, limit: u32) -> bool {
        if self.guest_chat_usage >= limit {
            return false;
        }
        self.guest_chat_usage += 1;
        true
    }

    pub fn guest_messages_left(&self, limit: u32) -> u32 {
        limit.saturating_sub(self.guest_chat_usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_searches_are_deduplicated_and_capped() {
        let mut state = ClientState::default();
        for term in ["ps5", "iphone", "PS5 ", "macbook", "airpods", "dyson", "nike"] {
            state.push_recent_search(term);
        }
        assert_eq!(
            state.recent_searches,
            vec!["nike", "dyson", "airpods", "macbook", "PS5"]
        );
    }

    #[test]
    fn test_blank_search_is_not_recorded() {
        let mut state = ClientState::default();
        state.push_recent_search("   ");
        assert!(state.recent_searches.is_empty());
    }

    #[test]
    fn test_guest_limit() {
        let mut state = ClientState::default();
        for _ in 0..5 {
            assert!(state.try_consume_guest_message(5));
        }
        assert!(!state.try_consume_guest_message(5));
        assert_eq!(state.guest_chat_usage, 5);
        assert_eq!(state.guest_messages_left(5), 0);
    }

    #[test]
    fn test_older_state_files_load_with_defaults() {
        let state: ClientState = serde_json::from_str(r#"{"guest_chat_usage": 3}"#).unwrap();
        assert_eq!(state.guest_chat_usage, 3);
        assert!(state.session.is_none());
        assert!(state.recent_searches.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let session = Session {
            user_id: "user_1".to_string(),
            email: "a@b.c".to_string(),
            first_name: None,
            last_name: Some("Doe".to_string()),
        };
        assert_eq!(session.display_name(), "a@b.c");
    }
}
