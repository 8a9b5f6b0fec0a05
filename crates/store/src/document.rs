//! On-disk document layout.
//!
//! Field names are camelCase to match the browser storage keys the layout
//! descends from (`users`, `bestScore`, `currentUser`).

use serde::{Deserialize, Serialize};

/// Username of the account present in every new store.
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_HIGH_SCORE: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    /// Stored in the clear: accounts are a local mock, not a security boundary.
    pub password: String,
    #[serde(default)]
    pub high_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreDocument {
    pub users: Vec<UserRecord>,
    /// Best score of games played without logging in.
    pub best_score: u32,
    pub current_user: Option<String>,
}

impl ScoreDocument {
    /// A fresh document holding only the demo account.
    pub fn seeded() -> Self {
        Self {
            users: vec![UserRecord {
                username: DEMO_USERNAME.to_string(),
                password: DEMO_PASSWORD.to_string(),
                high_score: DEMO_HIGH_SCORE,
            }],
            best_score: 0,
            current_user: None,
        }
    }

    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut UserRecord> {
        self.users.iter_mut().find(|u| u.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_browser_key_names() {
        let doc = ScoreDocument::seeded();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["bestScore"], 0);
        assert_eq!(json["currentUser"], serde_json::Value::Null);
        assert_eq!(json["users"][0]["username"], "demo");
        assert_eq!(json["users"][0]["highScore"], 2048);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let doc: ScoreDocument =
            serde_json::from_str(r#"{"users":[{"username":"a","password":"b"}]}"#).unwrap();
        assert_eq!(doc.best_score, 0);
        assert_eq!(doc.current_user, None);
        assert_eq!(doc.users[0].high_score, 0);
    }

    #[test]
    fn user_lookup() {
        let mut doc = ScoreDocument::seeded();
        assert!(doc.user("demo").is_some());
        assert!(doc.user("nobody").is_none());
        doc.user_mut("demo").unwrap().high_score = 4096;
        assert_eq!(doc.user("demo").unwrap().high_score, 4096);
    }
}
