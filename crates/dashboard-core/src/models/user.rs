//! Account types.

use serde::{Deserialize, Serialize};

use crate::tokens::TokenPair;

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl User {
    /// First and last name joined, or the username when both are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Response from the register and login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_decodes() {
        let response: AuthResponse = serde_json::from_value(json!({
            "message": "ok",
            "user": {
                "id": 1,
                "username": "admin",
                "email": "admin@example.com",
                "first_name": "Ahmed",
                "last_name": "Mohamed",
                "avatar_url": null,
                "role": "admin"
            },
            "tokens": {"access": "a", "refresh": "r"}
        }))
        .unwrap();

        let user = response.user.unwrap();
        assert_eq!(user.display_name(), "Ahmed Mohamed");
        assert_eq!(user.role, "admin");
        assert_eq!(response.tokens.access.as_str(), "a");
    }

    #[test]
    fn auth_response_requires_tokens() {
        let result = serde_json::from_value::<AuthResponse>(json!({"message": "ok"}));
        assert!(result.is_err());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user: User = serde_json::from_value(json!({"id": 2, "username": "sara"})).unwrap();
        assert_eq!(user.display_name(), "sara");
        assert_eq!(user.role, "user");
    }
}
