//! Wire models for the forum, auth and chat services.

use serde::{Deserialize, Serialize};

/// Identifier assigned by a remote service. The client never mints one.
pub type Id = i64;

/// Identifier (de)serialization that accepts both `12` and `"12"`.
///
/// The forum and community services disagree on whether ids are numbers or
/// strings, so every id field goes through here.
pub mod flexible_id {
    use serde::{de, Deserialize, Deserializer};

    use super::Id;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(Id),
        Str(String),
    }

    fn convert<E: de::Error>(raw: Raw) -> Result<Id, E> {
        match raw {
            Raw::Int(id) => Ok(id),
            Raw::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id: {s:?}"))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Id, D::Error> {
        convert(Raw::deserialize(deserializer)?)
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Id>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }
}

// --- Forum ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "flexible_id::deserialize_opt")]
    pub author_id: Option<Id>,
    #[serde(default)]
    pub author_username: String,
    #[serde(default, deserialize_with = "flexible_id::deserialize_opt")]
    pub community_id: Option<Id>,
    /// Only present on the per-user post listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_name: Option<String>,
    #[serde(default)]
    pub creation_time: String,
    #[serde(default)]
    pub comment_count: u32,
}

impl Post {
    /// Authors may edit and delete their own posts; so may the `admin` user.
    pub fn can_be_managed_by(&self, user_id: Option<Id>, username: Option<&str>) -> bool {
        let is_author = matches!((self.author_id, user_id), (Some(a), Some(u)) if a == u);
        is_author || username == Some(ADMIN_USERNAME)
    }
}

/// Username that may moderate any post.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    pub body: String,
    #[serde(default)]
    pub author_username: String,
    #[serde(default, deserialize_with = "flexible_id::deserialize_opt")]
    pub author_id: Option<Id>,
    #[serde(default)]
    pub creation_time: String,
    #[serde(default, deserialize_with = "flexible_id::deserialize_opt")]
    pub post_id: Option<Id>,
}

impl Comment {
    /// Same rule as posts. Comments without an author id fall back to the
    /// username.
    pub fn can_be_managed_by(&self, user_id: Option<Id>, username: Option<&str>) -> bool {
        let is_author = match (self.author_id, user_id) {
            (Some(a), Some(u)) => a == u,
            _ => username.is_some_and(|name| name == self.author_username),
        };
        is_author || username == Some(ADMIN_USERNAME)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "flexible_id::deserialize_opt")]
    pub creator_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// --- Requests ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: Id,
    pub community_id: Id,
    pub creation_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: Id,
    pub body: String,
    pub author_id: Id,
    pub author_username: String,
    pub creation_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub creator_id: Id,
}

// --- Auth ---

/// Login payload. The auth service accepts either identifier.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LoginRequest {
    Username { username: String, password: String },
    Email { email: String, password: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginUser {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// --- Chat ---

/// A chat record as delivered on the message channel.
///
/// The chat backend serializes with PascalCase keys; the aliases let either
/// casing through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(alias = "ID", deserialize_with = "flexible_id::deserialize")]
    pub id: Id,
    #[serde(alias = "Sender", default)]
    pub sender: String,
    #[serde(alias = "Content", default)]
    pub content: String,
    #[serde(alias = "Timestamp", default)]
    pub timestamp: String,
}

/// A chat publish request. The server assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutgoingChatMessage {
    pub content: String,
    pub sender: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_accepts_string_ids() {
        let json = r#"{
            "id": "7",
            "title": "Hello",
            "body": "World",
            "authorId": 3,
            "authorUsername": "ana",
            "communityId": "2",
            "creationTime": "2024-05-01T10:00:00",
            "commentCount": 4
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.community_id, Some(2));
        assert_eq!(post.author_id, Some(3));
        assert_eq!(post.comment_count, 4);
    }

    #[test]
    fn comment_management_rights() {
        let comment: Comment =
            serde_json::from_str(r#"{"id": 1, "body": "b", "authorUsername": "bo"}"#).unwrap();
        assert!(comment.can_be_managed_by(Some(5), Some("bo")));
        assert!(!comment.can_be_managed_by(Some(5), Some("ana")));
        assert!(comment.can_be_managed_by(Some(1), Some(ADMIN_USERNAME)));
        assert!(!comment.can_be_managed_by(None, None));
    }

    #[test]
    fn post_tolerates_missing_optional_fields() {
        let post: Post = serde_json::from_str(r#"{"id": 1, "title": "t"}"#).unwrap();
        assert_eq!(post.author_id, None);
        assert_eq!(post.comment_count, 0);
        assert!(post.body.is_empty());
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(serde_json::from_str::<Community>(r#"{"id": "abc", "name": "x"}"#).is_err());
    }

    #[test]
    fn chat_message_accepts_pascal_case() {
        let json = r#"{"ID": 5, "Sender": "bob", "Content": "hi", "Timestamp": "2024-05-01T10:00:00Z"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 5);
        assert_eq!(msg.sender, "bob");
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn login_request_serializes_chosen_identifier_only() {
        let by_email = LoginRequest::Email {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        let value = serde_json::to_value(&by_email).unwrap();
        assert_eq!(value, serde_json::json!({"email": "a@b.c", "password": "pw"}));
    }

    #[test]
    fn admin_manages_any_post() {
        let post: Post = serde_json::from_str(r#"{"id": 1, "title": "t", "authorId": 9}"#).unwrap();
        assert!(post.can_be_managed_by(Some(9), Some("ana")));
        assert!(post.can_be_managed_by(Some(1), Some("admin")));
        assert!(!post.can_be_managed_by(Some(1), Some("ana")));
        assert!(!post.can_be_managed_by(None, None));
    }
}
