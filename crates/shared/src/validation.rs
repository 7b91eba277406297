//! Form validation. Each failure's `Display` is the inline message shown
//! next to the form.

use thiserror::Error;

use crate::models::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Community name is required")]
    CommunityNameRequired,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Title is required")]
    TitleRequired,
    #[error("Please select a community")]
    CommunityRequired,
    #[error("Comment cannot be empty")]
    CommentRequired,
    #[error("Username is required")]
    UsernameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Trimmed community fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityDraft {
    pub name: String,
    pub description: String,
}

pub fn validate_community(name: &str, description: &str) -> Result<CommunityDraft, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::CommunityNameRequired);
    }
    let description = description.trim();
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    Ok(CommunityDraft {
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Trimmed post fields. The body may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub community_id: Id,
}

pub fn validate_post(
    title: &str,
    body: &str,
    community_id: Option<Id>,
) -> Result<PostDraft, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    let community_id = community_id.ok_or(ValidationError::CommunityRequired)?;
    Ok(PostDraft {
        title: title.to_string(),
        body: body.trim().to_string(),
        community_id,
    })
}

/// Edits keep the body verbatim; only the title must be non-blank.
pub fn validate_post_edit(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

pub fn validate_comment(body: &str) -> Result<String, ValidationError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ValidationError::CommentRequired);
    }
    Ok(body.to_string())
}

pub fn validate_login(identifier: &str, by_email: bool, password: &str) -> Result<(), ValidationError> {
    if identifier.trim().is_empty() {
        return Err(if by_email {
            ValidationError::EmailRequired
        } else {
            ValidationError::UsernameRequired
        });
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !looks_like_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_requires_name_then_description() {
        assert_eq!(
            validate_community("  ", ""),
            Err(ValidationError::CommunityNameRequired)
        );
        assert_eq!(
            validate_community("rust", " \t"),
            Err(ValidationError::DescriptionRequired)
        );
        let draft = validate_community("  rust ", " all things rust ").unwrap();
        assert_eq!(draft.name, "rust");
        assert_eq!(draft.description, "all things rust");
    }

    #[test]
    fn messages_match_inline_copy() {
        assert_eq!(
            ValidationError::CommunityNameRequired.to_string(),
            "Community name is required"
        );
        assert_eq!(ValidationError::CommunityRequired.to_string(), "Please select a community");
    }

    #[test]
    fn post_needs_title_and_community() {
        assert_eq!(validate_post("", "b", Some(1)), Err(ValidationError::TitleRequired));
        assert_eq!(validate_post("t", "b", None), Err(ValidationError::CommunityRequired));
        let draft = validate_post(" t ", "", Some(4)).unwrap();
        assert_eq!(draft.title, "t");
        assert_eq!(draft.community_id, 4);
    }

    #[test]
    fn login_reports_the_active_identifier() {
        assert_eq!(validate_login("", true, "pw"), Err(ValidationError::EmailRequired));
        assert_eq!(validate_login("", false, "pw"), Err(ValidationError::UsernameRequired));
        assert_eq!(validate_login("ana", false, ""), Err(ValidationError::PasswordRequired));
        assert!(validate_login("ana", false, "pw").is_ok());
    }

    #[test]
    fn registration_checks() {
        assert_eq!(
            validate_registration("ana", "not-an-email", "pw", "pw"),
            Err(ValidationError::EmailInvalid)
        );
        assert_eq!(
            validate_registration("ana", "ana@example.com", "pw", "px"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_registration("ana", "ana@example.com", "pw", "pw").is_ok());
    }
}
