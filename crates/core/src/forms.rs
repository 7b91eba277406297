//! Form submission flows: validate, then call the service.
//!
//! Invalid input never reaches the network.

use agora_shared::{
    validate_comment, validate_community, validate_login, validate_post, validate_post_edit,
    validate_registration, ApiError, CommentUpdate, Id, LoginRequest, NewComment, NewCommunity,
    NewPost, PostUpdate, RegisterRequest, ValidationError,
};
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::api_client::{AuthApi, CommentsApi, CommunitiesApi, PostsApi};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("You must be logged in to do that")]
    NotSignedIn,
    #[error(transparent)]
    Request(#[from] ApiError),
}

impl FormError {
    /// Inline text for the form, falling back to `fallback` for request
    /// failures the server did not explain.
    pub fn inline_message(&self, fallback: &str) -> String {
        match self {
            FormError::Request(e) => e.server_message().unwrap_or_else(|| fallback.to_string()),
            other => other.to_string(),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn signed_in(session: Option<&Session>) -> Result<&Session, FormError> {
    session.ok_or(FormError::NotSignedIn)
}

pub async fn create_community<A>(
    api: &A,
    session: Option<&Session>,
    name: &str,
    description: &str,
) -> Result<(), FormError>
where
    A: CommunitiesApi + ?Sized,
{
    let draft = validate_community(name, description)?;
    let session = signed_in(session)?;
    let community = NewCommunity {
        name: draft.name,
        description: draft.description,
        creator_id: session.user_id,
    };
    api.create_community(&community).await?;
    Ok(())
}

/// Returns the community the post was filed under.
pub async fn create_post<A>(
    api: &A,
    session: Option<&Session>,
    title: &str,
    body: &str,
    community_id: Option<Id>,
) -> Result<Id, FormError>
where
    A: PostsApi + ?Sized,
{
    let draft = validate_post(title, body, community_id)?;
    let session = signed_in(session)?;
    let post = NewPost {
        title: draft.title,
        body: draft.body,
        author_id: session.user_id,
        community_id: draft.community_id,
        creation_time: now(),
    };
    api.create_post(&post).await?;
    Ok(draft.community_id)
}

/// Returns the update so the caller can patch its local copy.
pub async fn edit_post<A>(
    api: &A,
    post_id: Id,
    title: &str,
    body: &str,
) -> Result<PostUpdate, FormError>
where
    A: PostsApi + ?Sized,
{
    validate_post_edit(title)?;
    let update = PostUpdate {
        title: title.trim().to_string(),
        body: body.to_string(),
    };
    api.update_post(post_id, &update).await?;
    Ok(update)
}

pub async fn add_comment<A>(
    api: &A,
    session: Option<&Session>,
    post_id: Id,
    body: &str,
) -> Result<(), FormError>
where
    A: CommentsApi + ?Sized,
{
    let body = validate_comment(body)?;
    let session = signed_in(session)?;
    let comment = NewComment {
        post_id,
        body,
        author_id: session.user_id,
        author_username: session.username.clone(),
        creation_time: now(),
    };
    api.create_comment(post_id, &comment).await?;
    Ok(())
}

/// Returns the stored body so the caller can patch its local copy.
pub async fn edit_comment<A>(
    api: &A,
    post_id: Id,
    comment_id: Id,
    body: &str,
) -> Result<String, FormError>
where
    A: CommentsApi + ?Sized,
{
    let body = validate_comment(body)?;
    api.update_comment(post_id, comment_id, &CommentUpdate { body: body.clone() })
        .await?;
    Ok(body)
}

pub async fn login<A>(
    api: &A,
    identifier: &str,
    by_email: bool,
    password: &str,
) -> Result<Session, FormError>
where
    A: AuthApi + ?Sized,
{
    validate_login(identifier, by_email, password)?;
    let identifier = identifier.trim().to_string();
    let password = password.to_string();
    let request = if by_email {
        LoginRequest::Email {
            email: identifier,
            password,
        }
    } else {
        LoginRequest::Username {
            username: identifier,
            password,
        }
    };
    let response = api.login(&request).await?;
    Ok(Session::from(response))
}

pub async fn register<A>(
    api: &A,
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), FormError>
where
    A: AuthApi + ?Sized,
{
    validate_registration(username, email, password, confirm)?;
    let request = RegisterRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    api.register(&request).await?;
    Ok(())
}
