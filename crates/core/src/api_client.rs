//! HTTP API client for the forum, auth and chat services.

use agora_shared::{
    ApiError, Comment, CommentUpdate, Community, Id, LoginRequest, LoginResponse, NewComment,
    NewCommunity, NewPost, OutgoingChatMessage, Post, PostUpdate, RegisterRequest, UserInfo,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::chat::ChatPublisher;
use crate::config::{join_url, ClientConfig};
use crate::runtime::{boxed, BoxedFuture};
use crate::session::Session;

/// HTTP client for the remote services. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_base: String,
    auth_base: String,
    chat_base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base_url.clone(),
            auth_base: config.auth_base_url.clone(),
            chat_base: config.chat.base_url.clone(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_session(self, session: Option<&Session>) -> Self {
        self.with_token(session.map(|s| s.auth_token.clone()))
    }

    fn api(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, rb: RequestBuilder) -> Result<String, ApiError> {
        let resp = self
            .authorize(rb)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }
        Ok(text)
    }

    pub async fn get_json<TRes: DeserializeOwned>(&self, url: &str) -> Result<TRes, ApiError> {
        let text = self.execute(self.client.get(url)).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub async fn post_json<TReq: Serialize + ?Sized, TRes: DeserializeOwned>(
        &self,
        url: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let text = self.execute(self.client.post(url).json(body)).await?;
        decode_maybe_empty(&text)
    }

    /// POST whose response body is irrelevant to the caller.
    pub async fn post_discard<TReq: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        self.execute(self.client.post(url).json(body)).await.map(drop)
    }

    pub async fn put_discard<TReq: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        self.execute(self.client.put(url).json(body)).await.map(drop)
    }

    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        self.execute(self.client.delete(url)).await.map(drop)
    }
}

fn decode_maybe_empty<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Deserialize(e.to_string()))
}

// --- Service traits ---
//
// Views talk to these rather than to `ApiClient` directly so flows can be
// exercised against in-memory fakes.

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;
    async fn get_post(&self, id: Id) -> Result<Post, ApiError>;
    async fn create_post(&self, post: &NewPost) -> Result<(), ApiError>;
    async fn update_post(&self, id: Id, update: &PostUpdate) -> Result<(), ApiError>;
    async fn delete_post(&self, id: Id) -> Result<(), ApiError>;
    async fn posts_by_user(&self, user_id: Id) -> Result<Vec<Post>, ApiError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CommentsApi {
    async fn list_comments(&self, post_id: Id) -> Result<Vec<Comment>, ApiError>;
    async fn create_comment(&self, post_id: Id, comment: &NewComment) -> Result<(), ApiError>;
    async fn update_comment(
        &self,
        post_id: Id,
        comment_id: Id,
        update: &CommentUpdate,
    ) -> Result<(), ApiError>;
    async fn delete_comment(&self, post_id: Id, comment_id: Id) -> Result<(), ApiError>;
    async fn comments_by_user(&self, user_id: Id) -> Result<Vec<Comment>, ApiError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CommunitiesApi {
    async fn list_communities(&self) -> Result<Vec<Community>, ApiError>;
    async fn get_community(&self, id: Id) -> Result<Community, ApiError>;
    async fn create_community(&self, community: &NewCommunity) -> Result<(), ApiError>;
    async fn delete_community(&self, id: Id) -> Result<(), ApiError>;
    async fn community_posts(&self, id: Id) -> Result<Vec<Post>, ApiError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait UsersApi {
    async fn user_info(&self, user_id: Id) -> Result<UserInfo, ApiError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PostsApi for ApiClient {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json(&self.api("/api/posts")).await
    }

    async fn get_post(&self, id: Id) -> Result<Post, ApiError> {
        self.get_json(&self.api(&format!("/posts/{id}"))).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<(), ApiError> {
        self.post_discard(&self.api("/posts"), post).await
    }

    async fn update_post(&self, id: Id, update: &PostUpdate) -> Result<(), ApiError> {
        self.put_discard(&self.api(&format!("/posts/{id}")), update).await
    }

    async fn delete_post(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&self.api(&format!("/posts/{id}"))).await
    }

    async fn posts_by_user(&self, user_id: Id) -> Result<Vec<Post>, ApiError> {
        self.get_json(&self.api(&format!("/posts/user/{user_id}"))).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CommentsApi for ApiClient {
    async fn list_comments(&self, post_id: Id) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&self.api(&format!("/posts/{post_id}/comments"))).await
    }

    async fn create_comment(&self, post_id: Id, comment: &NewComment) -> Result<(), ApiError> {
        self.post_discard(&self.api(&format!("/posts/{post_id}/comments")), comment)
            .await
    }

    async fn update_comment(
        &self,
        post_id: Id,
        comment_id: Id,
        update: &CommentUpdate,
    ) -> Result<(), ApiError> {
        let url = self.api(&format!("/posts/{post_id}/comments/{comment_id}"));
        self.put_discard(&url, update).await
    }

    async fn delete_comment(&self, post_id: Id, comment_id: Id) -> Result<(), ApiError> {
        self.delete(&self.api(&format!("/posts/{post_id}/comments/{comment_id}")))
            .await
    }

    async fn comments_by_user(&self, user_id: Id) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&self.api(&format!("/comments/user/{user_id}"))).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CommunitiesApi for ApiClient {
    async fn list_communities(&self) -> Result<Vec<Community>, ApiError> {
        self.get_json(&self.api("/api/communities")).await
    }

    async fn get_community(&self, id: Id) -> Result<Community, ApiError> {
        self.get_json(&self.api(&format!("/api/communities/{id}"))).await
    }

    async fn create_community(&self, community: &NewCommunity) -> Result<(), ApiError> {
        self.post_discard(&self.api("/communities"), community).await
    }

    async fn delete_community(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&self.api(&format!("/api/communities/{id}"))).await
    }

    async fn community_posts(&self, id: Id) -> Result<Vec<Post>, ApiError> {
        self.get_json(&self.api(&format!("/api/communities/{id}/posts")))
            .await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl UsersApi for ApiClient {
    async fn user_info(&self, user_id: Id) -> Result<UserInfo, ApiError> {
        self.get_json(&self.api(&format!("/users/{user_id}/info"))).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json(&join_url(&self.auth_base, "/api/v1/auth/login"), request)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_discard(&join_url(&self.auth_base, "/api/v1/auth/register"), request)
            .await
    }
}

impl ChatPublisher for ApiClient {
    fn publish(&self, message: OutgoingChatMessage) -> BoxedFuture<Result<(), ApiError>> {
        let client = self.clone();
        boxed(async move {
            let url = join_url(&client.chat_base, "/send");
            client.post_discard(&url, &message).await
        })
    }
}
