//! Content composer orchestration
//!
//! The composer sits between a front-end and the stores: it validates a
//! compose request against the action's preconditions and only then
//! forwards it to the content store. A blocked request mutates nothing
//! and reports exactly one validation failure.

use chrono::{DateTime, Utc};

use crate::content::{ContentStore, NewPost};
use crate::error::{ComposeError, Result};
use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;
use crate::types::{PlatformKind, Post, PostStatus};

/// A compose request as assembled by a front-end
#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    pub content: String,
    pub image: Option<String>,
    pub platforms: Vec<PlatformKind>,
    /// Optional idempotency token forwarded to the content store
    pub client_token: Option<String>,
}

/// Orchestrates composing posts against the session and content stores
#[derive(Clone)]
pub struct Composer {
    session: SessionStore,
    content: ContentStore,
    notifier: Notifier,
    draft_fallback: Vec<PlatformKind>,
}

impl Composer {
    pub fn new(session: SessionStore, content: ContentStore, notifier: Notifier) -> Self {
        Self {
            session,
            content,
            notifier,
            draft_fallback: vec![PlatformKind::Facebook],
        }
    }

    /// Override the platforms assigned to drafts saved without a selection
    pub fn with_draft_fallback(mut self, platforms: Vec<PlatformKind>) -> Self {
        if !platforms.is_empty() {
            self.draft_fallback = platforms;
        }
        self
    }

    /// Platform kinds preselected for a new compose: one per connection
    pub fn default_platforms(&self) -> Vec<PlatformKind> {
        self.session
            .connected_platforms()
            .into_iter()
            .map(|p| p.kind)
            .collect()
    }

    /// Publish immediately
    ///
    /// Requires non-empty content and at least one platform.
    pub async fn publish_now(&self, request: ComposeRequest) -> Result<Post> {
        if request.content.trim().is_empty() {
            return Err(self.reject(ComposeError::EmptyContent));
        }
        if request.platforms.is_empty() {
            return Err(self.reject(ComposeError::NoPlatforms));
        }

        self.content
            .create_post(NewPost {
                content: request.content,
                image: request.image,
                platforms: request.platforms,
                status: PostStatus::Published,
                scheduled_at: None,
                client_token: request.client_token,
            })
            .await
    }

    /// Schedule for later
    ///
    /// Requires non-empty content, at least one platform, and a date.
    pub async fn schedule(
        &self,
        request: ComposeRequest,
        when: Option<DateTime<Utc>>,
    ) -> Result<Post> {
        if request.content.trim().is_empty() {
            return Err(self.reject(ComposeError::EmptyContent));
        }
        if request.platforms.is_empty() {
            return Err(self.reject(ComposeError::NoPlatforms));
        }
        let Some(when) = when else {
            return Err(self.reject(ComposeError::NoScheduleDate));
        };

        self.content
            .create_post(NewPost {
                content: request.content,
                image: request.image,
                platforms: request.platforms,
                status: PostStatus::Scheduled,
                scheduled_at: Some(when),
                client_token: request.client_token,
            })
            .await
    }

    /// Save as draft
    ///
    /// Requires content or an image. A draft without platforms gets the
    /// configured fallback so it can be published later without editing.
    pub async fn save_draft(&self, request: ComposeRequest) -> Result<Post> {
        if request.content.trim().is_empty() && request.image.is_none() {
            return Err(self.reject(ComposeError::EmptyDraft));
        }

        let platforms = if request.platforms.is_empty() {
            self.draft_fallback.clone()
        } else {
            request.platforms
        };

        self.content
            .create_post(NewPost {
                content: request.content,
                image: request.image,
                platforms,
                status: PostStatus::Draft,
                scheduled_at: None,
                client_token: request.client_token,
            })
            .await
    }

    /// Report a validation failure and convert it for propagation
    fn reject(&self, error: ComposeError) -> crate::error::SocialboxError {
        tracing::debug!(reason = error.title(), "compose request rejected");
        self.notifier
            .emit(Notification::error(error.title(), &error.to_string()));
        error.into()
    }
}
