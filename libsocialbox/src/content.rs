//! Content store: posts, trends, and freelancer directory
//!
//! Posts are held newest-first in memory and persisted as one JSON
//! document. Trends and freelancers are read-only reference data served
//! from the built-in samples on every fetch.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SocialboxError};
use crate::notify::{Notification, Notifier};
use crate::samples;
use crate::storage::{StateStore, POSTS_KEY};
use crate::transport::Transport;
use crate::types::{FreelancerProfile, PlatformKind, Post, PostStats, PostStatus, SocialTrend};

/// Input for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    pub image: Option<String>,
    pub platforms: Vec<PlatformKind>,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Optional client-chosen token. Submitting the same token twice
    /// returns the post created the first time instead of a duplicate.
    pub client_token: Option<String>,
}

/// Field-wise update applied to an existing post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub content: Option<String>,
    pub image: Option<String>,
    pub platforms: Option<Vec<PlatformKind>>,
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub stats: Option<PostStats>,
}

#[derive(Default)]
struct ContentState {
    posts: Vec<Post>,
    fetched: bool,
    /// client_token -> post id, session-scoped
    tokens: HashMap<String, String>,
}

/// Content store
///
/// Thread-safe via Arc<RwLock<ContentState>>; clones share state.
#[derive(Clone)]
pub struct ContentStore {
    store: StateStore,
    transport: Arc<dyn Transport>,
    notifier: Notifier,
    state: Arc<RwLock<ContentState>>,
}

impl ContentStore {
    pub fn new(store: StateStore, transport: Arc<dyn Transport>, notifier: Notifier) -> Self {
        Self {
            store,
            transport,
            notifier,
            state: Arc::new(RwLock::new(ContentState::default())),
        }
    }

    /// Load posts, seeding sample data on the very first fetch
    ///
    /// When no posts key exists yet the built-in samples are written
    /// and returned. Subsequent fetches reload whatever is persisted,
    /// so fetching is idempotent.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.transport.round_trip("fetch_posts").await;

        let loaded = match self.store.get::<Vec<Post>>(POSTS_KEY) {
            Ok(Some(posts)) => posts,
            Ok(None) => {
                let seeded = samples::seed_posts();
                self.store.put(POSTS_KEY, &seeded)?;
                tracing::info!(count = seeded.len(), "seeded sample posts");
                seeded
            }
            Err(e) => {
                self.notifier.emit(Notification::error(
                    "Failed to load posts",
                    "Could not retrieve your posts. Please try again.",
                ));
                return Err(e);
            }
        };

        let mut state = self.state.write().unwrap();
        state.posts = loaded.clone();
        state.fetched = true;
        Ok(loaded)
    }

    /// Snapshot of the in-memory post list, newest first
    pub fn posts(&self) -> Vec<Post> {
        self.state.read().unwrap().posts.clone()
    }

    /// Create a post and prepend it to the collection
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        self.transport.round_trip("create_post").await;

        let mut post = Post::new(new_post.content, new_post.platforms, new_post.status);
        post.image = new_post.image;
        post.scheduled_at = new_post.scheduled_at;

        // Token lookup and insert happen under one write lock so two
        // submits racing on the same token cannot both create.
        {
            let mut state = self.state.write().unwrap();
            if let Some(token) = &new_post.client_token {
                if let Some(post_id) = state.tokens.get(token) {
                    if let Some(existing) = state.posts.iter().find(|p| &p.id == post_id) {
                        tracing::debug!(token, post_id, "duplicate create suppressed");
                        return Ok(existing.clone());
                    }
                }
                state.tokens.insert(token.clone(), post.id.clone());
            }
            state.posts.insert(0, post.clone());
        }
        self.persist().inspect_err(|_| {
            self.notifier.emit(Notification::error(
                "Failed to create post",
                "There was an error creating your post. Please try again.",
            ));
        })?;

        let description = match post.status {
            PostStatus::Published => "Your post has been published successfully",
            PostStatus::Scheduled => "Your post has been scheduled",
            PostStatus::Draft => "Your draft has been saved",
        };
        tracing::info!(post_id = %post.id, status = %post.status, "post created");
        self.notifier.emit(Notification::success("Post created", description));

        Ok(post)
    }

    /// Apply a field-wise update to an existing post
    ///
    /// The post keeps its position in the list; only `updated_at` and
    /// the supplied fields change. Unknown ids are an error.
    pub async fn update_post(&self, id: &str, updates: PostUpdate) -> Result<Post> {
        self.transport.round_trip("update_post").await;

        // Locate and mutate under one write lock; a concurrent delete
        // must not invalidate the position between the two.
        let mut state = self.state.write().unwrap();
        let position = state.posts.iter().position(|p| p.id == id);
        let Some(position) = position else {
            drop(state);
            self.notifier.emit(Notification::error(
                "Failed to update post",
                "There was an error updating your post. Please try again.",
            ));
            return Err(SocialboxError::NotFound(format!("post '{}'", id)));
        };

        let updated = {
            let post = &mut state.posts[position];

            if let Some(content) = updates.content {
                post.content = content;
            }
            if let Some(image) = updates.image {
                post.image = Some(image);
            }
            if let Some(platforms) = updates.platforms {
                post.platforms = platforms;
            }
            if let Some(status) = updates.status {
                post.status = status;
            }
            if let Some(scheduled_at) = updates.scheduled_at {
                post.scheduled_at = Some(scheduled_at);
            }
            if let Some(stats) = updates.stats {
                post.stats = Some(stats);
            }
            post.updated_at = Utc::now();
            post.clone()
        };
        drop(state);
        self.persist()?;

        tracing::info!(post_id = id, "post updated");
        self.notifier.emit(Notification::success(
            "Post updated",
            "Your post has been updated successfully",
        ));

        Ok(updated)
    }

    /// Delete a post by id. Deleting an unknown id is a silent no-op.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.transport.round_trip("delete_post").await;

        {
            let mut state = self.state.write().unwrap();
            state.posts.retain(|p| p.id != id);
        }
        self.persist()?;

        tracing::info!(post_id = id, "post deleted");
        self.notifier.emit(Notification::success(
            "Post deleted",
            "Your post has been deleted successfully",
        ));

        Ok(())
    }

    /// Trending topics. Rebuilt from reference data on every call.
    pub async fn fetch_trends(&self) -> Result<Vec<SocialTrend>> {
        self.transport.round_trip("fetch_trends").await;
        Ok(samples::trends())
    }

    /// Freelancer directory. Rebuilt from reference data on every call.
    pub async fn fetch_freelancers(&self) -> Result<Vec<FreelancerProfile>> {
        self.transport.round_trip("fetch_freelancers").await;
        Ok(samples::freelancers())
    }

    fn persist(&self) -> Result<()> {
        let state = self.state.read().unwrap();
        self.store.put(POSTS_KEY, &state.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InstantTransport;
    use tempfile::TempDir;

    fn test_content() -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
        let content = ContentStore::new(store, Arc::new(InstantTransport), Notifier::new(16));
        (dir, content)
    }

    fn draft(content: &str) -> NewPost {
        NewPost {
            content: content.to_string(),
            image: None,
            platforms: vec![PlatformKind::Twitter],
            status: PostStatus::Draft,
            scheduled_at: None,
            client_token: None,
        }
    }

    #[tokio::test]
    async fn test_first_fetch_seeds_samples() {
        let (_dir, content) = test_content();
        let posts = content.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].status, PostStatus::Published);
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent() {
        let (_dir, content) = test_content();
        let first = content.fetch_posts().await.unwrap();
        let second = content.fetch_posts().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_does_not_reseed_after_delete_all() {
        let (_dir, content) = test_content();
        let posts = content.fetch_posts().await.unwrap();
        for post in posts {
            content.delete_post(&post.id).await.unwrap();
        }

        let reloaded = content.fetch_posts().await.unwrap();
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_create_post_prepends() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        let created = content.create_post(draft("Newest")).await.unwrap();
        let posts = content.posts();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].id, created.id);
        assert_eq!(posts[0].content, "Newest");
    }

    #[tokio::test]
    async fn test_create_post_notification_by_status() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();
        let mut receiver = content.notifier.subscribe();

        let mut published = draft("go");
        published.status = PostStatus::Published;
        content.create_post(published).await.unwrap();
        assert_eq!(
            receiver.recv().await.unwrap().description,
            "Your post has been published successfully"
        );

        let mut scheduled = draft("later");
        scheduled.status = PostStatus::Scheduled;
        scheduled.scheduled_at = Some(Utc::now() + chrono::Duration::days(1));
        content.create_post(scheduled).await.unwrap();
        assert_eq!(
            receiver.recv().await.unwrap().description,
            "Your post has been scheduled"
        );

        content.create_post(draft("wip")).await.unwrap();
        assert_eq!(receiver.recv().await.unwrap().description, "Your draft has been saved");
    }

    #[tokio::test]
    async fn test_create_post_idempotency_token() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        let mut new_post = draft("once");
        new_post.client_token = Some("token-1".to_string());

        let first = content.create_post(new_post.clone()).await.unwrap();
        let second = content.create_post(new_post).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(content.posts().len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_same_token_creates_once() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let content = content.clone();
                tokio::spawn(async move {
                    let mut new_post = draft("racy");
                    new_post.client_token = Some("token-race".to_string());
                    content.create_post(new_post).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }

        // Every submit resolves to the one post the winner created
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(content.posts().len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_update_and_delete() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();
        let posts = content.posts();
        let delete_id = posts[0].id.clone();
        let update_id = posts[2].id.clone();

        let deleter = {
            let content = content.clone();
            tokio::spawn(async move { content.delete_post(&delete_id).await })
        };
        let updater = {
            let content = content.clone();
            tokio::spawn(async move {
                content
                    .update_post(
                        &update_id,
                        PostUpdate {
                            content: Some("still here".to_string()),
                            ..Default::default()
                        },
                    )
                    .await
            })
        };

        deleter.await.unwrap().unwrap();
        let updated = updater.await.unwrap().unwrap();
        assert_eq!(updated.content, "still here");
        assert_eq!(content.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_create_without_token_allows_duplicates() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        let a = content.create_post(draft("same")).await.unwrap();
        let b = content.create_post(draft("same")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(content.posts().len(), 5);
    }

    #[tokio::test]
    async fn test_update_post_preserves_position() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();
        let target = content.posts()[1].clone();

        let updates = PostUpdate {
            content: Some("Rewritten".to_string()),
            ..Default::default()
        };
        let updated = content.update_post(&target.id, updates).await.unwrap();

        assert_eq!(updated.content, "Rewritten");
        assert!(updated.updated_at > target.updated_at);
        // Untouched fields survive
        assert_eq!(updated.platforms, target.platforms);

        let posts = content.posts();
        assert_eq!(posts[1].id, target.id);
        assert_eq!(posts[1].content, "Rewritten");
    }

    #[tokio::test]
    async fn test_update_unknown_post_errors() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        let result = content.update_post("ghost", PostUpdate::default()).await;
        assert!(matches!(result, Err(SocialboxError::NotFound(_))));
        assert_eq!(content.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();
        let id = content.posts()[0].id.clone();

        content.delete_post(&id).await.unwrap();
        assert_eq!(content.posts().len(), 2);
        assert!(!content.posts().iter().any(|p| p.id == id));
    }

    #[tokio::test]
    async fn test_delete_unknown_post_is_silent_noop() {
        let (_dir, content) = test_content();
        content.fetch_posts().await.unwrap();

        content.delete_post("ghost").await.unwrap();
        assert_eq!(content.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_posts_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();

        let created = {
            let content =
                ContentStore::new(store.clone(), Arc::new(InstantTransport), Notifier::new(16));
            content.fetch_posts().await.unwrap();
            content.create_post(draft("durable")).await.unwrap()
        };

        let content = ContentStore::new(store, Arc::new(InstantTransport), Notifier::new(16));
        let posts = content.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].id, created.id);
    }

    #[tokio::test]
    async fn test_trends_and_freelancers() {
        let (_dir, content) = test_content();
        let trends = content.fetch_trends().await.unwrap();
        assert_eq!(trends.len(), 4);

        let freelancers = content.fetch_freelancers().await.unwrap();
        assert_eq!(freelancers.len(), 5);

        // Reference data is stable across fetches
        assert_eq!(content.fetch_trends().await.unwrap(), trends);
    }
}
