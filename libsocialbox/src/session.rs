//! Session store: authentication and platform connections
//!
//! Holds the current user and the set of connected platform accounts.
//! State is hydrated from the key-value store at construction and every
//! mutation persists back before notifying.

use std::sync::{Arc, RwLock};

use crate::error::{Result, SocialboxError};
use crate::notify::{Notification, Notifier};
use crate::storage::{StateStore, PLATFORMS_KEY, USER_KEY};
use crate::transport::Transport;
use crate::types::{ConnectedPlatform, PlatformKind, User};

#[derive(Debug, Default, Clone)]
struct SessionState {
    user: Option<User>,
    platforms: Vec<ConnectedPlatform>,
}

/// Session store
///
/// Thread-safe via Arc<RwLock<SessionState>>; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    store: StateStore,
    transport: Arc<dyn Transport>,
    notifier: Notifier,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Create a session store, hydrating any persisted session
    ///
    /// Connected platforms are only restored when a user is present;
    /// a platform list without a user is stale and ignored.
    pub fn new(store: StateStore, transport: Arc<dyn Transport>, notifier: Notifier) -> Result<Self> {
        let user: Option<User> = store.get(USER_KEY)?;
        let platforms = if user.is_some() {
            store.get(PLATFORMS_KEY)?.unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(Self {
            store,
            transport,
            notifier,
            state: Arc::new(RwLock::new(SessionState { user, platforms })),
        })
    }

    /// Authenticate and establish a session
    ///
    /// The email must be non-empty; any credential is accepted since
    /// the backend is simulated. Replaces whatever session existed
    /// before.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User> {
        if email.trim().is_empty() {
            return Err(SocialboxError::InvalidInput(
                "Email cannot be empty".to_string(),
            ));
        }

        self.transport.round_trip("login").await;

        let user = User::demo(email);
        {
            let mut state = self.state.write().unwrap();
            state.user = Some(user.clone());
        }
        self.persist()?;

        tracing::info!(email, "user logged in");
        self.notifier.emit(Notification::success(
            "Login successful",
            "Welcome back to SocialBox!",
        ));

        Ok(user)
    }

    /// End the session, clearing the user and all platform connections
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            state.user = None;
            state.platforms.clear();
        }
        self.persist()?;

        tracing::info!("user logged out");
        self.notifier.emit(Notification::info(
            "Logged out",
            "You have been logged out successfully",
        ));

        Ok(())
    }

    /// The authenticated user, if a session exists
    pub fn current_user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    /// All platform connections for the current session
    pub fn connected_platforms(&self) -> Vec<ConnectedPlatform> {
        self.state.read().unwrap().platforms.clone()
    }

    /// Whether a connection exists for the given platform kind
    pub fn is_connected(&self, kind: PlatformKind) -> bool {
        self.state
            .read()
            .unwrap()
            .platforms
            .iter()
            .any(|p| p.kind == kind)
    }

    /// Connect a platform account
    ///
    /// At most one connection per platform kind. Connecting an already
    /// connected platform is a no-op that reports "Already connected"
    /// and returns Ok(false).
    pub async fn connect_platform(&self, kind: PlatformKind) -> Result<bool> {
        self.transport.round_trip("connect_platform").await;

        // Check and insert under one write lock so racing connects of
        // the same kind cannot both pass the duplicate check.
        let inserted = {
            let mut state = self.state.write().unwrap();
            if state.platforms.iter().any(|p| p.kind == kind) {
                false
            } else {
                state.platforms.push(ConnectedPlatform::connect(kind));
                true
            }
        };

        if !inserted {
            self.notifier.emit(Notification::info(
                "Already connected",
                &format!("Your {} account is already connected", kind),
            ));
            return Ok(false);
        }
        self.persist()?;

        tracing::info!(platform = %kind, "platform connected");
        self.notifier.emit(Notification::success(
            "Platform connected",
            &format!("Your {} account has been connected successfully", kind),
        ));

        Ok(true)
    }

    /// Disconnect a platform account by connection id
    ///
    /// Unknown ids are an error; nothing is removed.
    pub async fn disconnect_platform(&self, platform_id: &str) -> Result<()> {
        self.transport.round_trip("disconnect_platform").await;

        // Find and remove under one write lock so a racing disconnect
        // of the same id cannot also report success.
        let removed = {
            let mut state = self.state.write().unwrap();
            let index = state.platforms.iter().position(|p| p.id == platform_id);
            index.map(|index| state.platforms.remove(index).kind)
        };

        let Some(kind) = removed else {
            self.notifier.emit(Notification::error(
                "Disconnection failed",
                "Failed to disconnect platform",
            ));
            return Err(SocialboxError::NotFound(format!(
                "platform connection '{}'",
                platform_id
            )));
        };
        self.persist()?;

        tracing::info!(platform = %kind, "platform disconnected");
        self.notifier.emit(Notification::success(
            "Platform disconnected",
            &format!("Your {} account has been disconnected", kind),
        ));

        Ok(())
    }

    /// Write session state back to the key-value store
    ///
    /// With a user present both keys are overwritten; without one both
    /// keys are removed so no orphaned platform list survives.
    fn persist(&self) -> Result<()> {
        let state = self.state.read().unwrap();
        match &state.user {
            Some(user) => {
                self.store.put(USER_KEY, user)?;
                self.store.put(PLATFORMS_KEY, &state.platforms)?;
            }
            None => {
                self.store.remove(USER_KEY)?;
                self.store.remove(PLATFORMS_KEY)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InstantTransport;
    use tempfile::TempDir;

    fn test_session() -> (TempDir, SessionStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
        let session =
            SessionStore::new(store, Arc::new(InstantTransport), Notifier::new(16)).unwrap();
        (dir, session)
    }

    #[tokio::test]
    async fn test_login_creates_demo_user() {
        let (_dir, session) = test_session();
        assert!(session.current_user().is_none());

        let user = session.login("me@example.com", "hunter2").await.unwrap();
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.email, "me@example.com");
        assert_eq!(session.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_login_notifies_success() {
        let (_dir, session) = test_session();
        let mut receiver = {
            // Reach the shared notifier through a fresh subscription
            let notifier = session.notifier.clone();
            notifier.subscribe()
        };

        session.login("me@example.com", "pw").await.unwrap();

        let notification = receiver.recv().await.unwrap();
        assert_eq!(notification.title, "Login successful");
        assert_eq!(notification.description, "Welcome back to SocialBox!");
    }

    #[tokio::test]
    async fn test_logout_clears_user_and_platforms() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();
        session.connect_platform(PlatformKind::Twitter).await.unwrap();
        assert_eq!(session.connected_platforms().len(), 1);

        session.logout().unwrap();
        assert!(session.current_user().is_none());
        assert!(session.connected_platforms().is_empty());

        // A fresh login does not resurrect old connections
        session.login("me@example.com", "pw").await.unwrap();
        assert!(session.connected_platforms().is_empty());
    }

    #[tokio::test]
    async fn test_login_rejects_empty_email() {
        let (_dir, session) = test_session();
        let result = session.login("  ", "pw").await;
        assert!(matches!(result, Err(SocialboxError::InvalidInput(_))));
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_connect_platform() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();

        let connected = session.connect_platform(PlatformKind::Instagram).await.unwrap();
        assert!(connected);

        let platforms = session.connected_platforms();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].kind, PlatformKind::Instagram);
        assert_eq!(platforms[0].username, "@socialbox_official");
        assert!(platforms[0].connected);
    }

    #[tokio::test]
    async fn test_connect_platform_duplicate_is_noop() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();
        let mut receiver = session.notifier.subscribe();

        assert!(session.connect_platform(PlatformKind::Facebook).await.unwrap());
        assert!(!session.connect_platform(PlatformKind::Facebook).await.unwrap());
        assert_eq!(session.connected_platforms().len(), 1);

        // First connect reports success, second reports the no-op
        let first = receiver.recv().await.unwrap();
        assert_eq!(first.title, "Platform connected");
        let second = receiver.recv().await.unwrap();
        assert_eq!(second.title, "Already connected");
        assert_eq!(second.description, "Your facebook account is already connected");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_connects_keep_one_entry_per_kind() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move {
                    session.connect_platform(PlatformKind::Facebook).await
                })
            })
            .collect();

        let mut connected = 0;
        for task in tasks {
            if task.await.unwrap().unwrap() {
                connected += 1;
            }
        }

        // Exactly one connect wins, the rest observe the duplicate
        assert_eq!(connected, 1);
        let platforms = session.connected_platforms();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].kind, PlatformKind::Facebook);
    }

    #[tokio::test]
    async fn test_disconnect_platform() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();
        session.connect_platform(PlatformKind::LinkedIn).await.unwrap();

        let id = session.connected_platforms()[0].id.clone();
        session.disconnect_platform(&id).await.unwrap();
        assert!(session.connected_platforms().is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_unknown_platform_errors() {
        let (_dir, session) = test_session();
        session.login("me@example.com", "pw").await.unwrap();

        let result = session.disconnect_platform("no-such-id").await;
        assert!(matches!(result, Err(SocialboxError::NotFound(_))));
        assert!(session.connected_platforms().is_empty());
    }

    #[tokio::test]
    async fn test_session_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();

        {
            let session = SessionStore::new(
                store.clone(),
                Arc::new(InstantTransport),
                Notifier::new(16),
            )
            .unwrap();
            session.login("me@example.com", "pw").await.unwrap();
            session.connect_platform(PlatformKind::Twitter).await.unwrap();
        }

        let session =
            SessionStore::new(store, Arc::new(InstantTransport), Notifier::new(16)).unwrap();
        assert_eq!(session.current_user().unwrap().email, "me@example.com");
        assert_eq!(session.connected_platforms().len(), 1);
        assert!(session.is_connected(PlatformKind::Twitter));
    }

    #[tokio::test]
    async fn test_logout_removes_persisted_keys() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
        let session =
            SessionStore::new(store.clone(), Arc::new(InstantTransport), Notifier::new(16))
                .unwrap();

        session.login("me@example.com", "pw").await.unwrap();
        assert!(store.contains(USER_KEY));
        assert!(store.contains(PLATFORMS_KEY));

        session.logout().unwrap();
        assert!(!store.contains(USER_KEY));
        assert!(!store.contains(PLATFORMS_KEY));
    }

    #[tokio::test]
    async fn test_stale_platforms_without_user_ignored() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::with_dir(dir.path().to_path_buf()).unwrap();
        store
            .put(PLATFORMS_KEY, &vec![ConnectedPlatform::connect(PlatformKind::Twitter)])
            .unwrap();

        let session =
            SessionStore::new(store, Arc::new(InstantTransport), Notifier::new(16)).unwrap();
        assert!(session.current_user().is_none());
        assert!(session.connected_platforms().is_empty());
    }
}
