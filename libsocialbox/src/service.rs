//! Service layer for SocialBox
//!
//! This module provides a clean, testable API for the state core that
//! can be consumed by multiple interfaces (CLI, TUI, GUI) without code
//! duplication.
//!
//! # Architecture
//!
//! The service layer follows a facade pattern with `SocialboxService`
//! as the main entry point, coordinating specialized stores:
//!
//! - `SessionStore`: authentication and platform connections
//! - `ContentStore`: posts, trends, and the freelancer directory
//! - `Composer`: compose-time validation and orchestration
//! - `Assistant`: simulated writing assistance
//! - `Notifier`: outcome notification distribution
//!
//! # Example
//!
//! ```no_run
//! use libsocialbox::service::SocialboxService;
//! use libsocialbox::composer::ComposeRequest;
//! use libsocialbox::types::PlatformKind;
//!
//! # async fn example() -> libsocialbox::Result<()> {
//! let service = SocialboxService::new()?;
//!
//! service.session().login("demo@example.com", "password").await?;
//! service.session().connect_platform(PlatformKind::Twitter).await?;
//! service.content().fetch_posts().await?;
//!
//! let post = service
//!     .composer()
//!     .publish_now(ComposeRequest {
//!         content: "Hello from SocialBox!".to_string(),
//!         platforms: service.composer().default_platforms(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Published post {}", post.id);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::assist::Assistant;
use crate::composer::Composer;
use crate::config::Config;
use crate::content::ContentStore;
use crate::notify::{NotificationReceiver, Notifier};
use crate::session::SessionStore;
use crate::storage::StateStore;
use crate::transport::{SimulatedTransport, Transport};
use crate::Result;

/// Main service facade that coordinates the stores
///
/// All components share the same `StateStore`, `Transport`, and
/// `Notifier` instances, so a notification subscriber sees outcomes
/// from every store through one channel.
pub struct SocialboxService {
    session: SessionStore,
    content: ContentStore,
    composer: Composer,
    assistant: Assistant,
    notifier: Notifier,
}

impl SocialboxService {
    /// Create a service with default configuration
    ///
    /// Loads configuration from the default location; falls back to
    /// built-in defaults when no config file exists.
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_else(|_| Config::default_config());
        Self::from_config(config)
    }

    /// Create a service with custom configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let store = StateStore::with_dir(config.storage_dir())?;
        let transport: Arc<dyn Transport> = Arc::new(SimulatedTransport::new(
            Duration::from_millis(config.transport.min_latency_ms),
            Duration::from_millis(config.transport.max_latency_ms),
        ));
        let mut service = Self::with_components(store, transport)?;
        service.composer = service.composer.with_draft_fallback(config.default_platforms());
        Ok(service)
    }

    /// Create a service from explicit components
    ///
    /// Useful for tests, which typically pass a temp-dir store and
    /// `InstantTransport`.
    pub fn with_components(store: StateStore, transport: Arc<dyn Transport>) -> Result<Self> {
        let notifier = Notifier::new(100);

        let session = SessionStore::new(store.clone(), transport.clone(), notifier.clone())?;
        let content = ContentStore::new(store, transport.clone(), notifier.clone());
        let composer = Composer::new(session.clone(), content.clone(), notifier.clone());
        let assistant = Assistant::new(transport);

        Ok(Self {
            session,
            content,
            composer,
            assistant,
            notifier,
        })
    }

    /// Access the session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Access the content store
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Access the composer
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Access the writing assistant
    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Subscribe to outcome notifications from every store
    pub fn subscribe(&self) -> NotificationReceiver {
        self.notifier.subscribe()
    }
}
