//! SocialBox - client-side state core for a social media dashboard
//!
//! This library provides session management, post content management,
//! and compose orchestration against a simulated backend, persisting
//! all state as JSON key-value documents.

pub mod assist;
pub mod composer;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod notify;
pub mod samples;
pub mod schedule;
pub mod service;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ComposeError, Result, SocialboxError};
pub use notify::{Notification, Severity};
pub use service::SocialboxService;
pub use storage::StateStore;
pub use types::{ConnectedPlatform, PlatformKind, Post, PostStatus, User};
