//! Core types for SocialBox

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed set of external platforms a user can connect
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Facebook,
    Twitter,
    Instagram,
    LinkedIn,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 4] = [
        PlatformKind::Facebook,
        PlatformKind::Twitter,
        PlatformKind::Instagram,
        PlatformKind::LinkedIn,
    ];

    /// Lowercase identifier used in storage and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Facebook => "facebook",
            PlatformKind::Twitter => "twitter",
            PlatformKind::Instagram => "instagram",
            PlatformKind::LinkedIn => "linkedin",
        }
    }

    /// Human-readable platform name
    pub fn label(&self) -> &'static str {
        match self {
            PlatformKind::Facebook => "Facebook",
            PlatformKind::Twitter => "Twitter",
            PlatformKind::Instagram => "Instagram",
            PlatformKind::LinkedIn => "LinkedIn",
        }
    }

    /// Account handle synthesized when a platform is connected
    pub fn synthesized_username(&self) -> &'static str {
        match self {
            PlatformKind::Facebook => "SocialBox Page",
            PlatformKind::Twitter => "@SocialBoxHQ",
            PlatformKind::Instagram => "@socialbox_official",
            PlatformKind::LinkedIn => "SocialBox",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(PlatformKind::Facebook),
            "twitter" => Ok(PlatformKind::Twitter),
            "instagram" => Ok(PlatformKind::Instagram),
            "linkedin" => Ok(PlatformKind::LinkedIn),
            _ => Err(format!(
                "Unknown platform: '{}'. Valid options: facebook, twitter, instagram, linkedin",
                s
            )),
        }
    }
}

/// The authenticated identity. Zero or one live at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl User {
    /// Synthesize the demo identity produced by a successful login
    pub fn demo(email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Demo User".to_string(),
            email: email.to_string(),
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=user1".to_string()),
        }
    }
}

/// A link between the current session and one external platform account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectedPlatform {
    pub id: String,
    pub kind: PlatformKind,
    pub username: String,
    pub connected: bool,
    pub token_expiry: Option<DateTime<Utc>>,
}

impl ConnectedPlatform {
    /// Create a connection record with a synthesized username and a token
    /// expiring 30 days out
    pub fn connect(kind: PlatformKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            username: kind.synthesized_username().to_string(),
            connected: true,
            token_expiry: Some(Utc::now() + Duration::days(30)),
        }
    }
}

/// Lifecycle status of a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

/// Engagement counters attached to a published post
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostStats {
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
}

/// A unit of user-authored content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub image: Option<String>,
    pub platforms: Vec<PlatformKind>,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stats: Option<PostStats>,
}

impl Post {
    pub fn new(content: String, platforms: Vec<PlatformKind>, status: PostStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            image: None,
            platforms,
            status,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
            stats: None,
        }
    }
}

/// A trending topic on one platform. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialTrend {
    pub id: String,
    pub platform: PlatformKind,
    pub title: String,
    pub description: String,
    pub impressions: u64,
    pub growth: f64,
    pub hashtags: Vec<String>,
}

/// A freelancer directory entry. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreelancerProfile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub skills: Vec<String>,
    pub rating: f64,
    pub hourly_rate: u64,
    pub completed_jobs: u64,
    pub avatar: String,
    pub available: bool,
}
