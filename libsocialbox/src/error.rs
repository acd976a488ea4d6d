//! Error types for SocialBox

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SocialboxError>;

#[derive(Error, Debug)]
pub enum SocialboxError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SocialboxError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SocialboxError::InvalidInput(_) | SocialboxError::Compose(_) => 3,
            SocialboxError::Config(_) | SocialboxError::Storage(_) => 2,
            SocialboxError::NotFound(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Composer precondition violations
///
/// Each variant carries the exact user-facing wording so callers surface a
/// distinct message per violated precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Please add content to your post")]
    EmptyContent,

    #[error("Please select at least one platform")]
    NoPlatforms,

    #[error("Please select a date for scheduling")]
    NoScheduleDate,

    #[error("Please add content or an image to save as draft")]
    EmptyDraft,
}

impl ComposeError {
    /// Notification title matching this precondition violation
    pub fn title(&self) -> &'static str {
        match self {
            ComposeError::EmptyContent => "Empty content",
            ComposeError::NoPlatforms => "No platforms selected",
            ComposeError::NoScheduleDate => "No date selected",
            ComposeError::EmptyDraft => "Empty draft",
        }
    }
}
