//! sbox-post - Compose and manage SocialBox posts

use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use libsocialbox::composer::ComposeRequest;
use libsocialbox::content::PostUpdate;
use libsocialbox::logging::{self, LogFormat, LoggingConfig};
use libsocialbox::notify::NotificationReceiver;
use libsocialbox::transport::{SimulatedTransport, Transport};
use libsocialbox::types::{PlatformKind, PostStatus};
use libsocialbox::{Config, Result, SocialboxError, SocialboxService, StateStore};

#[derive(Parser, Debug)]
#[command(name = "sbox-post")]
#[command(version)]
#[command(about = "Compose and manage SocialBox posts")]
#[command(long_about = "\
sbox-post - Compose and manage SocialBox posts

DESCRIPTION:
    sbox-post composes posts through the SocialBox state core. Posts can
    be published immediately, scheduled, or saved as drafts, and the
    existing collection can be listed, edited, and deleted.

COMMANDS:
    create       Compose a post (publish, schedule, or draft)
    list         List posts
    edit         Update an existing post
    delete       Delete a post
    trends       Show trending topics
    freelancers  Show the freelancer directory
    assist       Writing assistance (generate, improve, ideas, hashtags, analyze)

USAGE EXAMPLES:
    # Publish to the connected platforms
    sbox-post create \"Hello decentralized world!\"

    # Schedule for tomorrow afternoon
    sbox-post create \"Webinar reminder\" --schedule \"tomorrow 2pm\" -p linkedin

    # Save a draft from stdin
    echo \"Work in progress\" | sbox-post create --draft

    # List drafts as JSON
    sbox-post list --status draft --format json

CONFIGURATION:
    Configuration file: ~/.config/socialbox/config.toml
    State directory: ~/.local/share/socialbox

EXIT CODES:
    0 - Success
    1 - Operation failed (unknown post id)
    2 - Storage or configuration error
    3 - Invalid input (validation failure, bad time format)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the state directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a post
    Create {
        /// Content to post (reads from stdin if not provided)
        content: Option<String>,

        /// Target platform(s), comma-separated (defaults to connected)
        #[arg(short, long)]
        platform: Option<String>,

        /// Attach an image URL
        #[arg(short, long)]
        image: Option<String>,

        /// Save as draft without publishing
        #[arg(short, long)]
        draft: bool,

        /// Schedule for later (e.g. "tomorrow 3pm", "2h")
        #[arg(short, long)]
        schedule: Option<String>,

        /// Idempotency token for safe retries
        #[arg(long)]
        token: Option<String>,
    },

    /// List posts
    List {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Filter by status: draft, scheduled, or published
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Update an existing post
    Edit {
        /// Post id to update
        post_id: String,

        /// New content
        #[arg(short, long)]
        content: Option<String>,

        /// New image URL
        #[arg(short, long)]
        image: Option<String>,

        /// New platform(s), comma-separated
        #[arg(short, long)]
        platform: Option<String>,

        /// New status: draft, scheduled, or published
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a post
    Delete {
        /// Post id to delete
        post_id: String,
    },

    /// Show trending topics
    Trends {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the freelancer directory
    Freelancers {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Only show available freelancers
        #[arg(long)]
        available: bool,
    },

    /// Writing assistance
    Assist {
        #[command(subcommand)]
        command: AssistCommands,
    },
}

#[derive(Subcommand, Debug)]
enum AssistCommands {
    /// Generate a post from a prompt
    Generate {
        /// What the post should be about
        prompt: String,
    },

    /// Improve existing content
    Improve {
        /// Content to improve
        content: String,
    },

    /// Suggest content ideas for a topic
    Ideas {
        /// Topic to generate ideas for
        topic: String,

        /// Number of ideas
        #[arg(short, long, default_value_t = 3)]
        count: usize,
    },

    /// Suggest hashtags for content
    Hashtags {
        /// Content to suggest hashtags for
        content: String,

        /// Number of hashtags
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Summarize how a post performed
    Analyze {
        /// Post id to analyze
        post_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; SOCIALBOX_LOG_FORMAT/SOCIALBOX_LOG_LEVEL apply
    // unless --verbose forces debug
    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        logging::init_default();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Build a service honoring the optional state directory override
fn build_service(data_dir: Option<PathBuf>) -> Result<SocialboxService> {
    let config = Config::load().unwrap_or_else(|_| Config::default_config());
    let dir = data_dir.unwrap_or_else(|| config.storage_dir());

    let store = StateStore::with_dir(dir)?;
    let transport: Arc<dyn Transport> = Arc::new(SimulatedTransport::new(
        Duration::from_millis(config.transport.min_latency_ms),
        Duration::from_millis(config.transport.max_latency_ms),
    ));
    SocialboxService::with_components(store, transport)
}

/// Print any notifications the operation produced
fn drain_notifications(receiver: &mut NotificationReceiver) {
    while let Ok(notification) = receiver.try_recv() {
        println!("{}: {}", notification.title, notification.description);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let service = build_service(cli.data_dir)?;
    let mut notifications = service.subscribe();
    service.content().fetch_posts().await?;

    match cli.command {
        Commands::Create {
            content,
            platform,
            image,
            draft,
            schedule,
            token,
        } => {
            cmd_create(&service, content, platform, image, draft, schedule, token).await?;
        }
        Commands::List { format, status } => {
            cmd_list(&service, &format, status.as_deref())?;
        }
        Commands::Edit {
            post_id,
            content,
            image,
            platform,
            status,
        } => {
            cmd_edit(&service, &post_id, content, image, platform, status).await?;
        }
        Commands::Delete { post_id } => {
            service.content().delete_post(&post_id).await?;
        }
        Commands::Trends { format } => {
            cmd_trends(&service, &format).await?;
        }
        Commands::Freelancers { format, available } => {
            cmd_freelancers(&service, &format, available).await?;
        }
        Commands::Assist { command } => {
            cmd_assist(&service, command).await?;
        }
    }

    drain_notifications(&mut notifications);
    Ok(())
}

/// Read content from the argument or stdin
fn resolve_content(content: Option<String>) -> Result<String> {
    match content {
        Some(content) => Ok(content),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(libsocialbox::error::StorageError::Io)?;
            Ok(buffer.trim_end().to_string())
        }
    }
}

/// Parse a comma-separated platform list
fn parse_platforms(input: &str) -> Result<Vec<PlatformKind>> {
    input
        .split(',')
        .map(|s| PlatformKind::from_str(s.trim()).map_err(SocialboxError::InvalidInput))
        .collect()
}

fn parse_status(input: &str) -> Result<PostStatus> {
    match input.to_lowercase().as_str() {
        "draft" => Ok(PostStatus::Draft),
        "scheduled" => Ok(PostStatus::Scheduled),
        "published" => Ok(PostStatus::Published),
        _ => Err(SocialboxError::InvalidInput(format!(
            "Invalid status '{}'. Must be draft, scheduled, or published",
            input
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_create(
    service: &SocialboxService,
    content: Option<String>,
    platform: Option<String>,
    image: Option<String>,
    draft: bool,
    schedule: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let content = resolve_content(content)?;
    let platforms = match platform {
        Some(list) => parse_platforms(&list)?,
        None => service.composer().default_platforms(),
    };

    let request = ComposeRequest {
        content,
        image,
        platforms,
        client_token: token,
    };

    let post = if draft {
        service.composer().save_draft(request).await?
    } else if let Some(time) = schedule {
        let when = libsocialbox::schedule::parse_schedule(&time)?;
        service.composer().schedule(request, Some(when)).await?
    } else {
        service.composer().publish_now(request).await?
    };

    println!("{}", post.id);
    Ok(())
}

/// List posts
fn cmd_list(service: &SocialboxService, format: &str, status: Option<&str>) -> Result<()> {
    validate_format(format)?;

    let mut posts = service.content().posts();
    if let Some(status) = status {
        let status = parse_status(status)?;
        posts.retain(|p| p.status == status);
    }

    if format == "json" {
        print_json(&posts)?;
    } else {
        for post in &posts {
            println!(
                "{} | {:<9} | {} | {}",
                post.id,
                post.status,
                post.platforms
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                truncate_content(&post.content, 50)
            );
        }
    }

    Ok(())
}

async fn cmd_edit(
    service: &SocialboxService,
    post_id: &str,
    content: Option<String>,
    image: Option<String>,
    platform: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let updates = PostUpdate {
        content,
        image,
        platforms: platform.as_deref().map(parse_platforms).transpose()?,
        status: status.as_deref().map(parse_status).transpose()?,
        scheduled_at: None,
        stats: None,
    };

    let post = service.content().update_post(post_id, updates).await?;
    println!("{}", post.id);
    Ok(())
}

/// Show trending topics
async fn cmd_trends(service: &SocialboxService, format: &str) -> Result<()> {
    validate_format(format)?;
    let trends = service.content().fetch_trends().await?;

    if format == "json" {
        print_json(&trends)?;
    } else {
        for trend in &trends {
            println!(
                "{:<10} {:<35} {:>5.1}%  {}",
                trend.platform.to_string(),
                trend.title,
                trend.growth,
                trend.hashtags.join(" ")
            );
        }
    }

    Ok(())
}

/// Show the freelancer directory
async fn cmd_freelancers(service: &SocialboxService, format: &str, available: bool) -> Result<()> {
    validate_format(format)?;

    let mut freelancers = service.content().fetch_freelancers().await?;
    if available {
        freelancers.retain(|f| f.available);
    }

    if format == "json" {
        print_json(&freelancers)?;
    } else {
        for f in &freelancers {
            println!(
                "{:<16} {:<30} {:.1}★  ${}/h  {} jobs",
                f.name, f.title, f.rating, f.hourly_rate, f.completed_jobs
            );
        }
    }

    Ok(())
}

async fn cmd_assist(service: &SocialboxService, command: AssistCommands) -> Result<()> {
    match command {
        AssistCommands::Generate { prompt } => {
            println!("{}", service.assistant().generate_post(&prompt).await);
        }
        AssistCommands::Improve { content } => {
            println!("{}", service.assistant().improve_content(&content).await);
        }
        AssistCommands::Ideas { topic, count } => {
            for idea in service.assistant().content_ideas(&topic, count).await {
                println!("{}", idea);
            }
        }
        AssistCommands::Hashtags { content, count } => {
            println!(
                "{}",
                service.assistant().suggest_hashtags(&content, count).await.join(" ")
            );
        }
        AssistCommands::Analyze { post_id } => {
            let post = service
                .content()
                .posts()
                .into_iter()
                .find(|p| p.id == post_id)
                .ok_or_else(|| SocialboxError::NotFound(format!("post '{}'", post_id)))?;
            let stats = post.stats.unwrap_or_default();
            println!("{}", service.assistant().analyze_performance(&stats).await);
        }
    }
    Ok(())
}

fn validate_format(format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(SocialboxError::InvalidInput(format!(
            "Invalid format '{}'. Must be 'text' or 'json'",
            format
        )));
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(libsocialbox::error::StorageError::Serialize)?;
    println!("{}", json);
    Ok(())
}

/// Truncate content to max length with ellipsis
fn truncate_content(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platforms() {
        let platforms = parse_platforms("twitter, linkedin").unwrap();
        assert_eq!(platforms, vec![PlatformKind::Twitter, PlatformKind::LinkedIn]);

        assert!(parse_platforms("twitter,myspace").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("draft").unwrap(), PostStatus::Draft);
        assert_eq!(parse_status("PUBLISHED").unwrap(), PostStatus::Published);
        assert!(parse_status("pending").is_err());
    }

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 50), "short");
        let long = "a".repeat(60);
        let truncated = truncate_content(&long, 50);
        assert_eq!(truncated.len(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_validate_format() {
        assert!(validate_format("text").is_ok());
        assert!(validate_format("json").is_ok());
        assert!(validate_format("yaml").is_err());
    }
}
