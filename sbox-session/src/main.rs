//! sbox-session - Manage the SocialBox session and platform connections

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use libsocialbox::logging::{self, LogFormat, LoggingConfig};
use libsocialbox::notify::NotificationReceiver;
use libsocialbox::transport::{SimulatedTransport, Transport};
use libsocialbox::types::PlatformKind;
use libsocialbox::{Config, Result, SocialboxError, SocialboxService, StateStore};

#[derive(Parser, Debug)]
#[command(name = "sbox-session")]
#[command(version)]
#[command(about = "Manage the SocialBox session")]
#[command(long_about = "\
sbox-session - Manage the SocialBox session

DESCRIPTION:
    sbox-session handles authentication and platform connections for the
    SocialBox state store. Use it to log in, connect platform accounts,
    and inspect the current session.

COMMANDS:
    login       Log in and establish a session
    logout      End the session and clear platform connections
    connect     Connect a platform account
    disconnect  Disconnect a platform account
    status      Show the current session

USAGE EXAMPLES:
    # Log in
    sbox-session login demo@example.com

    # Connect Twitter and Instagram
    sbox-session connect twitter
    sbox-session connect instagram

    # Show the session in JSON
    sbox-session status --format json

    # Disconnect by platform name
    sbox-session disconnect twitter

CONFIGURATION:
    Configuration file: ~/.config/socialbox/config.toml
    State directory: ~/.local/share/socialbox

    Override with environment variables:
        SOCIALBOX_CONFIG - Path to config file

EXIT CODES:
    0 - Success
    1 - Operation failed (not logged in, unknown connection)
    2 - Storage or configuration error
    3 - Invalid input
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
    /// Log in and establish a session
    Login {
        /// Email address to log in with
        email: String,

        /// Password (any value is accepted by the simulated backend)
        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// End the session
    Logout,

    /// Connect a platform account
    Connect {
        /// Platform: facebook, twitter, instagram, or linkedin
        platform: String,
    },

    /// Disconnect a platform account
    Disconnect {
        /// Platform name or connection id
        platform: String,
    },

    /// Show the current session
    Status {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
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

    match cli.command {
        Commands::Login { email, password } => {
            service.session().login(&email, &password).await?;
        }
        Commands::Logout => {
            service.session().logout()?;
        }
        Commands::Connect { platform } => {
            let kind = parse_platform(&platform)?;
            service.session().connect_platform(kind).await?;
        }
        Commands::Disconnect { platform } => {
            let id = resolve_connection_id(&service, &platform)?;
            service.session().disconnect_platform(&id).await?;
        }
        Commands::Status { format } => {
            cmd_status(&service, &format)?;
        }
    }

    drain_notifications(&mut notifications);
    Ok(())
}

fn parse_platform(input: &str) -> Result<PlatformKind> {
    PlatformKind::from_str(input).map_err(SocialboxError::InvalidInput)
}

/// Accept either a platform name or a raw connection id
fn resolve_connection_id(service: &SocialboxService, input: &str) -> Result<String> {
    if let Ok(kind) = PlatformKind::from_str(input) {
        let connection = service
            .session()
            .connected_platforms()
            .into_iter()
            .find(|p| p.kind == kind)
            .ok_or_else(|| {
                SocialboxError::NotFound(format!("no connected {} account", kind))
            })?;
        return Ok(connection.id);
    }
    Ok(input.to_string())
}

/// Show the current session
fn cmd_status(service: &SocialboxService, format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(SocialboxError::InvalidInput(format!(
            "Invalid format '{}'. Must be 'text' or 'json'",
            format
        )));
    }

    let user = service.session().current_user();
    let platforms = service.session().connected_platforms();

    if format == "json" {
        let json = serde_json::json!({
            "user": user,
            "platforms": platforms,
        });
        println!("{}", serde_json::to_string_pretty(&json).map_err(
            libsocialbox::error::StorageError::Serialize,
        )?);
        return Ok(());
    }

    match user {
        Some(user) => {
            println!("Logged in as {} <{}>", user.name, user.email);
            if platforms.is_empty() {
                println!("No platforms connected");
            } else {
                for p in platforms {
                    let expiry = p
                        .token_expiry
                        .map(|t| t.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "never".to_string());
                    println!("{:<10} {:<22} expires {}", p.kind.to_string(), p.username, expiry);
                }
            }
        }
        None => println!("Not logged in"),
    }

    Ok(())
}
