use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context as _};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing_subscriber::{Layer, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use video_profile_utils::{
    ClipboardMessages, CommandClipboard, Debouncer, Locale, MemoryToastContainer, Notifier,
    SystemClock, TimedToastWidget, ToastKind, config::Config, copy_to_clipboard, format_date,
    format_duration, format_file_size, get_youtube_embed_url, get_youtube_video_id, is_valid_url,
};

#[derive(Parser)]
#[command(name = "vpu")]
#[command(about = "Formatting, link parsing and notification helpers for video profiles")]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured locale (en-US, vi-VN)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format seconds as HH:MM:SS / MM:SS
    Duration { seconds: f64 },
    /// Print the video id of a YouTube link
    VideoId { url: String },
    /// Print the embeddable player URL of a YouTube link
    EmbedUrl { url: String },
    /// Check whether a string is an absolute URL
    ValidUrl { url: String },
    /// Format a byte count
    FileSize { bytes: u64 },
    /// Describe a timestamp relative to now
    Date { date: String },
    /// Copy text to the system clipboard
    Copy { text: String },
    /// Show a toast and wait for it to hide
    Toast {
        message: String,
        /// success, error, warning or info
        #[arg(long, default_value = "info")]
        kind: String,
    },
    /// Echo stdin lines once typing pauses for the configured debounce wait
    Debounce {
        /// Quiet period in milliseconds, overrides the config
        #[arg(long)]
        wait_ms: Option<u64>,
    },
    /// Show or change saved preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current config as JSON
    Show,
    /// Set a preference (locale, toastAutohideMs, debounceMs, clipboardCommand) and save
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env()?;

    // stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();

    color_eyre::install()?;

    tracing::debug!(
        "vpu v{} ({})",
        env!("CARGO_PKG_VERSION"),
        git_version::git_version!(fallback = "unknown")
    );

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Saved config must not pick up the one-off --locale override
    let command = match args.command {
        Command::Config { action } => return run_config(action, config, args.config),
        command => command,
    };
    if let Some(locale) = args.locale {
        config.preferences.locale = locale;
    }

    tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?
        .block_on(run(command, config))
}

fn run_config(action: ConfigAction, mut config: Config, path: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Show => println!("{}", serde_json::to_string_pretty(&config)?),
        ConfigAction::Set { key, value } => {
            config.preferences.set(&key, &value)?;
            match path {
                Some(path) => config.save_to(&path)?,
                None => config.save()?,
            }
        }
    }
    Ok(())
}

async fn run(command: Command, config: Config) -> Result<()> {
    let preferences = config.preferences;
    let locale = preferences.locale;

    match command {
        Command::Duration { seconds } => println!("{}", format_duration(seconds)),
        Command::VideoId { url } => print_optional(get_youtube_video_id(Some(url.as_str()))),
        Command::EmbedUrl { url } => {
            print_optional(get_youtube_embed_url(Some(url.as_str())).as_deref())
        }
        Command::ValidUrl { url } => println!("{}", is_valid_url(&url)),
        Command::FileSize { bytes } => println!("{}", format_file_size(bytes)),
        Command::Date { date } => println!("{}", format_date(&date, &SystemClock, locale)),
        Command::Copy { text } => {
            let (notifier, container) = terminal_notifier(preferences.toast_autohide())?;
            let clipboard = Arc::new(CommandClipboard::from_command_line(
                &preferences.clipboard_command,
            )?);
            copy_to_clipboard(
                clipboard,
                notifier,
                ClipboardMessages::for_locale(locale),
                text,
            )?
            .await?;
            wait_for_toasts(&container).await;
        }
        Command::Toast { message, kind } => {
            let (notifier, container) = terminal_notifier(preferences.toast_autohide())?;
            let kind = kind.parse::<ToastKind>().unwrap_or_default();
            notifier.show_toast(&message, kind);
            wait_for_toasts(&container).await;
        }
        Command::Debounce { wait_ms } => {
            let wait = wait_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| preferences.debounce_wait());
            let debouncer = Debouncer::new(wait, |line: String| println!("{line}"))?;

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                debouncer.call(line);
            }
            while debouncer.is_pending() {
                tokio::time::sleep(wait / 4 + Duration::from_millis(1)).await;
            }
        }
        Command::Config { .. } => unreachable!("handled before the runtime starts"),
    }

    Ok(())
}

fn print_optional(value: Option<&str>) {
    match value {
        Some(value) => println!("{value}"),
        None => println!("null"),
    }
}

fn terminal_notifier(autohide: Duration) -> Result<(Arc<Notifier>, Arc<MemoryToastContainer>)> {
    let container = Arc::new(MemoryToastContainer::new());
    let widget = TimedToastWidget::new(autohide, tokio::runtime::Handle::try_current()?);
    let notifier = Arc::new(Notifier::new(Some(container.clone()), Arc::new(widget)));
    Ok((notifier, container))
}

async fn wait_for_toasts(container: &MemoryToastContainer) {
    while !container.is_empty() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
