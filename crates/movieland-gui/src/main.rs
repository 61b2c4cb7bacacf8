mod app;
mod poster_cache;
mod screen;
mod style;
mod theme;
mod widgets;
mod window_state;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use movieland_core::config::AppConfig;

/// Desktop movie discovery client.
#[derive(Debug, Parser)]
#[command(name = "movieland", version, about)]
pub struct Cli {
    /// Load configuration from this file instead of the user config.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Forget the persisted watchlist and theme before starting.
    #[arg(long)]
    pub reset: bool,
}

static CLI: OnceLock<Cli> = OnceLock::new();

/// Command-line arguments, parsed once at startup.
pub fn cli() -> &'static Cli {
    CLI.get_or_init(Cli::parse)
}

fn main() -> iced::Result {
    // `--help` and bad flags exit here, before logging starts.
    cli();
    let _log_guard = init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting movieland");

    let ws = window_state::WindowState::load();
    let mut win = iced::window::Settings {
        size: ws.size(),
        min_size: Some(iced::Size::new(480.0, 360.0)),
        ..Default::default()
    };

    if let Some(pos) = ws.position() {
        win.position = iced::window::Position::Specific(pos);
    } else {
        win.position = iced::window::Position::Centered;
    }

    iced::application(app::Movieland::new, app::Movieland::update, app::Movieland::view)
        .title(app::Movieland::title)
        .subscription(app::Movieland::subscription)
        .theme(app::Movieland::theme)
        .font(lucide_icons::LUCIDE_FONT_BYTES)
        .window(win)
        .run()
}

/// Log to stderr and to a daily rolling file in the data directory.
///
/// The returned guard flushes the file writer on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movieland=debug"))
    };

    let log_dir = AppConfig::log_dir();
    match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "movieland.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt().with_env_filter(filter()).init();
            tracing::warn!(dir = %log_dir.display(), error = %e, "file logging disabled");
            None
        }
    }
}
