//! # Bisect CLI Entry Point
//!
//! This is the main entry point for the binary search visualizer.
//!
//! ## Overview
//!
//! Load or generate a sorted array, type a target value, and watch binary
//! search find it: every probe is listed in the steps panel and the matched
//! element is lifted, faded and recolored.
//!
//! ## Usage
//!
//! ```bash
//! # Start with an empty array
//! bisect
//!
//! # Preload values (they are sorted on load)
//! bisect --data "5,3,8,1"
//!
//! # Pick a theme and write a log file
//! bisect --theme nord --log-file /tmp/bisect.log
//! ```
//!
//! ## Key Bindings
//!
//! - `t` - Edit the target value (`Enter` searches, `Esc` stops editing)
//! - `s` / `Enter` - Search for the target
//! - `i` - Input array data (comma-separated integers)
//! - `g` - Generate random data of a given size
//! - `r` - Reset array, target and result
//! - `T` - Cycle color theme
//! - `?` - Show/hide help
//! - `q` / `Ctrl+c` - Quit

use bisect::dataset;
use bisect::ui::{self, config::Config, theme::Theme, App};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Bisect - watch binary search work through a sorted array
#[derive(Parser, Debug)]
#[command(name = "bisect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated binary search visualizer for the terminal", long_about = None)]
struct Args {
    /// Comma-separated integers to load on startup
    #[arg(short, long, value_name = "VALUES", allow_hyphen_values = true)]
    data: Option<String>,

    /// Color theme to use for this session (see --list-themes)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Read and save settings in this file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append logs to this file (filter with RUST_LOG, default "info")
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the built-in theme names and exit
    #[arg(long)]
    list_themes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Send `tracing` output to `path`. The terminal belongs to the UI, so
/// without a log file nothing is recorded.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Resolve settings from the config file and command-line overrides.
fn load_settings(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    let (mut config, config_path) = match &args.config {
        Some(path) => (Config::load_from(path)?, Some(path.clone())),
        None => (Config::load(), Config::config_path().ok()),
    };

    if let Some(name) = &args.theme {
        let theme = Theme::by_name(name).with_context(|| {
            let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
            format!("Unknown theme '{}'. Available: {}", name, names.join(", "))
        })?;
        config.theme = theme.name.to_string();
    }

    Ok((config, config_path))
}

async fn run_application(args: Args) -> Result<()> {
    if args.list_themes {
        for theme in Theme::all() {
            println!("{}", theme.name);
        }
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let (config, config_path) = load_settings(&args)?;
    tracing::info!(?config, "starting");

    // Validate preloaded data before touching the terminal
    if let Some(data) = &args.data {
        dataset::parse_values(data).context("Invalid --data value")?;
    }

    let mut app = App::from_config(config, config_path);
    if let Some(data) = &args.data {
        let effects = app.orchestrator.submit_array(data);
        app.apply(effects, Instant::now());
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    tracing::info!("exiting");
    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        // Apply finished searches and advance the highlight before drawing
        app.tick(Instant::now());

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let poll_timeout = if app.is_animating() {
            Duration::from_millis(16) // ~60fps while a highlight plays
        } else {
            Duration::from_millis(100)
        };

        if let Some(Event::Key(key)) = event_reader.read_event(poll_timeout)? {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    /// Mock event reader for testing that returns a predetermined sequence of events
    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    /// Helper to create a key event
    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn args() -> Args {
        Args {
            data: None,
            theme: None,
            config: None,
            log_file: None,
            list_themes: false,
        }
    }

    #[test]
    fn test_mock_event_reader() {
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('i')),
            key_event(KeyCode::Enter),
        ]);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('i'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));

        // Should return None when no more events
        assert!(reader
            .read_event(Duration::from_millis(10))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_run_app_loads_data_and_quits() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::from_config(Config::default(), None);

        let mut events = vec![key_event(KeyCode::Char('i'))];
        events.extend("5,3,8,1".chars().map(|c| key_event(KeyCode::Char(c))));
        events.push(key_event(KeyCode::Enter));
        events.push(key_event(KeyCode::Char('q')));
        let mut reader = MockEventReader::new(events);

        run_app(&mut terminal, &mut app, &mut reader).await.unwrap();

        assert!(app.should_quit);
        let labels: Vec<&str> = app.tokens.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "3", "5", "8"]);

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Array loaded with 4 elements."));
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["bisect", "--data", "-5,3,8", "--theme", "nord"])
            .expect("valid args");
        assert_eq!(args.data.as_deref(), Some("-5,3,8"));
        assert_eq!(args.theme.as_deref(), Some("nord"));
        assert!(!args.list_themes);
    }

    #[test]
    fn test_load_settings_theme_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut args = args();
        args.config = Some(config_path.clone());
        args.theme = Some("dracula".to_string());

        let (config, path) = load_settings(&args).unwrap();
        assert_eq!(config.theme, "Dracula");
        assert_eq!(path, Some(config_path));
    }

    #[test]
    fn test_load_settings_unknown_theme() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = args();
        args.config = Some(temp_dir.path().join("config.json"));
        args.theme = Some("solarized neon".to_string());

        let err = load_settings(&args).unwrap_err();
        assert!(err.to_string().contains("Unknown theme"));
    }

    #[tokio::test]
    async fn test_run_application_invalid_data() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = args();
        args.config = Some(temp_dir.path().join("config.json"));
        args.data = Some("1,x,3".to_string());

        let err = run_application(args).await.unwrap_err();
        assert!(err.to_string().contains("Invalid --data value"));
    }

    #[tokio::test]
    async fn test_run_application_malformed_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, "not json").unwrap();

        let mut args = args();
        args.config = Some(config_path);

        let err = run_application(args).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_run_application_list_themes() {
        let mut args = args();
        args.list_themes = true;
        assert!(run_application(args).await.is_ok());
    }
}
