use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::{
    event::{read as event_read, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use serde_json::json;
use std::{
    io::{self, stdout, Stdout},
    path::PathBuf,
};
use tui_settings::{
    app::{SessionStatus, SettingsSession},
    config::Config,
    services::{
        log_dirs,
        registry::{RegistryBuilder, SettingDefinition, SettingsRegistry},
        store::MemorySettingsStore,
        tracing_setup,
    },
    view::ordered_select::OrderedListOption,
};

/// Browse and edit settings in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-settings")]
#[command(about = "A terminal settings browser with search and nested ordered lists", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Maximum number of rows shown at once
    #[arg(long, value_name = "ROWS")]
    max_visible: Option<usize>,

    /// Disable the search field
    #[arg(long)]
    no_search: bool,

    /// Override the locale (e.g., 'en')
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    print_schema: bool,
}

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, including on early returns.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> AnyhowResult<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal =
            Terminal::new(CrosstermBackend::new(out)).context("Failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::warn!("Failed to leave alternate screen: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(max_visible) = args.max_visible {
        config.list.max_visible = max_visible;
    }
    if args.no_search {
        config.list.enable_search = false;
    }
    if let Some(locale) = &args.locale {
        config.locale = Some(locale.clone());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn demo_registry() -> AnyhowResult<SettingsRegistry> {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            "editor",
            vec![
                SettingDefinition::choice("timeout", "Timeout", ["10", "30", "60"], json!(30))
                    .with_description("Seconds to wait before giving up on a request"),
                SettingDefinition::boolean("debug", "Debug Mode", false)
                    .with_description("Write verbose diagnostics to the log file"),
                SettingDefinition::choice("theme", "Theme", ["dark", "light", "high-contrast"], json!("dark")),
                SettingDefinition::text("greeting", "Greeting", "hello"),
                SettingDefinition::number("tab_width", "Tab Width", 4)
                    .with_description("Columns per indentation level"),
            ],
        )
        .context("Failed to register editor settings")?;
    builder
        .register(
            "providers",
            vec![SettingDefinition::ordered_list(
                "order",
                "Provider Order",
                vec![
                    OrderedListOption::new("anthropic", "Anthropic"),
                    OrderedListOption::new("openai", "OpenAI"),
                    OrderedListOption::new("google", "Google"),
                    OrderedListOption::new("local", "Local Model"),
                ],
                "anthropic",
            )
            .with_description("Providers to try, in order")],
        )
        .context("Failed to register provider settings")?;
    Ok(builder.build())
}

fn run(session: &mut SettingsSession<MemorySettingsStore>) -> AnyhowResult<()> {
    let mut guard = TerminalGuard::enter()?;

    loop {
        guard
            .terminal
            .draw(|frame| {
                let area = frame.area();
                let lines = session.render(area.width as usize);
                frame.render_widget(Paragraph::new(lines), area);
            })
            .context("Failed to draw")?;

        match event_read().context("Failed to read terminal event")? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if session.handle_key(key) == SessionStatus::Closed {
                    break;
                }
            }
            CrosstermEvent::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                session.invalidate();
            }
            _ => {}
        }
    }

    Ok(())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.print_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let config = load_config(&args)?;

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    if let Some(locale) = &config.locale {
        rust_i18n::set_locale(locale);
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if let Err(e) = tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("Settings browser starting");

    let mut session = SettingsSession::new(demo_registry()?, MemorySettingsStore::new(), &config);
    run(&mut session)?;

    let store = session.into_store();
    tracing::info!("Settings browser exiting with {} stored values", store.len());
    let snapshot =
        serde_json::to_string_pretty(&store.snapshot()).context("Failed to serialize values")?;
    writeln_stdout(&snapshot)
}

fn writeln_stdout(text: &str) -> AnyhowResult<()> {
    use std::io::Write;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", text).context("Failed to write to stdout")
}
