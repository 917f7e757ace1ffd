use color_eyre::eyre::WrapErr;
use fan_ctl::app::App;
use fan_ctl::Config;
use fan_ctl_client::store::project_dirs;
use fan_ctl_client::{FanApi, FileKeyStore, KeyStore};
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::DefaultTerminal;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "fan_ctl=info,fan_ctl_client=info";

fn get_config_path() -> PathBuf {
    match project_dirs() {
        Ok(proj_dirs) => proj_dirs.config_dir().join("config.toml"),
        Err(_) => PathBuf::from("config/default.toml"),
    }
}

/// Logs go to a file so they never draw over the alternate screen.
fn init_logging() -> color_eyre::Result<()> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("fan-ctl.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("opening log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config_path = get_config_path();
    let config = Config::load_or_default(&config_path);
    tracing::info!(config = %config_path.display(), "Starting fan-ctl");

    let rt = tokio::runtime::Runtime::new()?;
    let _runtime_guard = rt.enter();

    let api = FanApi::new(&config.endpoint_options())?;
    let file_store = match config.storage.path {
        Some(ref path) => FileKeyStore::new(path),
        None => FileKeyStore::open_default()?,
    };
    tracing::info!(
        endpoint = %api.endpoint(),
        key_store = %file_store.path().display(),
        "Fan controller client ready"
    );
    let key_store: Box<dyn KeyStore> = Box::new(file_store);

    let mut app = App::new(config, Arc::new(api), key_store);
    app.init();

    let mut terminal = ratatui::init();
    ratatui::crossterm::execute!(io::stdout(), EnableMouseCapture, EnableBracketedPaste)?;

    let result = run(&mut terminal, &mut app);

    let _ = ratatui::crossterm::execute!(io::stdout(), DisableBracketedPaste, DisableMouseCapture);
    ratatui::restore();

    tracing::info!("fan-ctl stopped");
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> color_eyre::Result<()> {
    let tick_rate = app.config.tick_rate();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(tick_rate)? {
            let event = event::read()?;
            if app.handle_event(event) {
                break;
            }
        }

        app.process_async_events();
        app.on_tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
