mod app;
mod board;
mod config;
mod constants;
mod content;
mod export;
mod infra;
mod llm;
mod resolver;
mod state;
mod store;
mod ui;

use std::io;
use std::path::Path;
use std::sync::Arc;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use app::App;
use config::AppConfig;
use constants::{CACHE_FILE, ERRORS_DIR, STORE_DIR};
use infra::log::log_error;
use llm::{GeminiClient, Generator};
use store::ContentCache;

fn main() -> io::Result<()> {
    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate
    // screen and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableMouseCapture);
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let error_dir = Path::new(STORE_DIR).join(ERRORS_DIR);
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = error_dir.join("panic.log");
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .and_then(|mut f| {
                use std::io::Write;
                f.write_all(msg.as_bytes())
            });

        default_hook(info);
    }));

    let config = AppConfig::load();
    let cache = ContentCache::load(&Path::new(STORE_DIR).join(CACHE_FILE));
    let chapters = match content::load_manifest(&config.content_dir) {
        Ok(chapters) => chapters,
        Err(e) => {
            // The app still runs for custom chapters and the tools.
            log_error(&e);
            Vec::new()
        }
    };
    let client = Arc::new(GeminiClient::new(&config).map_err(io::Error::other)?);
    let generator: Arc<dyn Generator> = client.clone();

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    io::stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(chapters, config, cache, client, generator);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result.map_err(io::Error::other)
}
