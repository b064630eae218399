//! sostenuto - Terminal MIDI voice engine
//!
//! Run with: cargo run
//!
//! Every MIDI input port found at startup is connected. Logs go to
//! `sostenuto.log` in the system temp directory; set `RUST_LOG` to change the
//! filter.

mod app;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use sostenuto::SynthConfig;

use app::Session;
use ui::UiApp;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let session = Session::start(SynthConfig::default())?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(session).run(&mut terminal);
    ratatui::restore();

    result
}

fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("sostenuto.log");
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    log::info!("logging to {}", path.display());
    Ok(())
}
