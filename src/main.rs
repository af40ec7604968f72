use skyflap::config::Settings;
use skyflap::shell;
use skyflap::storage::FileStore;
use std::fs::{self, OpenOptions};
use std::io;

/// Sends log records to a file; the terminal belongs to the game.
fn init_logging(settings: &Settings) -> io::Result<()> {
    fs::create_dir_all(&settings.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings.log_path())?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let settings = Settings::from_env();
    if let Err(e) = init_logging(&settings) {
        eprintln!("skyflap: logging disabled: {}", e);
    }
    log::info!("skyflap {} starting", env!("CARGO_PKG_VERSION"));

    let store = FileStore::open(settings.scores_path());
    log::info!("scores at {}", store.path().display());

    let result = shell::play(store, &settings);
    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    result
}
