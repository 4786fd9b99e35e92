mod console;

use std::path::Path;

use anyhow::Context;
use export_app::{initialize_logging, load_config, HostConfig, Session, CONFIG_FILENAME};
use export_logging::export_warn;

fn main() -> anyhow::Result<()> {
    let loaded = load_config(Path::new(CONFIG_FILENAME));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => HostConfig::default(),
    };

    initialize_logging(config.log_destination, config.level_filter());
    if let Err(err) = &loaded {
        export_warn!("Using default settings: {}", err);
    }

    let session = Session::from_config(&config).context("failed to start export engine")?;
    console::run(&session)
}
