//! Export app: the session controller that binds the pure core to the engine,
//! plus host configuration and logging setup.
mod config;
mod effects;
mod logging;
mod session;

pub use config::{load_config, ConfigError, HostConfig, CONFIG_FILENAME};
pub use effects::{map_engine_event, EffectRunner};
pub use logging::{initialize as initialize_logging, LogDestination};
pub use session::Session;
