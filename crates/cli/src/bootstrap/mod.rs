pub mod config;
pub mod logging;
pub mod snapshot;

pub use config::{load_config, log_config};
pub use logging::init_logging;
pub use snapshot::{persist_cache, restore_cache};
