mod config;
mod logging;
mod shutdown;

pub use config::{listen_address, load_config};
pub use logging::init_logging;
pub use shutdown::wait_for_shutdown_signal;
