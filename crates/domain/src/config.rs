pub mod cache;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config, ConfigError};
pub use server::ServerConfig;
