mod bootstrap;
mod errors;
mod logging;
mod root;
mod server;
mod topology;
mod zones;

pub use bootstrap::BootstrapConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use topology::TopologyConfig;
pub use zones::ZonesConfig;
