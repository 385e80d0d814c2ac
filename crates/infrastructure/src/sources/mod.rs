pub mod bootstrap_file;
pub mod topology;

pub use bootstrap_file::BootstrapFileSource;
pub use topology::PgTopologySource;
