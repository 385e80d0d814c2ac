//! Adapters binding the resolution core to the outside world: the
//! bootstrap file and topology database record sources, the wire-format
//! encoder, and the Hickory request handler.

pub mod dns;
pub mod sources;

pub use dns::{DnsServerHandler, Refuse};
pub use sources::{BootstrapFileSource, PgTopologySource};
