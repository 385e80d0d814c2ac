pub mod encoder;
pub mod handler;

pub use handler::{DnsServerHandler, Refuse};
