//! Tracing setup

mod init;

pub use init::init_tracing;
