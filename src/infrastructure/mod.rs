//! Adapters behind the domain ports.

pub mod clock;
pub mod sink;
