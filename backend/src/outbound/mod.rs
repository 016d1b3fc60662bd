//! Outbound adapters implementing the driven ports.

pub mod mail;
pub mod persistence;
