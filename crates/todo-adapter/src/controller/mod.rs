//! Controllers - Inbound adapters

pub mod http;
