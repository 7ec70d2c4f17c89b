//! Port traits the domain talks to. Implementations live in `adapters`.

pub mod config_port;
pub mod data_port;
pub mod report_port;
