//! Kitchen-sink LINE bot library: configuration, LINE API plumbing, text
//! dispatch and the webhook gateway used by the CLI.

pub mod config;
pub mod gateway;
pub mod handler;
pub mod init;
pub mod line;
