//! CLI command implementations

pub mod init;
pub mod run;
pub mod send;
pub mod settings;
pub mod status;
