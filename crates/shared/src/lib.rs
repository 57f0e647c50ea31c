//! Types shared by the timeline client core, the server and the CLI.

pub mod domain;
pub mod error;
pub mod protocol;
