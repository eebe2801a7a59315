//! gh CLI gateway
//!
//! Structured command construction, the gateway trait, and the process
//! executor behind it.

pub mod command;
pub mod error;
pub mod executor;

pub use command::GhCommand;
pub use error::{GhError, GhResult};
pub use executor::{run_json, GhCli, GhGateway};
