//! stackfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `stackfall::{core,input,term,types}` and
//! holds the runner configuration used by the binary.

pub mod config;

pub use stackfall_core as core;
pub use stackfall_input as input;
pub use stackfall_term as term;
pub use stackfall_types as types;

pub use config::Config;
