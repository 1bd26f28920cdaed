//! Grandpa game runtime (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `grandpa::{core,engine,input,term,types}` and ships the
//! terminal binary.

pub use grandpa_core as core;
pub use grandpa_engine as engine;
pub use grandpa_input as input;
pub use grandpa_term as term;
pub use grandpa_types as types;
