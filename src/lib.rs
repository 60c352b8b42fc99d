//! Blockfall (workspace facade crate).
//!
//! Re-exports the layer crates under `crates/` as
//! `blockfall::{core,input,term,types}` and holds the binary's JSONL event log.

pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
