//! Generic utility primitives with zero domain knowledge.
//!
//! - `shell` - Shell quoting for command display

pub mod shell;
