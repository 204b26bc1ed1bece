//! CLI response formatting and output.

mod response;

pub use response::*;
