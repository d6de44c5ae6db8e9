//! Property request parsing.
//!
//! A PROPFIND body reaches the engine either as raw XML ([`parse_propfind`])
//! or as an already decoded structured value ([`propfind_from_value`]).

mod error;
mod propfind;
mod value;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use propfind::parse_propfind;
pub use value::propfind_from_value;
