//! Common types shared by every stage of the tdc type-definition compiler front end.
//!
//! This crate exists to break circular dependencies between the scanner, parser,
//! and resolver crates: each of them needs `SourceLocation`, and the resolver and
//! parser both need the same `limits` constants, so those live here instead of in
//! whichever crate happened to need them first.

pub mod limits;
pub mod location;
pub mod logging;

pub use location::SourceLocation;
