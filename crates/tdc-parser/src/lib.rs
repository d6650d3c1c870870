//! AST and single-file parser for the tdc type-definition schema language.
//!
//! [`parse_module`] turns one source buffer into a [`ast::Module`]: a
//! recursive, look-ahead-of-one parser over the token stream produced by
//! `tdc-scanner`, with name resolution happening inline as each definition
//! closes (see `parser::mod` for the pipeline this mirrors). Linking that
//! single-file result into a multi-module graph — ordering files by their
//! `import` declarations, threading already-resolved siblings through — is
//! `tdc-resolver`'s job, not this crate's.

pub mod ast;
pub mod error;
mod parser;

pub use error::ParsingError;
pub use parser::parse_module;
