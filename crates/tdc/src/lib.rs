//! Facade over the tdc type-definition compiler front end.
//!
//! Wires the three pipeline stages — scanner, parser, resolver — behind a
//! single entry point for consumers who want the whole front end without
//! depending on each stage crate individually.

pub use tdc_common::{limits, SourceLocation};
pub use tdc_parser::{ast, ParsingError};
pub use tdc_resolver::{BufferData, ModuleMap};
pub use tdc_scanner::{Cursor, Token, TokenKind};

/// Run the full pipeline over a set of source files: resolve their module
/// names, order them by `import` dependency, and parse each in turn against
/// its already-resolved siblings.
///
/// This is the one call most consumers need; it is exactly
/// `tdc_resolver::resolve` re-exported under the facade's own name so that
/// a consumer depending only on `tdc` never has to name `tdc-resolver`
/// directly.
pub fn compile_modules(buffers: &[BufferData]) -> Result<ModuleMap, ParsingError> {
    tdc_resolver::resolve(buffers)
}
