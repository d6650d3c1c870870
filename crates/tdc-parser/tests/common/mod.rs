//! Shared fixture helpers for the parser's integration tests.

use rustc_hash::FxHashMap;
use tdc_parser::ast::Module;
use tdc_parser::{parse_module, ParsingError};

#[allow(dead_code)]
pub fn parse(source: &str) -> Result<Module, ParsingError> {
    parse_module("test.tdef", "test", source, &FxHashMap::default())
}

#[allow(dead_code)]
pub fn parse_with_siblings(
    filename: &str,
    module_name: &str,
    source: &str,
    siblings: &FxHashMap<String, Module>,
) -> Result<Module, ParsingError> {
    parse_module(filename, module_name, source, siblings)
}
