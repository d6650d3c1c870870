//! The multi-module resolver: orders a set of source files by their
//! `import` dependencies and runs the single-file parser over each in that
//! order, handing it the growing map of already-resolved sibling modules so
//! cross-module references resolve as each file is parsed.
//!
//! The resolver does not re-implement name resolution itself — that lives
//! in `tdc_parser`, which is handed a read-only view of every module parsed
//! so far. This crate's own job is strictly the graph problem: deriving a
//! module name per input file, rejecting collisions between files, and
//! finding an order that respects `import` edges (falling back to a
//! topological sort only when the input order does not already work).

mod graph;

use rustc_hash::FxHashMap;
use tdc_common::SourceLocation;
use tdc_parser::ast::Module;
use tdc_parser::ParsingError;

pub use graph::module_name_from_filename;

/// One input file to resolve, as handed to the resolver by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferData {
    pub filename: String,
    pub buffer: String,
}

impl BufferData {
    #[must_use]
    pub fn new(filename: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            buffer: buffer.into(),
        }
    }
}

/// The resolver's output: every input file's `Module`, keyed by module name.
pub type ModuleMap = FxHashMap<String, Module>;

/// Resolve a set of source files into a `ModuleMap`.
///
/// Modules are parsed in an order such that every `import` target is
/// already present in the map by the time its importer is parsed. Parsing
/// stops at the first failure, matching the single-file parser's own
/// fail-fast behavior.
pub fn resolve(buffers: &[BufferData]) -> Result<ModuleMap, ParsingError> {
    let span = tracing::span!(tracing::Level::DEBUG, "resolve", file_count = buffers.len());
    let _guard = span.enter();

    if buffers.len() > tdc_common::limits::MAX_MODULES {
        tracing::debug!(count = buffers.len(), "input exceeds the module count limit");
        return Err(ParsingError::LimitExceeded {
            what: "module count",
            location: SourceLocation::new(String::new(), 0, 0),
        });
    }

    let module_names = graph::derive_module_names(buffers)?;
    let order = graph::order_modules(buffers, &module_names)?;

    let mut modules: ModuleMap = FxHashMap::default();
    for index in order {
        let buffer = &buffers[index];
        let module_name = &module_names[index];
        tracing::debug!(module = module_name.as_str(), filename = buffer.filename.as_str(), "resolving module");
        let module = tdc_parser::parse_module(&buffer.filename, module_name, &buffer.buffer, &modules)?;
        modules.insert(module_name.clone(), module);
    }
    Ok(modules)
}
