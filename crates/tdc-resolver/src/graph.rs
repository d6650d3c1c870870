//! Module naming, duplicate-name detection, and import-dependency ordering.
//!
//! None of this touches the grammar or name resolution rules — it only
//! needs enough of the lexical grammar to find `import NAME` lines, which
//! it gets by running the scanner (not the full parser) over each buffer.

use rustc_hash::FxHashMap;
use tdc_common::SourceLocation;
use tdc_parser::ParsingError;
use tdc_scanner::{Cursor, Token, TokenKind};

use crate::BufferData;

/// Derive a module name from a file's basename, minus its trailing
/// extension (if any), per §6: "The filename's basename (minus trailing
/// `.` extension if any) is the module name."
#[must_use]
pub fn module_name_from_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

/// Compute one module name per buffer, rejecting collisions.
///
/// Per the resolved open question on duplicate module names (§9), two files
/// deriving the same module name are rejected before either is parsed
/// against the other.
pub(crate) fn derive_module_names(buffers: &[BufferData]) -> Result<Vec<String>, ParsingError> {
    let mut names = Vec::with_capacity(buffers.len());
    let mut seen: FxHashMap<String, ()> = FxHashMap::default();
    for buffer in buffers {
        let name = module_name_from_filename(&buffer.filename);
        if seen.contains_key(&name) {
            tracing::debug!(module = name.as_str(), "duplicate module name across input files");
            return Err(ParsingError::DuplicateModule { name });
        }
        seen.insert(name.clone(), ());
        names.push(name);
    }
    Ok(names)
}

/// Scan a buffer for its `import NAME` lines without running the full
/// parser, returning the imported module name and the location of its name
/// token for each. Aliases are irrelevant to the dependency graph and are
/// not collected here; the parser re-derives and validates them in full
/// once this file is actually parsed.
fn scan_imports(filename: &str, source: &str) -> Result<Vec<(String, SourceLocation)>, ParsingError> {
    let mut cursor = Cursor::new(filename.to_string(), source);
    let mut imports = Vec::new();
    while let Some(token) = cursor.next()? {
        let Token::Symbol(word) = token else {
            continue;
        };
        if word != "import" {
            continue;
        }
        cursor.expect(TokenKind::Space)?;
        let location = cursor.peek_location()?;
        let name = match cursor.expect_one_of(&[TokenKind::Name, TokenKind::Symbol])? {
            Token::Name(s) | Token::Symbol(s) => s,
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };
        imports.push((name, location));
    }
    Ok(imports)
}

/// Order module indices so that every `import` target precedes its
/// importer. If the input order already satisfies every dependency (the
/// common case where the driver supplies files bottom-up), the returned
/// order is exactly the input order; otherwise a topological sort is
/// performed. Imports naming a module outside this input set are left
/// alone here — the parser itself reports those as `UnknownModule` once it
/// actually reaches that import line.
pub(crate) fn order_modules(
    buffers: &[BufferData],
    module_names: &[String],
) -> Result<Vec<usize>, ParsingError> {
    let index_by_name: FxHashMap<&str, usize> = module_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut dependencies = Vec::with_capacity(buffers.len());
    for buffer in buffers {
        dependencies.push(scan_imports(&buffer.filename, &buffer.buffer)?);
    }

    let mut in_degree = vec![0usize; module_names.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); module_names.len()];
    for (i, deps) in dependencies.iter().enumerate() {
        for (dep_name, _location) in deps {
            if let Some(&dep_index) = index_by_name.get(dep_name.as_str()) {
                in_degree[i] += 1;
                dependents[dep_index].push(i);
            }
        }
    }

    let mut resolved = vec![false; module_names.len()];
    let mut ready: Vec<usize> = (0..module_names.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(module_names.len());
    let mut cursor = 0;
    while cursor < ready.len() {
        let next = ready[cursor];
        cursor += 1;
        resolved[next] = true;
        order.push(next);
        for &dependent in &dependents[next] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(dependent);
            }
        }
    }

    if order.len() == module_names.len() {
        return Ok(order);
    }

    // A cycle remains among the modules that never reached zero in-degree.
    // Report it at the first still-blocked import of the first still-blocked
    // module, in input order, so the diagnostic is at least deterministic.
    let stuck = (0..module_names.len())
        .find(|&i| !resolved[i])
        .expect("order shorter than module_names implies an unresolved node remains");
    let offending = dependencies[stuck].iter().find(|(dep_name, _)| {
        index_by_name
            .get(dep_name.as_str())
            .is_some_and(|&dep_index| !resolved[dep_index])
    });
    let (name, location) = match offending {
        Some((name, location)) => (name.clone(), location.clone()),
        None => (module_names[stuck].clone(), SourceLocation::new(String::new(), 0, 0)),
    };
    tracing::debug!(module = name.as_str(), "import cycle detected among input modules");
    Err(ParsingError::UnknownModule { name, location })
}
