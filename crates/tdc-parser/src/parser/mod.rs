//! The single-file parser: a recursive, look-ahead-of-one parser that turns
//! the token stream of one source file into a `Module`.
//!
//! Unlike a classic parser/binder split, name resolution happens inline as
//! each definition is parsed (see `types::Parser::resolve_bare_name`): the
//! parser is handed a read-only map of already-resolved sibling modules (the
//! multi-module resolver guarantees these are parsed in import-dependency
//! order), so cross-module references resolve immediately rather than being
//! deferred to a later pass. The only deferred rewrite is the self-recursive
//! `Loose` placeholder, patched the moment its enclosing definition closes.

mod declarations;
mod types;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tdc_scanner::{Cursor, Token, TokenKind};

use crate::ast::{
    Definition, DefinitionRef, Module, Type, TypeReference, UnionDefinition,
};
use crate::error::ParsingError;

/// Parse one source file into a fully-resolved `Module`.
///
/// `siblings` must contain every module this file's `import` declarations
/// name, already fully resolved — the multi-module resolver is responsible
/// for establishing that invariant by processing modules in topological
/// order.
pub fn parse_module(
    filename: &str,
    module_name: &str,
    source: &str,
    siblings: &FxHashMap<String, Module>,
) -> Result<Module, ParsingError> {
    let span = tracing::span!(tracing::Level::DEBUG, "parse_module", module = module_name);
    let _guard = span.enter();

    let mut parser = Parser {
        cursor: Cursor::new(filename.to_string(), source),
        siblings,
        imports: IndexMap::new(),
        definitions: Vec::new(),
        index_by_name: FxHashMap::default(),
        current_definition: None,
    };
    parser.run()?;

    let module = Module {
        name: module_name.to_string(),
        filename: filename.to_string(),
        imports: parser.imports,
        definitions: parser.definitions,
    };
    assert_no_loose(&module)?;
    Ok(module)
}

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    siblings: &'a FxHashMap<String, Module>,
    imports: IndexMap<String, String>,
    definitions: Vec<Definition>,
    index_by_name: FxHashMap<String, usize>,
    /// `(name, open_names)` of the definition currently being parsed, used
    /// to detect self-recursive references (step 3 of name resolution).
    current_definition: Option<(String, Vec<String>)>,
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<(), ParsingError> {
        loop {
            self.skip_top_level_whitespace()?;
            let Some(token) = self.cursor.peek()?.cloned() else {
                break;
            };
            match token {
                Token::Symbol(keyword) => match keyword.as_str() {
                    "struct" => self.parse_struct()?,
                    "union" => self.parse_union()?,
                    "enum" => self.parse_enum()?,
                    "untagged" => self.parse_untagged_union()?,
                    "import" => self.parse_import()?,
                    _ => {
                        self.cursor.next()?;
                    }
                },
                _ => {
                    self.cursor.next()?;
                }
            }
        }
        Ok(())
    }

    fn skip_top_level_whitespace(&mut self) -> Result<(), ParsingError> {
        loop {
            match self.cursor.peek()? {
                Some(Token::Space) | Some(Token::Newline) => {
                    self.cursor.next()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn peek_is(&mut self, kind: TokenKind) -> bool {
        matches!(self.cursor.peek(), Ok(Some(token)) if token.kind() == kind)
    }

    /// Register a just-closed definition: patch its self-recursive `Loose`
    /// references, check for a duplicate name, and (for imports) record the
    /// alias binding.
    fn close_definition(&mut self, mut definition: Definition) -> Result<(), ParsingError> {
        let binding_name = definition.binding_name().to_string();
        let index = self.definitions.len();
        let location = definition.binding_location().clone();
        let def_ref = DefinitionRef {
            index,
            name: crate::ast::DefinitionName {
                value: binding_name.clone(),
                location: location.clone(),
            },
        };
        patch_loose_in_definition(&mut definition, &binding_name, &def_ref);

        if let Some(&existing_index) = self.index_by_name.get(&binding_name) {
            return Err(ParsingError::DuplicateDefinition {
                existing: Box::new(self.definitions[existing_index].clone()),
                definition: Box::new(definition),
                location,
            });
        }

        if let Definition::Import(ref import) = definition {
            self.imports.insert(import.alias.clone(), import.name.clone());
        }

        self.index_by_name.insert(binding_name, index);
        self.definitions.push(definition);
        Ok(())
    }
}

fn patch_loose_in_definition(definition: &mut Definition, self_name: &str, def_ref: &DefinitionRef) {
    match definition {
        Definition::Structure(s) => {
            for field in &mut s.fields {
                patch_loose_in_type(&mut field.type_, self_name, def_ref);
            }
        }
        Definition::Union(UnionDefinition::Tagged(u)) => {
            for constructor in &mut u.constructors {
                patch_loose_in_type(&mut constructor.parameter, self_name, def_ref);
            }
        }
        // An embedded constructor's parameter is already unwrapped to a
        // `DefinitionRef` pointing at a plain record by the time it is
        // stored (see `declarations::require_plain_structure`); a `Loose`
        // self-reference can never reach that shape, since a union is
        // never a plain record.
        Definition::Union(UnionDefinition::Embedded(_)) => {}
        Definition::Enumeration(_) => {}
        Definition::UntaggedUnion(u) => {
            for member in &mut u.members {
                patch_loose_in_reference(member, self_name, def_ref);
            }
        }
        Definition::Import(_) => {}
    }
}

fn patch_loose_in_type(ty: &mut Type, self_name: &str, def_ref: &DefinitionRef) {
    match ty {
        Type::Empty | Type::String(_) => {}
        Type::Reference(reference) => patch_loose_in_reference(reference, self_name, def_ref),
        Type::Array { element, .. } | Type::Slice { element } => {
            patch_loose_in_type(element, self_name, def_ref);
        }
        Type::Pointer { inner } | Type::Optional { inner } => {
            patch_loose_in_type(inner, self_name, def_ref);
        }
    }
}

fn patch_loose_in_reference(reference: &mut TypeReference, self_name: &str, def_ref: &DefinitionRef) {
    match reference {
        TypeReference::Loose { name, .. } if name == self_name => {
            *reference = TypeReference::Definition(def_ref.clone());
        }
        TypeReference::AppliedName {
            reference: inner,
            open_name_arguments,
        } => {
            patch_loose_in_reference(inner, self_name, def_ref);
            for arg in open_name_arguments {
                patch_loose_in_type(arg, self_name, def_ref);
            }
        }
        _ => {}
    }
}

/// Defensive sweep: every `Loose` reference should already have been
/// patched by `close_definition` by the time a module is fully parsed. A
/// surviving `Loose` is a bug rather than a legitimate outcome, and is
/// surfaced as `UnknownReference` instead of panicking, per the "errors are
/// values" design.
fn assert_no_loose(module: &Module) -> Result<(), ParsingError> {
    for definition in &module.definitions {
        match definition {
            Definition::Structure(s) => {
                for field in &s.fields {
                    check_type(&field.type_)?;
                }
            }
            Definition::Union(UnionDefinition::Tagged(u)) => {
                for constructor in &u.constructors {
                    check_type(&constructor.parameter)?;
                }
            }
            Definition::Union(UnionDefinition::Embedded(_)) => {}
            Definition::Enumeration(_) => {}
            Definition::UntaggedUnion(u) => {
                for member in &u.members {
                    check_reference(member)?;
                }
            }
            Definition::Import(_) => {}
        }
    }
    Ok(())
}

fn check_type(ty: &Type) -> Result<(), ParsingError> {
    match ty {
        Type::Empty | Type::String(_) => Ok(()),
        Type::Reference(reference) => check_reference(reference),
        Type::Array { element, .. } | Type::Slice { element } => check_type(element),
        Type::Pointer { inner } | Type::Optional { inner } => check_type(inner),
    }
}

fn check_reference(reference: &TypeReference) -> Result<(), ParsingError> {
    match reference {
        TypeReference::Loose { name, .. } => Err(ParsingError::UnknownReference {
            name: name.clone(),
            location: tdc_common::SourceLocation::new(String::new(), 0, 0),
        }),
        TypeReference::AppliedName {
            reference: inner,
            open_name_arguments,
        } => {
            check_reference(inner)?;
            for arg in open_name_arguments {
                check_type(arg)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
