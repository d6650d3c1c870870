//! The field-type parser and the name resolution rules of §4.3, applied
//! inline as each reference is encountered.
//!
//! Resolution order, tried in sequence for every bare (unqualified) name:
//! built-in, open name in scope, self-recursive (`Loose`), a definition
//! already accepted earlier in this module. A qualified name
//! (`alias.Name`) instead looks the alias up in this module's imports and
//! the target name up in that sibling module's definitions.

use tdc_common::SourceLocation;
use tdc_scanner::{Token, TokenKind};

use crate::ast::{
    Builtin, Definition, DefinitionName, DefinitionRef, Type, TypeReference, UnionDefinition,
};
use crate::error::ParsingError;

use super::Parser;

/// Number of type arguments a definition expects when applied
/// (`AppliedName`). Non-generic shapes (enum, untagged union, import) are
/// never applied and report zero.
fn definition_open_names_len(definition: &Definition) -> usize {
    match definition {
        Definition::Structure(s) => s.open_names.len(),
        Definition::Union(UnionDefinition::Tagged(u)) => u.open_names.len(),
        Definition::Union(UnionDefinition::Embedded(u)) => u.open_names.len(),
        Definition::Enumeration(_) | Definition::UntaggedUnion(_) | Definition::Import(_) => 0,
    }
}

impl<'a> Parser<'a> {
    /// Parse one `Type` occupying a field, constructor parameter, or
    /// generic-application argument position.
    pub(crate) fn parse_type(&mut self, depth: usize) -> Result<Type, ParsingError> {
        let location = self.cursor.peek_location()?;
        if depth > tdc_common::limits::MAX_TYPE_NESTING_DEPTH {
            return Err(ParsingError::LimitExceeded {
                what: "type nesting depth",
                location,
            });
        }

        match self.cursor.peek()?.cloned() {
            Some(Token::String(literal)) => {
                self.cursor.next()?;
                Ok(Type::String(literal))
            }
            Some(Token::Name(_)) => {
                let reference = self.parse_reference(depth + 1)?;
                Ok(Type::Reference(reference))
            }
            Some(Token::LeftBracket) => {
                self.cursor.next()?;
                match self.cursor.peek()?.cloned() {
                    Some(Token::RightBracket) => {
                        self.cursor.next()?;
                        let element = self.parse_type(depth + 1)?;
                        Ok(Type::Slice {
                            element: Box::new(element),
                        })
                    }
                    Some(Token::UnsignedInteger(size)) => {
                        self.cursor.next()?;
                        self.cursor.expect(TokenKind::RightBracket)?;
                        let element = self.parse_type(depth + 1)?;
                        Ok(Type::Array {
                            size,
                            element: Box::new(element),
                        })
                    }
                    _ => Err(self
                        .cursor
                        .expect_one_of(&[TokenKind::RightBracket, TokenKind::UnsignedInteger])
                        .unwrap_err()
                        .into()),
                }
            }
            // The inner type of a pointer or optional is not just a bare
            // `Ref` — it can itself be another prefixed type, as in
            // `recruiter: ?*Person` (an `Optional` wrapping a `Pointer`).
            // Recursing through `parse_type` rather than jumping straight to
            // `parse_reference` is what makes that composition parse.
            Some(Token::Asterisk) => {
                self.cursor.next()?;
                let inner = self.parse_type(depth + 1)?;
                Ok(Type::Pointer {
                    inner: Box::new(inner),
                })
            }
            Some(Token::QuestionMark) => {
                self.cursor.next()?;
                let inner = self.parse_type(depth + 1)?;
                Ok(Type::Optional {
                    inner: Box::new(inner),
                })
            }
            _ => Err(self
                .cursor
                .expect_one_of(&[
                    TokenKind::String,
                    TokenKind::Name,
                    TokenKind::LeftBracket,
                    TokenKind::Asterisk,
                    TokenKind::QuestionMark,
                ])
                .unwrap_err()
                .into()),
        }
    }

    /// Parse a `Ref` (`Name ('.' Name)? ('<' Type (',' Type)* '>')?`),
    /// resolving it to a concrete `TypeReference` and checking the applied
    /// argument count against the target's open-name arity.
    pub(crate) fn parse_reference(&mut self, depth: usize) -> Result<TypeReference, ParsingError> {
        let name_location = self.cursor.peek_location()?;
        let name = match self.cursor.expect(TokenKind::Name)? {
            Token::Name(s) => s,
            _ => unreachable!("expect(Name) only returns a Name token"),
        };

        let (mut reference, expected_arity) = if self.peek_is(TokenKind::Period) {
            self.cursor.next()?;
            let def_location = self.cursor.peek_location()?;
            let def_name = match self.cursor.expect(TokenKind::Name)? {
                Token::Name(s) => s,
                _ => unreachable!("expect(Name) only returns a Name token"),
            };
            self.resolve_qualified_name(&name, &name_location, &def_name, &def_location)?
        } else {
            self.resolve_bare_name(&name, &name_location)?
        };

        if self.peek_is(TokenKind::LeftAngle) {
            let arguments = self.parse_generic_arguments(depth)?;
            if arguments.len() != expected_arity {
                return Err(ParsingError::AppliedNameCount {
                    expected: expected_arity,
                    actual: arguments.len(),
                    location: name_location,
                });
            }
            reference = TypeReference::AppliedName {
                reference: Box::new(reference),
                open_name_arguments: arguments,
            };
        } else if expected_arity > 0 {
            return Err(ParsingError::AppliedNameCount {
                expected: expected_arity,
                actual: 0,
                location: name_location,
            });
        }

        Ok(reference)
    }

    fn parse_generic_arguments(&mut self, depth: usize) -> Result<Vec<Type>, ParsingError> {
        self.cursor.expect(TokenKind::LeftAngle)?;
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type(depth + 1)?);
            match self.cursor.peek()?.cloned() {
                Some(Token::Comma) => {
                    self.cursor.next()?;
                    self.cursor.expect(TokenKind::Space)?;
                }
                _ => break,
            }
        }
        self.cursor.expect(TokenKind::RightAngle)?;
        Ok(arguments)
    }

    /// Resolution order steps 1-4 and 6: built-in, open name, self-recursive
    /// `Loose`, a same-module definition already accepted, or unknown.
    /// Step 5 (qualified names) is handled separately by
    /// [`Self::resolve_qualified_name`], since it only applies once a `.`
    /// has been seen.
    fn resolve_bare_name(
        &self,
        name: &str,
        location: &SourceLocation,
    ) -> Result<(TypeReference, usize), ParsingError> {
        if let Some(builtin) = Builtin::from_name(name) {
            return Ok((TypeReference::Builtin(builtin), 0));
        }

        if let Some((self_name, open_names)) = &self.current_definition {
            if open_names.iter().any(|open_name| open_name == name) {
                return Ok((TypeReference::Open(name.to_string()), 0));
            }
            if self_name == name {
                return Ok((
                    TypeReference::Loose {
                        name: name.to_string(),
                        open_names: open_names.clone(),
                    },
                    open_names.len(),
                ));
            }
        }

        if let Some(&index) = self.index_by_name.get(name) {
            let definition = &self.definitions[index];
            let arity = definition_open_names_len(definition);
            let reference = TypeReference::Definition(DefinitionRef {
                index,
                name: DefinitionName {
                    value: name.to_string(),
                    location: definition.binding_location().clone(),
                },
            });
            return Ok((reference, arity));
        }

        tracing::debug!(name, %location, "name did not resolve to a builtin, open name, or local definition");
        Err(ParsingError::UnknownReference {
            name: name.to_string(),
            location: location.clone(),
        })
    }

    /// An `untagged union` value line is a bare `Name` with no
    /// qualification and no generic application (`UntaggedVal ::= Name`),
    /// so it only ever goes through the step 1-4/6 resolution order, and a
    /// generic target referenced without arguments is still an arity
    /// mismatch.
    pub(crate) fn resolve_untagged_value(
        &self,
        name: &str,
        location: &SourceLocation,
    ) -> Result<TypeReference, ParsingError> {
        let (reference, arity) = self.resolve_bare_name(name, location)?;
        if arity > 0 {
            return Err(ParsingError::AppliedNameCount {
                expected: arity,
                actual: 0,
                location: location.clone(),
            });
        }
        Ok(reference)
    }

    /// Resolution order step 5: look the alias up in this module's
    /// imports, then the name up in that sibling module's definitions.
    fn resolve_qualified_name(
        &self,
        alias: &str,
        alias_location: &SourceLocation,
        def_name: &str,
        def_name_location: &SourceLocation,
    ) -> Result<(TypeReference, usize), ParsingError> {
        let Some(module_name) = self.imports.get(alias) else {
            tracing::debug!(alias, %alias_location, "qualifier does not match a declared import alias");
            return Err(ParsingError::UnknownModule {
                name: alias.to_string(),
                location: alias_location.clone(),
            });
        };

        let Some(module) = self.siblings.get(module_name) else {
            tracing::debug!(module_name, "import alias names a module that was not resolved");
            return Err(ParsingError::UnknownModule {
                name: module_name.clone(),
                location: alias_location.clone(),
            });
        };

        match module.find(def_name) {
            Some((index, definition)) => {
                let arity = definition_open_names_len(definition);
                let reference = TypeReference::ImportedDefinition {
                    import_name: alias.to_string(),
                    definition: DefinitionRef {
                        index,
                        name: DefinitionName {
                            value: def_name.to_string(),
                            location: definition.binding_location().clone(),
                        },
                    },
                };
                Ok((reference, arity))
            }
            None => Err(ParsingError::UnknownReference {
                name: def_name.to_string(),
                location: def_name_location.clone(),
            }),
        }
    }
}
