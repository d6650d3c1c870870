//! Parsing for the five top-level declaration kinds: `struct`, `union`,
//! `enum`, `untagged union`, and `import`.

use tdc_common::limits::MAX_OPEN_NAMES;
use tdc_common::SourceLocation;
use tdc_scanner::{Token, TokenKind};

use crate::ast::{
    Constructor, Definition, DefinitionName, DefinitionRef, EmbeddedConstructor, EmbeddedUnion,
    EnumMember, EnumValue, Enumeration, Field, Import, Structure, Type, TypeReference, Union,
    UnionDefinition, UntaggedUnion,
};
use crate::error::ParsingError;

use super::Parser;

const DEFAULT_TAG_FIELD: &str = "type";

impl<'a> Parser<'a> {
    pub(crate) fn parse_struct(&mut self) -> Result<(), ParsingError> {
        self.cursor.next()?; // "struct"
        self.cursor.expect(TokenKind::Space)?;
        let (name, open_names) = self.parse_name_generics_open_brace()?;
        self.current_definition = Some((name.value.clone(), open_names.clone()));

        let mut fields = Vec::new();
        while !self.peek_is(TokenKind::RightBrace) {
            fields.push(self.parse_field()?);
        }
        self.cursor.expect(TokenKind::RightBrace)?;
        self.current_definition = None;

        self.close_definition(Definition::Structure(Structure {
            name,
            open_names,
            fields,
        }))
    }

    fn parse_field(&mut self) -> Result<Field, ParsingError> {
        self.cursor.skip_many(TokenKind::Space, 4)?;
        let name = match self.cursor.expect(TokenKind::Symbol)? {
            Token::Symbol(s) => s,
            _ => unreachable!("expect(Symbol) only returns a Symbol token"),
        };
        self.cursor.expect(TokenKind::Colon)?;
        self.cursor.expect(TokenKind::Space)?;
        let type_ = self.parse_type(0)?;
        self.cursor.expect(TokenKind::Newline)?;
        Ok(Field { name, type_ })
    }

    pub(crate) fn parse_union(&mut self) -> Result<(), ParsingError> {
        self.cursor.next()?; // "union"

        let mut tag_field = DEFAULT_TAG_FIELD.to_string();
        let mut embedded = false;
        if self.peek_is(TokenKind::LeftParen) {
            self.parse_union_options(&mut tag_field, &mut embedded)?;
        }
        self.cursor.expect(TokenKind::Space)?;

        let (name, open_names) = self.parse_name_generics_open_brace()?;
        self.current_definition = Some((name.value.clone(), open_names.clone()));

        let definition = if embedded {
            let mut constructors = Vec::new();
            while !self.peek_is(TokenKind::RightBrace) {
                constructors.push(self.parse_embedded_constructor()?);
            }
            self.cursor.expect(TokenKind::RightBrace)?;
            Definition::Union(UnionDefinition::Embedded(EmbeddedUnion {
                name,
                open_names,
                tag_field,
                constructors,
            }))
        } else {
            let mut constructors = Vec::new();
            while !self.peek_is(TokenKind::RightBrace) {
                constructors.push(self.parse_constructor()?);
            }
            self.cursor.expect(TokenKind::RightBrace)?;
            Definition::Union(UnionDefinition::Tagged(Union {
                name,
                open_names,
                tag_field,
                constructors,
            }))
        };
        self.current_definition = None;
        self.close_definition(definition)
    }

    /// `ExpectOption -> ExpectSeparatorOrClose -> ExpectOption | Done`.
    fn parse_union_options(
        &mut self,
        tag_field: &mut String,
        embedded: &mut bool,
    ) -> Result<(), ParsingError> {
        self.cursor.expect(TokenKind::LeftParen)?;
        loop {
            let option_location = self.cursor.peek_location()?;
            let option = match self.cursor.expect(TokenKind::Symbol)? {
                Token::Symbol(s) => s,
                _ => unreachable!("expect(Symbol) only returns a Symbol token"),
            };
            match option.as_str() {
                "tag" => {
                    self.cursor.expect(TokenKind::Space)?;
                    self.cursor.expect(TokenKind::Equals)?;
                    self.cursor.expect(TokenKind::Space)?;
                    let value = match self
                        .cursor
                        .expect_one_of(&[TokenKind::Symbol, TokenKind::Name])?
                    {
                        Token::Symbol(s) | Token::Name(s) => s,
                        _ => unreachable!("expect_one_of only returns a listed kind"),
                    };
                    *tag_field = value;
                }
                "embedded" => *embedded = true,
                other => {
                    return Err(ParsingError::Expect(tdc_scanner::ExpectError {
                        expected: vec![TokenKind::Symbol],
                        actual: Some(Token::Symbol(other.to_string())),
                        location: option_location,
                    }));
                }
            }
            match self.cursor.peek()?.cloned() {
                Some(Token::Comma) => {
                    self.cursor.next()?;
                    self.cursor.expect(TokenKind::Space)?;
                }
                Some(Token::RightParen) => {
                    self.cursor.next()?;
                    break;
                }
                _ => {
                    self.cursor
                        .expect_one_of(&[TokenKind::Comma, TokenKind::RightParen])?;
                }
            }
        }
        Ok(())
    }

    fn parse_constructor(&mut self) -> Result<Constructor, ParsingError> {
        self.cursor.skip_many(TokenKind::Space, 4)?;
        let tag = match self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?
        {
            Token::Name(s) | Token::Symbol(s) => s,
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };
        let parameter = if self.peek_is(TokenKind::Colon) {
            self.cursor.next()?;
            self.cursor.expect(TokenKind::Space)?;
            self.parse_type(0)?
        } else {
            Type::Empty
        };
        self.cursor.expect(TokenKind::Newline)?;
        Ok(Constructor { tag, parameter })
    }

    fn parse_embedded_constructor(&mut self) -> Result<EmbeddedConstructor, ParsingError> {
        self.cursor.skip_many(TokenKind::Space, 4)?;
        let location = self.cursor.peek_location()?;
        let tag = match self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?
        {
            Token::Name(s) | Token::Symbol(s) => s,
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };
        let parameter = if self.peek_is(TokenKind::Colon) {
            self.cursor.next()?;
            self.cursor.expect(TokenKind::Space)?;
            let type_ = self.parse_type(0)?;
            Some(self.require_plain_structure(&type_, &location)?)
        } else {
            None
        };
        self.cursor.expect(TokenKind::Newline)?;
        Ok(EmbeddedConstructor { tag, parameter })
    }

    /// Embedded-union validation (§4.3): the resolved form of a non-nullary
    /// constructor's parameter must be `Reference(Definition(D))` where `D`
    /// is a plain (non-generic) record. Anything else — a pointer, an
    /// optional, a generic structure, a union, a scalar — is
    /// `InvalidPayload`.
    fn require_plain_structure(
        &self,
        type_: &Type,
        location: &SourceLocation,
    ) -> Result<DefinitionRef, ParsingError> {
        if let Type::Reference(TypeReference::Definition(reference)) = type_ {
            if let Definition::Structure(structure) = &self.definitions[reference.index] {
                if structure.open_names.is_empty() {
                    return Ok(reference.clone());
                }
            }
        }
        Err(ParsingError::InvalidPayload {
            location: location.clone(),
        })
    }

    pub(crate) fn parse_enum(&mut self) -> Result<(), ParsingError> {
        self.cursor.next()?; // "enum"
        self.cursor.expect(TokenKind::Space)?;
        let name = self.parse_name_open_brace()?;

        let mut members = Vec::new();
        while !self.peek_is(TokenKind::RightBrace) {
            members.push(self.parse_enum_member()?);
        }
        if members.is_empty() {
            return Err(self.empty_body_error()?);
        }
        self.cursor.expect(TokenKind::RightBrace)?;

        self.close_definition(Definition::Enumeration(Enumeration { name, members }))
    }

    fn parse_enum_member(&mut self) -> Result<EnumMember, ParsingError> {
        self.cursor.skip_many(TokenKind::Space, 4)?;
        let tag = match self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?
        {
            Token::Name(s) | Token::Symbol(s) => s,
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };
        self.cursor.expect(TokenKind::Space)?;
        self.cursor.expect(TokenKind::Equals)?;
        self.cursor.expect(TokenKind::Space)?;
        let value = match self
            .cursor
            .expect_one_of(&[TokenKind::String, TokenKind::UnsignedInteger])?
        {
            Token::String(s) => EnumValue::String(s),
            Token::UnsignedInteger(n) => EnumValue::UnsignedInteger(n),
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };
        self.cursor.expect(TokenKind::Newline)?;
        Ok(EnumMember { tag, value })
    }

    pub(crate) fn parse_untagged_union(&mut self) -> Result<(), ParsingError> {
        self.cursor.next()?; // "untagged"
        self.cursor.expect(TokenKind::Space)?;
        let union_location = self.cursor.peek_location()?;
        match self.cursor.expect(TokenKind::Symbol)? {
            Token::Symbol(s) if s == "union" => {}
            actual => {
                return Err(ParsingError::Expect(tdc_scanner::ExpectError {
                    expected: vec![TokenKind::Symbol],
                    actual: Some(actual),
                    location: union_location,
                }));
            }
        }
        self.cursor.expect(TokenKind::Space)?;
        let name = self.parse_name_open_brace()?;

        let mut members = Vec::new();
        while !self.peek_is(TokenKind::RightBrace) {
            members.push(self.parse_untagged_value()?);
        }
        if members.is_empty() {
            return Err(self.empty_body_error()?);
        }
        self.cursor.expect(TokenKind::RightBrace)?;

        self.close_definition(Definition::UntaggedUnion(UntaggedUnion { name, members }))
    }

    fn parse_untagged_value(&mut self) -> Result<TypeReference, ParsingError> {
        self.cursor.skip_many(TokenKind::Space, 4)?;
        let location = self.cursor.peek_location()?;
        let name = match self.cursor.expect(TokenKind::Name)? {
            Token::Name(s) => s,
            _ => unreachable!("expect(Name) only returns a Name token"),
        };
        let reference = self.resolve_untagged_value(&name, &location)?;
        self.cursor.expect(TokenKind::Newline)?;
        Ok(reference)
    }

    pub(crate) fn parse_import(&mut self) -> Result<(), ParsingError> {
        self.cursor.next()?; // "import"
        self.cursor.expect(TokenKind::Space)?;
        let name_location = self.cursor.peek_location()?;
        let name = match self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?
        {
            Token::Name(s) | Token::Symbol(s) => s,
            _ => unreachable!("expect_one_of only returns a listed kind"),
        };

        let (alias, location) = if self.peek_is(TokenKind::Space) {
            self.cursor.next()?;
            self.cursor.expect(TokenKind::Equals)?;
            self.cursor.expect(TokenKind::Space)?;
            let alias_location = self.cursor.peek_location()?;
            let alias = match self
                .cursor
                .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?
            {
                Token::Name(s) | Token::Symbol(s) => s,
                _ => unreachable!("expect_one_of only returns a listed kind"),
            };
            (alias, alias_location)
        } else {
            (name.clone(), name_location.clone())
        };
        self.cursor.expect(TokenKind::Newline)?;

        if !self.siblings.contains_key(&name) {
            tracing::debug!(module = name, "import names a module that was not resolved");
            return Err(ParsingError::UnknownModule {
                name,
                location: name_location,
            });
        }

        self.close_definition(Definition::Import(Import {
            name,
            alias,
            location,
        }))
    }

    /// `NAME SPACE (Generics)? '{' Newline`, shared by `struct` and
    /// `union`. The single space after `NAME` is required whether or not
    /// generics follow; when they do, `'{'` follows the closing `'>'`
    /// immediately with no space of its own.
    fn parse_name_generics_open_brace(
        &mut self,
    ) -> Result<(DefinitionName, Vec<String>), ParsingError> {
        let location = self.cursor.peek_location()?;
        let value = match self.cursor.expect(TokenKind::Name)? {
            Token::Name(s) => s,
            _ => unreachable!("expect(Name) only returns a Name token"),
        };
        let name = DefinitionName { value, location };
        self.cursor.expect(TokenKind::Space)?;

        let open_names = if self.peek_is(TokenKind::LeftAngle) {
            self.parse_generics()?
        } else {
            Vec::new()
        };

        self.cursor.expect(TokenKind::LeftBrace)?;
        self.cursor.expect(TokenKind::Newline)?;
        Ok((name, open_names))
    }

    /// `NAME SPACE '{' Newline`, used by `enum` and `untagged union`,
    /// neither of which accepts a `Generics` clause.
    fn parse_name_open_brace(&mut self) -> Result<DefinitionName, ParsingError> {
        let location = self.cursor.peek_location()?;
        let value = match self.cursor.expect(TokenKind::Name)? {
            Token::Name(s) => s,
            _ => unreachable!("expect(Name) only returns a Name token"),
        };
        self.cursor.expect(TokenKind::LeftBrace)?;
        self.cursor.expect(TokenKind::Newline)?;
        Ok(DefinitionName { value, location })
    }

    fn parse_generics(&mut self) -> Result<Vec<String>, ParsingError> {
        self.cursor.expect(TokenKind::LeftAngle)?;
        let mut names = Vec::new();
        loop {
            let location = self.cursor.peek_location()?;
            let name = match self.cursor.expect(TokenKind::Name)? {
                Token::Name(s) => s,
                _ => unreachable!("expect(Name) only returns a Name token"),
            };
            names.push(name);
            if names.len() > MAX_OPEN_NAMES {
                return Err(ParsingError::LimitExceeded {
                    what: "open name count",
                    location,
                });
            }
            match self.cursor.peek()?.cloned() {
                Some(Token::Comma) => {
                    self.cursor.next()?;
                    self.cursor.expect(TokenKind::Space)?;
                }
                _ => break,
            }
        }
        self.cursor.expect(TokenKind::RightAngle)?;
        Ok(names)
    }

    /// A body with zero required members (`enum`, `untagged union`) ran
    /// straight to `RightBrace` without accepting a single field. Reuses
    /// `ExpectError` against the shape the loop wanted next, rather than
    /// introducing a dedicated error variant for what the grammar already
    /// expresses as "at least one field".
    fn empty_body_error(&mut self) -> Result<ParsingError, ParsingError> {
        Ok(self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])
            .unwrap_err()
            .into())
    }
}
