//! The recursive AST produced by the parser and finished by the resolver.
//!
//! Recursive positions of `Type` are boxed, never ref-counted: a `Type` tree
//! is owned by exactly one `Definition`. References between definitions are
//! by value of a lightweight handle (`DefinitionRef`, an index into the
//! owning module's `definitions` vector plus a clone of the name) rather than
//! a back-pointer, so the AST never needs `Rc`/`RefCell` to avoid cycles.

use indexmap::IndexMap;
use tdc_common::SourceLocation;

/// A top-level identifier together with the location of the identifier
/// token itself (not the keyword that introduced it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionName {
    pub value: String,
    pub location: SourceLocation,
}

/// The fixed scalar types the schema language recognizes without a
/// definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    String,
    Boolean,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
}

impl Builtin {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Builtin> {
        Some(match name {
            "String" => Builtin::String,
            "Boolean" => Builtin::Boolean,
            "U8" => Builtin::U8,
            "U16" => Builtin::U16,
            "U32" => Builtin::U32,
            "U64" => Builtin::U64,
            "U128" => Builtin::U128,
            "I8" => Builtin::I8,
            "I16" => Builtin::I16,
            "I32" => Builtin::I32,
            "I64" => Builtin::I64,
            "I128" => Builtin::I128,
            "F32" => Builtin::F32,
            "F64" => Builtin::F64,
            _ => return None,
        })
    }
}

/// A handle to a definition by position in its owning module's `definitions`
/// vector, carrying a clone of the name for display purposes. Two
/// `DefinitionRef`s are equal iff they name the same definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionRef {
    pub index: usize,
    pub name: DefinitionName,
}

/// A resolved or (transiently, during parsing) unresolved reference to a
/// named type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeReference {
    Builtin(Builtin),
    Open(String),
    Definition(DefinitionRef),
    ImportedDefinition {
        import_name: String,
        definition: DefinitionRef,
    },
    AppliedName {
        reference: Box<TypeReference>,
        open_name_arguments: Vec<Type>,
    },
    /// An unresolved placeholder for a self-recursive reference to the
    /// definition currently being parsed. Patched to `Definition` (or
    /// `AppliedName` wrapping one) as soon as the enclosing definition
    /// closes. A `Loose` surviving past that point is a bug, surfaced to
    /// callers as `ParsingError::UnknownReference` rather than silently
    /// leaking an internal-only variant.
    Loose {
        name: String,
        open_names: Vec<String>,
    },
}

/// A field or constructor payload type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Nullary payload marker for sum-type constructors without arguments.
    Empty,
    /// A field typed as the exact string literal (used for discriminator tags).
    String(String),
    Reference(TypeReference),
    Array { size: u64, element: Box<Type> },
    Slice { element: Box<Type> },
    Pointer { inner: Box<Type> },
    Optional { inner: Box<Type> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_: Type,
}

/// A tagged-union constructor. `parameter` is `Type::Empty` for nullary
/// constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub tag: String,
    pub parameter: Type,
}

/// A constructor of an embedded union. Unlike `Constructor`, the parameter
/// (when present) must resolve to a plain record, so it is stored already
/// unwrapped to that shape rather than as a general `Type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedConstructor {
    pub tag: String,
    pub parameter: Option<DefinitionRef>,
}

/// A record type. `open_names` empty means the plain variant; non-empty
/// means generic. Modeling both shapes as one struct (rather than a
/// `Plain`/`Generic` enum) keeps field access uniform for code that doesn't
/// care about arity, while `is_generic` answers the question when it does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    pub name: DefinitionName,
    pub open_names: Vec<String>,
    pub fields: Vec<Field>,
}

impl Structure {
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.open_names.is_empty()
    }
}

/// A tagged sum (non-embedded). `tag_field` defaults to `"type"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Union {
    pub name: DefinitionName,
    pub open_names: Vec<String>,
    pub tag_field: String,
    pub constructors: Vec<Constructor>,
}

impl Union {
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.open_names.is_empty()
    }
}

/// A tagged sum whose discriminator is inlined into the payload record at
/// codegen time instead of appearing as a wrapper object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedUnion {
    pub name: DefinitionName,
    pub open_names: Vec<String>,
    pub tag_field: String,
    pub constructors: Vec<EmbeddedConstructor>,
}

/// The union kinds a `union` declaration can parse to, distinguished by the
/// `embedded` option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnionDefinition {
    Tagged(Union),
    Embedded(EmbeddedUnion),
}

impl UnionDefinition {
    #[must_use]
    pub fn name(&self) -> &DefinitionName {
        match self {
            UnionDefinition::Tagged(u) => &u.name,
            UnionDefinition::Embedded(u) => &u.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumValue {
    String(String),
    UnsignedInteger(u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    pub tag: String,
    pub value: EnumValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    pub name: DefinitionName,
    pub members: Vec<EnumMember>,
}

/// A sum over existing named types with no discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UntaggedUnion {
    pub name: DefinitionName,
    pub members: Vec<TypeReference>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub name: String,
    pub alias: String,
    pub location: SourceLocation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Structure(Structure),
    Union(UnionDefinition),
    Enumeration(Enumeration),
    UntaggedUnion(UntaggedUnion),
    Import(Import),
}

impl Definition {
    /// The name this definition occupies the module's namespace under, for
    /// duplicate-name detection and local lookup. For `Import`, that is the
    /// alias it binds (the name `Name.Field`-style qualification uses), not
    /// the imported module's own name.
    #[must_use]
    pub fn binding_name(&self) -> &str {
        match self {
            Definition::Structure(s) => &s.name.value,
            Definition::Union(u) => &u.name().value,
            Definition::Enumeration(e) => &e.name.value,
            Definition::UntaggedUnion(u) => &u.name.value,
            Definition::Import(i) => &i.alias,
        }
    }

    /// The location used to report a `DuplicateDefinition` against this
    /// definition: the identifier token's position.
    #[must_use]
    pub fn binding_location(&self) -> &SourceLocation {
        match self {
            Definition::Structure(s) => &s.name.location,
            Definition::Union(u) => &u.name().location,
            Definition::Enumeration(e) => &e.name.location,
            Definition::UntaggedUnion(u) => &u.name.location,
            Definition::Import(i) => &i.location,
        }
    }
}

/// The resolved contents of one source file, keyed by its basename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub filename: String,
    /// Declared imports, in source order: alias -> imported module name.
    pub imports: IndexMap<String, String>,
    /// Definitions in source order; downstream codegen emits in this order.
    pub definitions: Vec<Definition>,
}

impl Module {
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(usize, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .find(|(_, d)| d.binding_name() == name)
    }
}
