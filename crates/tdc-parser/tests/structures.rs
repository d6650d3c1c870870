mod common;

use common::parse;
use tdc_parser::ast::{Builtin, Definition, Field, Type, TypeReference};

#[test]
fn plain_structure_with_mixed_type_shapes() {
    // Scenario A.
    let source = concat!(
        "struct Person {\n",
        "    type: \"Person\"\n",
        "    name: String\n",
        "    age: U8\n",
        "    hobbies: []String\n",
        "    last_fifteen_comments: [15]String\n",
        "    recruiter: ?*Person\n",
        "}\n",
    );
    let module = parse(source).expect("valid structure should parse");
    assert_eq!(module.definitions.len(), 1);

    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected a Structure definition");
    };
    assert_eq!(structure.name.value, "Person");
    assert!(!structure.is_generic());
    assert_eq!(structure.fields.len(), 6);

    assert_eq!(
        structure.fields[0],
        Field {
            name: "type".into(),
            type_: Type::String("Person".into()),
        }
    );
    assert_eq!(
        structure.fields[1],
        Field {
            name: "name".into(),
            type_: Type::Reference(TypeReference::Builtin(Builtin::String)),
        }
    );
    assert_eq!(
        structure.fields[2],
        Field {
            name: "age".into(),
            type_: Type::Reference(TypeReference::Builtin(Builtin::U8)),
        }
    );
    assert_eq!(
        structure.fields[3],
        Field {
            name: "hobbies".into(),
            type_: Type::Slice {
                element: Box::new(Type::Reference(TypeReference::Builtin(Builtin::String))),
            },
        }
    );
    assert_eq!(
        structure.fields[4],
        Field {
            name: "last_fifteen_comments".into(),
            type_: Type::Array {
                size: 15,
                element: Box::new(Type::Reference(TypeReference::Builtin(Builtin::String))),
            },
        }
    );

    let recruiter_type = &structure.fields[5].type_;
    match recruiter_type {
        Type::Optional { inner } => match inner.as_ref() {
            Type::Pointer { inner } => match inner.as_ref() {
                Type::Reference(TypeReference::Definition(reference)) => {
                    assert_eq!(reference.name.value, "Person");
                }
                other => panic!("expected a Definition reference, got {other:?}"),
            },
            other => panic!("expected a Pointer, got {other:?}"),
        },
        other => panic!("expected an Optional, got {other:?}"),
    }
}

#[test]
fn location_points_at_identifier_not_keyword() {
    let source = "struct Person {\n    name: String\n}\n";
    let module = parse(source).unwrap();
    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected Structure");
    };
    assert_eq!(structure.name.location.line, 1);
    assert_eq!(structure.name.location.column, 8); // 'P' in "Person"
}

#[test]
fn empty_structure_body_is_allowed() {
    let module = parse("struct Empty {\n}\n").unwrap();
    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected Structure");
    };
    assert!(structure.fields.is_empty());
}

#[test]
fn array_of_size_zero_parses() {
    let module = parse("struct Zero {\n    items: [0]String\n}\n").unwrap();
    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected Structure");
    };
    assert_eq!(
        structure.fields[0].type_,
        Type::Array {
            size: 0,
            element: Box::new(Type::Reference(TypeReference::Builtin(Builtin::String))),
        }
    );
}

#[test]
fn generic_structure_exposes_open_names() {
    let source = "struct Box <T>{\n    value: T\n}\n";
    let module = parse(source).unwrap();
    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected Structure");
    };
    assert!(structure.is_generic());
    assert_eq!(structure.open_names, vec!["T".to_string()]);
    assert_eq!(
        structure.fields[0].type_,
        Type::Reference(TypeReference::Open("T".into()))
    );
}

#[test]
fn generic_structure_with_multiple_open_names() {
    let source = "struct Pair <L, R>{\n    left: L\n    right: R\n}\n";
    let module = parse(source).unwrap();
    let Definition::Structure(structure) = &module.definitions[0] else {
        panic!("expected Structure");
    };
    assert_eq!(structure.open_names, vec!["L".to_string(), "R".to_string()]);
}

#[test]
fn deviant_indentation_is_a_parse_error() {
    let source = "struct Bad {\n  name: String\n}\n";
    assert!(parse(source).is_err());
}

#[test]
fn trailing_semicolon_on_field_line_is_rejected() {
    let source = "struct Bad {\n    name: String;\n}\n";
    assert!(parse(source).is_err());
}

#[test]
fn struct_referencing_earlier_definition() {
    let source = concat!(
        "struct Inner {\n",
        "    value: String\n",
        "}\n",
        "struct Outer {\n",
        "    inner: Inner\n",
        "}\n",
    );
    let module = parse(source).unwrap();
    assert_eq!(module.definitions.len(), 2);
    let Definition::Structure(outer) = &module.definitions[1] else {
        panic!("expected Structure");
    };
    match &outer.fields[0].type_ {
        Type::Reference(TypeReference::Definition(reference)) => {
            assert_eq!(reference.name.value, "Inner");
            assert_eq!(reference.index, 0);
        }
        other => panic!("expected a Definition reference, got {other:?}"),
    }
}
