mod common;

use common::parse_with_siblings;
use rustc_hash::FxHashMap;
use tdc_parser::ast::{Definition, TypeReference};
use tdc_parser::{parse_module, ParsingError};

#[test]
fn import_with_alias_and_cross_module_reference() {
    // Scenario D.
    let m1 = parse_module(
        "m1.tdef",
        "m1",
        "struct One {\n    field1: String\n}\n",
        &FxHashMap::default(),
    )
    .unwrap();

    let mut siblings = FxHashMap::default();
    siblings.insert("m1".to_string(), m1.clone());

    let m2_source = concat!(
        "import m1\n",
        "\n",
        "struct Two {\n",
        "    field1: m1.One\n",
        "}\n",
    );
    let m2 = parse_with_siblings("m2.tdef", "m2", m2_source, &siblings).unwrap();

    assert_eq!(m2.imports.get("m1"), Some(&"m1".to_string()));
    let Definition::Structure(two) = &m2.definitions[1] else {
        panic!("expected a Structure definition");
    };
    match &two.fields[0].type_ {
        tdc_parser::ast::Type::Reference(TypeReference::ImportedDefinition {
            import_name,
            definition,
        }) => {
            assert_eq!(import_name, "m1");
            assert_eq!(definition.name.value, "One");
            let m1_one = m1.find("One").unwrap().1;
            assert_eq!(m1_one.binding_name(), "One");
        }
        other => panic!("expected an ImportedDefinition, got {other:?}"),
    }
}

#[test]
fn import_with_explicit_alias() {
    let mut siblings = FxHashMap::default();
    siblings.insert(
        "models".to_string(),
        parse_module("models.tdef", "models", "struct One {\n    a: String\n}\n", &FxHashMap::default()).unwrap(),
    );

    let source = "import models = m\n";
    let module = parse_with_siblings("consumer.tdef", "consumer", source, &siblings).unwrap();
    assert_eq!(module.imports.get("m"), Some(&"models".to_string()));
}

#[test]
fn import_of_unknown_module_is_an_error() {
    let err = parse_module(
        "consumer.tdef",
        "consumer",
        "import ghost\n",
        &FxHashMap::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParsingError::UnknownModule { name, .. } if name == "ghost"));
}

#[test]
fn qualified_reference_to_unknown_alias_is_an_error() {
    let source = "struct Two {\n    field1: ghost.One\n}\n";
    let err = parse(source).unwrap_err();
    assert!(matches!(err, ParsingError::UnknownModule { name, .. } if name == "ghost"));
}

fn parse(source: &str) -> Result<tdc_parser::ast::Module, ParsingError> {
    parse_module("test.tdef", "test", source, &FxHashMap::default())
}

#[test]
fn qualified_reference_to_unknown_definition_is_an_error() {
    let mut siblings = FxHashMap::default();
    siblings.insert(
        "m1".to_string(),
        parse_module("m1.tdef", "m1", "struct One {\n    a: String\n}\n", &FxHashMap::default()).unwrap(),
    );
    let source = "import m1\n\nstruct Two {\n    field1: m1.Missing\n}\n";
    let err = parse_with_siblings("m2.tdef", "m2", source, &siblings).unwrap_err();
    assert!(matches!(err, ParsingError::UnknownReference { name, .. } if name == "Missing"));
}
