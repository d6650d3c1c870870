mod common;

use common::parse;
use tdc_parser::ParsingError;

#[test]
fn duplicate_definition_name_in_one_file_is_an_error() {
    // Scenario F.
    let source = concat!(
        "struct Recruiter {\n",
        "    name: String\n",
        "}\n",
        "struct Recruiter {\n",
        "    email: String\n",
        "}\n",
    );
    let err = parse(source).unwrap_err();
    match err {
        ParsingError::DuplicateDefinition { existing, definition, .. } => {
            assert_eq!(existing.binding_name(), "Recruiter");
            assert_eq!(definition.binding_name(), "Recruiter");
        }
        other => panic!("expected DuplicateDefinition, got {other:?}"),
    }
}

#[test]
fn duplicate_definition_across_different_kinds_is_still_an_error() {
    let source = concat!(
        "struct Status {\n",
        "    value: String\n",
        "}\n",
        "enum Status {\n",
        "    active = 1\n",
        "}\n",
    );
    let err = parse(source).unwrap_err();
    assert!(matches!(err, ParsingError::DuplicateDefinition { .. }));
}

#[test]
fn distinct_definition_names_do_not_collide() {
    let source = concat!(
        "struct One {\n",
        "    a: String\n",
        "}\n",
        "struct Two {\n",
        "    b: String\n",
        "}\n",
    );
    assert!(parse(source).is_ok());
}
