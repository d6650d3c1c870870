mod common;

use common::parse;
use tdc_parser::ParsingError;

#[test]
fn applied_name_count_mismatch_is_an_error() {
    // Scenario E.
    let source = concat!(
        "union Either <L, R>{\n",
        "    Left: L\n",
        "    Right: R\n",
        "}\n",
        "struct Plain {\n",
        "    either: Either<String>\n",
        "}\n",
    );
    let err = parse(source).unwrap_err();
    match err {
        ParsingError::AppliedNameCount { expected, actual, .. } => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected AppliedNameCount, got {other:?}"),
    }
}

#[test]
fn applied_name_count_matches() {
    let source = concat!(
        "union Either <L, R>{\n",
        "    Left: L\n",
        "    Right: R\n",
        "}\n",
        "struct Plain {\n",
        "    either: Either<String, U8>\n",
        "}\n",
    );
    assert!(parse(source).is_ok());
}

#[test]
fn bare_reference_to_generic_definition_without_arguments_is_an_arity_error() {
    let source = concat!(
        "struct Box <T>{\n",
        "    value: T\n",
        "}\n",
        "struct Plain {\n",
        "    boxed: Box\n",
        "}\n",
    );
    let err = parse(source).unwrap_err();
    match err {
        ParsingError::AppliedNameCount { expected, actual, .. } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        other => panic!("expected AppliedNameCount, got {other:?}"),
    }
}

#[test]
fn applying_type_arguments_to_a_non_generic_definition_is_an_arity_error() {
    let source = concat!(
        "struct Plain {\n",
        "    value: String\n",
        "}\n",
        "struct Consumer {\n",
        "    value: Plain<String>\n",
        "}\n",
    );
    let err = parse(source).unwrap_err();
    match err {
        ParsingError::AppliedNameCount { expected, actual, .. } => {
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("expected AppliedNameCount, got {other:?}"),
    }
}
