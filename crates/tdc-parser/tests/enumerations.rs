mod common;

use common::parse;
use tdc_parser::ast::{Definition, EnumValue};

#[test]
fn enumeration_with_string_and_integer_members() {
    let source = concat!(
        "enum Status {\n",
        "    active = \"active\"\n",
        "    retired = 0\n",
        "}\n",
    );
    let module = parse(source).unwrap();
    let Definition::Enumeration(enumeration) = &module.definitions[0] else {
        panic!("expected an Enumeration definition");
    };
    assert_eq!(enumeration.name.value, "Status");
    assert_eq!(enumeration.members.len(), 2);
    assert_eq!(enumeration.members[0].tag, "active");
    assert_eq!(enumeration.members[0].value, EnumValue::String("active".into()));
    assert_eq!(enumeration.members[1].tag, "retired");
    assert_eq!(enumeration.members[1].value, EnumValue::UnsignedInteger(0));
}

#[test]
fn enumeration_tag_may_be_a_capitalized_name() {
    let source = concat!("enum Status {\n", "    Active = 1\n", "}\n",);
    let module = parse(source).unwrap();
    let Definition::Enumeration(enumeration) = &module.definitions[0] else {
        panic!("expected an Enumeration definition");
    };
    assert_eq!(enumeration.members[0].tag, "Active");
}

#[test]
fn enumeration_with_zero_members_is_rejected() {
    let source = "enum Status {\n}\n";
    assert!(parse(source).is_err());
}
