use tdc_resolver::{resolve, BufferData};

#[test]
fn two_files_with_the_same_derived_module_name_collide() {
    let buffers = vec![
        BufferData::new("shared.tdef", "struct One {\n    a: String\n}\n"),
        BufferData::new("nested/shared.tdef", "struct Two {\n    b: String\n}\n"),
    ];
    let err = resolve(&buffers).unwrap_err();
    assert!(matches!(err, tdc_parser::ParsingError::DuplicateModule { name } if name == "shared"));
}

#[test]
fn module_name_strips_only_the_trailing_extension() {
    let buffers = vec![
        BufferData::new("models.v1.tdef", "struct One {\n    a: String\n}\n"),
    ];
    let modules = resolve(&buffers).unwrap();
    assert!(modules.contains_key("models.v1"));
}

#[test]
fn distinct_filenames_with_distinct_stems_do_not_collide() {
    let buffers = vec![
        BufferData::new("a.tdef", "struct One {\n    x: String\n}\n"),
        BufferData::new("b.tdef", "struct Two {\n    y: String\n}\n"),
    ];
    assert!(resolve(&buffers).is_ok());
}
