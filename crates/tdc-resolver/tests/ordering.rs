use tdc_resolver::{resolve, BufferData};

#[test]
fn a_two_module_import_cycle_is_rejected() {
    let buffers = vec![
        BufferData::new(
            "a.tdef",
            concat!("import b\n", "\n", "struct One {\n", "    x: b.Two\n", "}\n"),
        ),
        BufferData::new(
            "b.tdef",
            concat!("import a\n", "\n", "struct Two {\n", "    y: a.One\n", "}\n"),
        ),
    ];
    let err = resolve(&buffers).unwrap_err();
    assert!(matches!(err, tdc_parser::ParsingError::UnknownModule { .. }));
}

#[test]
fn a_diamond_dependency_resolves_regardless_of_input_order() {
    let buffers = vec![
        BufferData::new(
            "top.tdef",
            concat!(
                "import left\n",
                "import right\n",
                "\n",
                "struct Top {\n",
                "    a: left.Left\n",
                "    b: right.Right\n",
                "}\n",
            ),
        ),
        BufferData::new("left.tdef", "struct Left {\n    x: String\n}\n"),
        BufferData::new("right.tdef", "struct Right {\n    y: String\n}\n"),
    ];
    let modules = resolve(&buffers).unwrap();
    assert_eq!(modules.len(), 3);
}
