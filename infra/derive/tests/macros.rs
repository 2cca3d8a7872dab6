#[test]
fn modkit_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/modkit_error_pass.rs");
    t.pass("tests/ui/modkit_error_extra_fields.rs");
    t.compile_fail("tests/ui/modkit_error_tuple_variant.rs");
    t.compile_fail("tests/ui/modkit_error_bad_context_type.rs");
    t.compile_fail("tests/ui/modkit_error_no_context.rs");
}

#[test]
fn feature_definition_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/feature_definition_pass.rs");
    t.compile_fail("tests/ui/feature_definition_missing_side.rs");
    t.compile_fail("tests/ui/feature_definition_bad_side.rs");
    t.compile_fail("tests/ui/feature_definition_unknown_argument.rs");
}
