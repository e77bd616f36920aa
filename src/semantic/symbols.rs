//! Synthesized symbol names.
//!
//! Enumerations compile to tagged records, so the lowering refers to
//! fields and constants that never appear in source code. The exact
//! spellings here are shared with code generation and must not change.

/// The tag field of an enumeration value.
pub const ENUM_TAG_VARIABLE_NAME: &str = "__tag";

/// The length of the match subject array, declared once per array
/// pattern case.
pub const MATCH_SUBJECT_LENGTH_NAME: &str = "__match_subject_length";

/// The array length member used to initialize the subject length
/// variable.
pub const ARRAY_LENGTH_METHOD_NAME: &str = "length";

pub const BOOL_TRUE_CASE_NAME: &str = "true";
pub const BOOL_FALSE_CASE_NAME: &str = "false";

/// The data field holding an enum variant's payload.
pub fn make_enum_variant_data_name(variant_name: &str) -> String {
    format!("__{}_data", variant_name)
}

/// The constant holding an enum variant's tag value.
pub fn make_enum_variant_tag_name(variant_name: &str) -> String {
    format!("__{}_tag", variant_name)
}

/// The nested class holding an enum variant's payload members.
pub fn make_enum_variant_class_name(variant_name: &str) -> String {
    format!("__{}_class", variant_name)
}
