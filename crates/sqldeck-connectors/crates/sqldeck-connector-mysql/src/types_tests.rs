//! Unit tests for the MySQL type-code table

use crate::types::type_name;

#[test]
fn test_common_codes() {
    assert_eq!(type_name(0), "decimal");
    assert_eq!(type_name(3), "int");
    assert_eq!(type_name(8), "bigint");
    assert_eq!(type_name(12), "datetime");
    assert_eq!(type_name(15), "varchar");
    assert_eq!(type_name(16), "bit");
}

#[test]
fn test_json_and_var_string_codes() {
    assert_eq!(type_name(245), "json");
    assert_eq!(type_name(253), "var_string");
}

#[test]
fn test_newdate_is_treated_as_date() {
    assert_eq!(type_name(10), "date");
    assert_eq!(type_name(14), "date");
}

#[test]
fn test_blob_family() {
    assert_eq!(type_name(249), "tinyblob");
    assert_eq!(type_name(250), "mediumblob");
    assert_eq!(type_name(251), "longblob");
    assert_eq!(type_name(252), "blob");
}

#[test]
fn test_unmapped_codes_pass_through_as_text() {
    assert_eq!(type_name(17), "17");
    assert_eq!(type_name(200), "200");
    assert_eq!(type_name(244), "244");
}
