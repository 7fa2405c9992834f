//! Unit tests for the MS SQL Server value normalization

use crate::connection::{column_data_to_value, time_from_increments};
use sqldeck_core::Value;
use std::borrow::Cow;
use tiberius::ColumnData;

#[test]
fn test_null_variants_map_to_null() {
    assert_eq!(column_data_to_value(ColumnData::Bit(None)), Value::Null);
    assert_eq!(column_data_to_value(ColumnData::I32(None)), Value::Null);
    assert_eq!(column_data_to_value(ColumnData::String(None)), Value::Null);
    assert_eq!(column_data_to_value(ColumnData::Binary(None)), Value::Null);
}

#[test]
fn test_scalar_conversions() {
    assert_eq!(
        column_data_to_value(ColumnData::Bit(Some(true))),
        Value::Bool(true)
    );
    assert_eq!(
        column_data_to_value(ColumnData::U8(Some(255))),
        Value::Int32(255)
    );
    assert_eq!(
        column_data_to_value(ColumnData::I16(Some(-7))),
        Value::Int16(-7)
    );
    assert_eq!(
        column_data_to_value(ColumnData::I32(Some(42))),
        Value::Int32(42)
    );
    assert_eq!(
        column_data_to_value(ColumnData::I64(Some(1 << 40))),
        Value::Int64(1 << 40)
    );
    assert_eq!(
        column_data_to_value(ColumnData::F64(Some(2.5))),
        Value::Float64(2.5)
    );
}

#[test]
fn test_string_and_binary_conversions() {
    assert_eq!(
        column_data_to_value(ColumnData::String(Some(Cow::Borrowed("hello")))),
        Value::String("hello".to_string())
    );
    assert_eq!(
        column_data_to_value(ColumnData::Binary(Some(Cow::Borrowed(&[1u8, 2, 3][..])))),
        Value::Bytes(vec![1, 2, 3])
    );
}

#[test]
fn test_guid_conversion() {
    let id = uuid::Uuid::parse_str("12345678-1234-1234-1234-123456789abc").unwrap();
    assert_eq!(
        column_data_to_value(ColumnData::Guid(Some(id))),
        Value::Uuid(id)
    );
}

#[test]
fn test_time_from_increments_scale_seven() {
    // One second of 100ns ticks
    assert_eq!(
        time_from_increments(10_000_000),
        chrono::NaiveTime::from_hms_opt(0, 0, 1).unwrap()
    );
    // Midday plus half a second
    let t = time_from_increments(12 * 3600 * 10_000_000 + 5_000_000);
    assert_eq!(
        t,
        chrono::NaiveTime::from_hms_nano_opt(12, 0, 0, 500_000_000).unwrap()
    );
}
