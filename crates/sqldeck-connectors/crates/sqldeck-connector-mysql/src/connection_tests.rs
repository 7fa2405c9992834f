//! Unit tests for MySQL value decoding

use crate::connection::mysql_value_to_value;
use mysql_async::consts::ColumnType;
use sqldeck_core::Value;

#[test]
fn test_null_passthrough() {
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::NULL, ColumnType::MYSQL_TYPE_LONG),
        Value::Null
    );
}

#[test]
fn test_binary_protocol_scalars() {
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Int(-42), ColumnType::MYSQL_TYPE_LONG),
        Value::Int64(-42)
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Double(1.25), ColumnType::MYSQL_TYPE_DOUBLE),
        Value::Float64(1.25)
    );
}

#[test]
fn test_uint_beyond_i64_stays_textual() {
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::UInt(7), ColumnType::MYSQL_TYPE_LONGLONG),
        Value::Int64(7)
    );
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::UInt(u64::MAX),
            ColumnType::MYSQL_TYPE_LONGLONG
        ),
        Value::String(u64::MAX.to_string())
    );
}

#[test]
fn test_text_protocol_integer_decoding() {
    let val = mysql_async::Value::Bytes(b"12345".to_vec());
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_LONG),
        Value::Int64(12345)
    );
}

#[test]
fn test_text_protocol_decimal_keeps_precision() {
    let val = mysql_async::Value::Bytes(b"123.4500000000000001".to_vec());
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_NEWDECIMAL),
        Value::Decimal("123.4500000000000001".to_string())
    );
}

#[test]
fn test_text_protocol_json_decoding() {
    let val = mysql_async::Value::Bytes(br#"{"a": 1}"#.to_vec());
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_JSON),
        Value::Json(serde_json::json!({ "a": 1 }))
    );
}

#[test]
fn test_unparsable_text_falls_back_to_string() {
    let val = mysql_async::Value::Bytes(b"not a number".to_vec());
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_LONG),
        Value::String("not a number".to_string())
    );
}

#[test]
fn test_invalid_utf8_stays_binary() {
    let val = mysql_async::Value::Bytes(vec![0xff, 0xfe, 0x00]);
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_BLOB),
        Value::Bytes(vec![0xff, 0xfe, 0x00])
    );
}

#[test]
fn test_date_with_zero_time_is_a_date() {
    let val = mysql_async::Value::Date(2024, 2, 29, 0, 0, 0, 0);
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_DATE),
        Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
    );
}

#[test]
fn test_date_with_time_is_a_datetime() {
    let val = mysql_async::Value::Date(2024, 2, 29, 13, 30, 5, 0);
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_micro_opt(13, 30, 5, 0)
        .unwrap();
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_DATETIME),
        Value::DateTime(expected)
    );
}

#[test]
fn test_time_stays_textual() {
    // 2 days, 3 hours, negative direction
    let val = mysql_async::Value::Time(true, 2, 3, 4, 5, 6);
    assert_eq!(
        mysql_value_to_value(val, ColumnType::MYSQL_TYPE_TIME),
        Value::String("-51:04:05.000006".to_string())
    );
}
