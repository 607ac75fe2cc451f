//! Lenient scalar accessors over property-list values.
//!
//! Documents written by different application versions store the same field
//! as a real, an integer, or a string. These helpers accept every form.

use plist::{Dictionary, Value};

/// Reads a number from a real, integer, or numeric string.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Real(v) => Some(*v),
        Value::Integer(v) => v
            .as_signed()
            .map(|v| v as f64)
            .or_else(|| v.as_unsigned().map(|v| v as f64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a boolean from a boolean, `"YES"`/`"NO"`, `"1"`/`"0"`, or a number.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "YES" | "yes" | "true" | "1" => Some(true),
            "NO" | "no" | "false" | "0" => Some(false),
            _ => None,
        },
        Value::Integer(_) | Value::Real(_) => number(value).map(|v| v != 0.0),
        _ => None,
    }
}

pub fn number_field(dict: &Dictionary, key: &str) -> Option<f64> {
    dict.get(key).and_then(number)
}

pub fn flag_field(dict: &Dictionary, key: &str) -> Option<bool> {
    dict.get(key).and_then(flag)
}

pub fn string_field<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(Value::as_string)
}

pub fn dict_field<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a Dictionary> {
    dict.get(key).and_then(Value::as_dictionary)
}

pub fn array_field<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a [Value]> {
    dict.get(key).and_then(Value::as_array).map(Vec::as_slice)
}
