// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Write targets for row scanning
//!
//! A [`ScanTarget`] is one addressable slot in a record. Cursors write each
//! column of the current row into the matching slot, positionally. Every type
//! implementing [`FromValue`] is a target, so a record exposes its fields
//! directly as `&mut dyn ScanTarget`.

use crate::error::{ConversionError, Result, ScanError};
use crate::value::Value;
use chrono::{DateTime, Utc};

/// Addressable slot a single column value is written into
pub trait ScanTarget {
    /// Overwrite the slot with `value`, converting as needed
    fn assign(&mut self, value: &Value) -> std::result::Result<(), ConversionError>;
}

/// Conversion from a column value into a host type
pub trait FromValue: Sized {
    /// Name used in conversion errors
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError>;
}

impl<T: FromValue> ScanTarget for T {
    fn assign(&mut self, value: &Value) -> std::result::Result<(), ConversionError> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// Scan one row into `targets`, positionally
///
/// The row width must equal the number of targets. Columns are assigned in
/// order and the first failing column stops the scan; earlier targets keep
/// the values already written.
///
/// This is the building block for [`crate::RowCursor::scan_into`]
/// implementations.
pub fn scan_row(row: &[Value], targets: &mut [&mut dyn ScanTarget]) -> Result<()> {
    if row.len() != targets.len() {
        return Err(ScanError::ArityMismatch {
            expected: targets.len(),
            actual: row.len(),
        }
        .into());
    }

    for (column, (value, target)) in row.iter().zip(targets.iter_mut()).enumerate() {
        target
            .assign(value)
            .map_err(|source| ScanError::Conversion { column, source })?;
    }

    Ok(())
}

fn mismatch<T: FromValue>(value: &Value) -> ConversionError {
    ConversionError::mismatch(T::TYPE_NAME, value.type_name())
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "Value";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value.as_boolean().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value.as_integer().ok_or_else(|| mismatch::<Self>(value))
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),+) => {
        $(
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
                    let wide = value.as_integer().ok_or_else(|| mismatch::<Self>(value))?;
                    <$ty>::try_from(wide).map_err(|_| {
                        ConversionError::out_of_range(
                            Self::TYPE_NAME,
                            value.type_name(),
                            format!("{} out of range", wide),
                        )
                    })
                }
            }
        )+
    };
}

narrow_integer!(i16, i32, u32, u64);

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value.as_number().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        let wide = value.as_number().ok_or_else(|| mismatch::<Self>(value))?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(ConversionError::out_of_range(
                Self::TYPE_NAME,
                value.type_name(),
                format!("{} out of range", wide),
            ));
        }
        Ok(narrow)
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value
            .as_string()
            .map(str::to_string)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for Vec<u8> {
    const TYPE_NAME: &'static str = "Vec<u8>";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value
            .as_bytes()
            .or_else(|| value.as_string().map(str::as_bytes))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        if let Some(dt) = value.as_datetime() {
            return Ok(*dt);
        }
        let text = value.as_string().ok_or_else(|| mismatch::<Self>(value))?;
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ConversionError::out_of_range(Self::TYPE_NAME, "String", e.to_string()))
    }
}

impl FromValue for Vec<Value> {
    const TYPE_NAME: &'static str = "Vec<Value>";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        value
            .as_array()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for serde_json::Value {
    const TYPE_NAME: &'static str = "serde_json::Value";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        Ok(value_to_json(value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const TYPE_NAME: &'static str = "Option";

    fn from_value(value: &Value) -> std::result::Result<Self, ConversionError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Convert a Value to a serde_json Value
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::json!(i),
        Value::Number(n) => serde_json::json!(n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(bytes) => {
            serde_json::Value::Array(bytes.iter().map(|b| serde_json::json!(b)).collect())
        }
        Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
    }
}
