use crate::{codec::cursor::CursorDecodeError, value::{TypeTag, Value}};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Max serialized bytes for one decoded cursor payload, checked before the
/// CBOR decoder ever sees the bytes.
const MAX_CURSOR_PAYLOAD_BYTES: usize = 4 * 1024;

///
/// WireValue
///
/// The only shapes a cursor payload may decode into. This is the safety
/// boundary called out by §4.1(iii): because `serde_cbor` deserializes
/// directly into this closed, non-extensible enum, a hostile cursor cannot
/// reference a foreign type, instantiate executable state, or otherwise
/// decode into anything the process did not already know how to represent.
/// Temporal values are epoch integers here; calendar reconstruction happens
/// one layer up in [`wire_to_value`], parameterized by the caller's type tag.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
enum WireValue {
    Id(i64),
    Integer(i64),
    String(String),
    Boolean(bool),
    /// IEEE-754 bits, not the float itself: avoids NaN/signed-zero surprises
    /// surviving a CBOR round trip unexamined.
    Float(u64),
    EpochSeconds(i64),
    EpochMicros(i64),
    /// Days since the Unix epoch.
    EpochDays(i32),
    Binary(Vec<u8>),
    Null,
}

/// Encode a sequence of boundary values into one self-describing CBOR
/// payload, applying the temporal conversions from §4.1 (UTC datetimes
/// become epoch seconds/microseconds; all other tags pass through).
#[must_use]
pub fn encode_tuple(values: &[Value]) -> Vec<u8> {
    let wire: Vec<WireValue> = values.iter().map(value_to_wire).collect();
    serde_cbor::to_vec(&wire).expect("WireValue is always CBOR-serializable")
}

fn value_to_wire(value: &Value) -> WireValue {
    match value {
        Value::Id(v) => WireValue::Id(*v),
        Value::Integer(v) => WireValue::Integer(*v),
        Value::String(v) => WireValue::String(v.clone()),
        Value::Boolean(v) => WireValue::Boolean(*v),
        Value::Float(v) => WireValue::Float(v.to_bits()),
        Value::UtcDatetimeSeconds(v) => WireValue::EpochSeconds(v.timestamp()),
        Value::UtcDatetimeMicros(v) => WireValue::EpochMicros(v.timestamp_micros()),
        Value::NaiveDatetime(v) => WireValue::EpochMicros(v.and_utc().timestamp_micros()),
        Value::Date(v) => WireValue::EpochDays(days_since_epoch(*v)),
        Value::Binary(v) => WireValue::Binary(v.clone()),
        Value::Null => WireValue::Null,
    }
}

/// Decode a CBOR payload produced by [`encode_tuple`] back into typed
/// values, guided by the caller's type-tag vector (taken from
/// `Config.fields`).
///
/// # Errors
///
/// Returns [`CursorDecodeError::InvalidPayload`] if the bytes are not a
/// valid CBOR-encoded `Vec<WireValue>`, or if decoding panics (caught here
/// rather than propagated); [`CursorDecodeError::LengthMismatch`] if the
/// decoded tuple's length does not match `expected_tags.len()`.
pub fn decode_tuple(bytes: &[u8], expected_tags: &[TypeTag]) -> Result<Vec<Value>, CursorDecodeError> {
    if bytes.len() > MAX_CURSOR_PAYLOAD_BYTES {
        return Err(CursorDecodeError::InvalidPayload(format!(
            "payload exceeds maximum allowed size: {} bytes (limit {MAX_CURSOR_PAYLOAD_BYTES})",
            bytes.len()
        )));
    }

    let decoded = catch_unwind(AssertUnwindSafe(|| serde_cbor::from_slice::<Vec<WireValue>>(bytes)));

    let wire = match decoded {
        Ok(Ok(wire)) => wire,
        Ok(Err(err)) => return Err(CursorDecodeError::InvalidPayload(err.to_string())),
        Err(_) => {
            return Err(CursorDecodeError::InvalidPayload(
                "panic during cursor payload decode".to_string(),
            ));
        }
    };

    if wire.len() != expected_tags.len() {
        return Err(CursorDecodeError::LengthMismatch {
            expected: expected_tags.len(),
            actual: wire.len(),
        });
    }

    wire.into_iter()
        .zip(expected_tags.iter().copied())
        .map(|(w, tag)| wire_to_value(w, tag))
        .collect()
}

fn wire_to_value(wire: WireValue, tag: TypeTag) -> Result<Value, CursorDecodeError> {
    if matches!(wire, WireValue::Null) {
        return Ok(Value::Null);
    }

    match (wire, tag) {
        (WireValue::Id(v), TypeTag::Id) => Ok(Value::Id(v)),
        (WireValue::Integer(v), TypeTag::Integer) => Ok(Value::Integer(v)),
        (WireValue::String(v), TypeTag::String) => Ok(Value::String(v)),
        (WireValue::Boolean(v), TypeTag::Boolean) => Ok(Value::Boolean(v)),
        (WireValue::Float(bits), TypeTag::Float) => Ok(Value::Float(f64::from_bits(bits))),
        (WireValue::EpochSeconds(epoch), TypeTag::UtcDatetimeSeconds) => {
            Utc.timestamp_opt(epoch, 0)
                .single()
                .map(Value::UtcDatetimeSeconds)
                .ok_or_else(|| CursorDecodeError::InvalidPayload(format!("epoch seconds out of range: {epoch}")))
        }
        (WireValue::EpochMicros(epoch), TypeTag::UtcDatetimeMicros) => {
            DateTime::<Utc>::from_timestamp_micros(epoch)
                .map(Value::UtcDatetimeMicros)
                .ok_or_else(|| CursorDecodeError::InvalidPayload(format!("epoch micros out of range: {epoch}")))
        }
        (WireValue::EpochMicros(epoch), TypeTag::NaiveDatetime) => {
            DateTime::<Utc>::from_timestamp_micros(epoch)
                .map(|dt| Value::NaiveDatetime(dt.naive_utc()))
                .ok_or_else(|| CursorDecodeError::InvalidPayload(format!("epoch micros out of range: {epoch}")))
        }
        (WireValue::EpochDays(days), TypeTag::Date) => Ok(Value::Date(date_from_epoch(days))),
        (WireValue::Binary(v), TypeTag::Binary) => Ok(Value::Binary(v)),
        (wire, tag) => Err(CursorDecodeError::InvalidPayload(format!(
            "cursor value {wire:?} does not match expected type {tag}"
        ))),
    }
}

fn unix_epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("1970-01-01 is a valid calendar date")
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    i32::try_from(date.signed_duration_since(unix_epoch_date()).num_days())
        .expect("cursor dates stay within the i32 day range")
}

fn date_from_epoch(days: i32) -> NaiveDate {
    unix_epoch_date() + chrono::Duration::days(i64::from(days))
}
