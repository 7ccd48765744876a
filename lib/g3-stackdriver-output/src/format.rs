/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use rmpv::Value;
use thiserror::Error;

/// fluentd EventTime extension type
const EVENT_TIME_EXT_TYPE: i8 = 0;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid msgpack data: {0}")]
    InvalidData(#[from] rmpv::decode::Error),
    #[error("invalid entry: {0}")]
    InvalidEntry(&'static str),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("msgpack write failed: {0}")]
    WriteFailed(#[from] rmp::encode::ValueWriteError),
    #[error("invalid record value: {0}")]
    InvalidValue(rmpv::encode::Error),
    #[error("too many record fields: {0}")]
    TooManyFields(usize),
}

/// One buffered `(tag, time, record)` event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventEntry {
    pub tag: String,
    /// unix timestamp in seconds
    pub time: i64,
    pub record: Vec<(Value, Value)>,
}

impl EventEntry {
    pub fn new(tag: &str, time: i64, record: Vec<(Value, Value)>) -> Self {
        EventEntry {
            tag: tag.to_string(),
            time,
            record,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    fn from_value(v: Value) -> Result<Self, DecodeError> {
        let Value::Array(fields) = v else {
            return Err(DecodeError::InvalidEntry("entry is not an array"));
        };
        let Ok([tag, time, record]) = <[Value; 3]>::try_from(fields) else {
            return Err(DecodeError::InvalidEntry("entry should have 3 fields"));
        };

        let Value::String(tag) = tag else {
            return Err(DecodeError::InvalidEntry("tag is not a string"));
        };
        let tag = tag
            .into_str()
            .ok_or(DecodeError::InvalidEntry("tag is not valid utf-8"))?;
        let time = decode_time(&time)?;
        let Value::Map(record) = record else {
            return Err(DecodeError::InvalidEntry("record is not a map"));
        };

        Ok(EventEntry { tag, time, record })
    }
}

fn decode_time(v: &Value) -> Result<i64, DecodeError> {
    match v {
        Value::Integer(i) => i
            .as_i64()
            .ok_or(DecodeError::InvalidEntry("time out of range")),
        Value::Ext(EVENT_TIME_EXT_TYPE, data) => {
            // 32bit seconds + 32bit nanoseconds, both big endian
            let [s0, s1, s2, s3, _, _, _, _] = data.as_slice() else {
                return Err(DecodeError::InvalidEntry("invalid event time"));
            };
            Ok(i64::from(u32::from_be_bytes([*s0, *s1, *s2, *s3])))
        }
        _ => Err(DecodeError::InvalidEntry("invalid time type")),
    }
}

/// Encode one event the way it is stored in the buffer.
pub fn format_entry(
    tag: &str,
    time: i64,
    record: &[(Value, Value)],
) -> Result<Vec<u8>, EncodeError> {
    let map_len =
        u32::try_from(record.len()).map_err(|_| EncodeError::TooManyFields(record.len()))?;

    let mut buf = Vec::with_capacity(64);
    rmp::encode::write_array_len(&mut buf, 3)?;
    rmp::encode::write_str(&mut buf, tag)?;
    rmp::encode::write_sint(&mut buf, time)?;
    rmp::encode::write_map_len(&mut buf, map_len)?;
    for (k, v) in record {
        rmpv::encode::write_value(&mut buf, k).map_err(EncodeError::InvalidValue)?;
        rmpv::encode::write_value(&mut buf, v).map_err(EncodeError::InvalidValue)?;
    }
    Ok(buf)
}

/// Decode a buffered chunk of concatenated events.
pub fn decode_chunk(mut data: &[u8]) -> Result<Vec<EventEntry>, DecodeError> {
    let mut entries = Vec::new();
    while !data.is_empty() {
        let v = rmpv::decode::read_value(&mut data)?;
        entries.push(EventEntry::from_value(v)?);
    }
    Ok(entries)
}
