// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact JSON rendering of one data set of a decoded message.
//!
//! Output format:
//! ```text
//! {"AgentID":"<id>","Header":{"Version":10,"Length":..,"ExportTime":..,"SequenceNo":..,"DomainID":..},"Data":{"<ent>_<id>[_<mt>]":<value or array>,...}}
//! ```
//!
//! Field order inside `Data` follows the data set and is unspecified.
//! Fields with several occurrences become arrays from which empty strings
//! are dropped.
//!
//! Unless the protocol identifier (`0_4`) is present with value 1, the
//! ICMP type and code fields (`0_176`, `0_177`) are removed from the
//! caller's data set before rendering. The removal persists.

use std::fmt::Write as _;

use crate::identity::FieldIdentity;
use crate::message::{DataSet, Message, MessageHeader};

/// protocolIdentifier.
pub const PROTOCOL_IDENTIFIER: FieldIdentity = FieldIdentity::new(0, 4);
/// icmpTypeIPv4.
pub const ICMP_TYPE_IPV4: FieldIdentity = FieldIdentity::new(0, 176);
/// icmpCodeIPv4.
pub const ICMP_CODE_IPV4: FieldIdentity = FieldIdentity::new(0, 177);

/// Protocol number that keeps the ICMP fields.
const ICMP_PROTOCOL: u64 = 1;

/// Encoding errors. Any of them voids the whole record.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("unknown data type to marshal: {0}")]
    UnsupportedValueType(&'static str),

    #[error("string encoding failed: {0}")]
    TextEncoding(#[source] serde_json::Error),

    #[error("data set index {index} out of range ({len} data sets)")]
    DataSetIndex { index: usize, len: usize },
}

/// JSON record encoder.
///
/// Keeps its output buffer between calls so a long-lived encoder does not
/// reallocate per record.
pub struct JsonEncoder {
    buffer: String,
}

impl JsonEncoder {
    /// Create an encoder with an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Create an encoder with `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Encode data set `index` of `message`.
    ///
    /// The returned text is valid until the next call. On error the buffer
    /// is cleared and no partial output is exposed.
    pub fn encode(&mut self, message: &mut Message, index: usize) -> Result<&str, EncodeError> {
        self.buffer.clear();
        if let Err(e) = write_message(&mut self.buffer, message, index) {
            log::debug!(
                "[JsonEncoder::encode] agent={} data_set={}: {}",
                message.agent_id,
                index,
                e
            );
            self.buffer.clear();
            return Err(e);
        }
        Ok(&self.buffer)
    }

    /// Take the last encoded record, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode data set `index` of `message` into a new string.
pub fn encode(message: &mut Message, index: usize) -> Result<String, EncodeError> {
    let mut encoder = JsonEncoder::new();
    encoder.encode(message, index)?;
    Ok(encoder.take())
}

fn write_message(out: &mut String, message: &mut Message, index: usize) -> Result<(), EncodeError> {
    let len = message.data_sets.len();
    let data_set = message
        .data_sets
        .get_mut(index)
        .ok_or(EncodeError::DataSetIndex { index, len })?;

    strip_icmp_fields(data_set);

    out.push('{');
    write_agent(out, &message.agent_id)?;
    write_header(out, &message.header);
    write_data_set(out, data_set)?;
    out.push('}');
    Ok(())
}

/// Remove the ICMP type/code fields unless the record is ICMP.
fn strip_icmp_fields(data_set: &mut DataSet) {
    let protocol = data_set
        .get(&PROTOCOL_IDENTIFIER)
        .and_then(|values| values.first())
        .and_then(|v| v.as_u64());
    if protocol == Some(ICMP_PROTOCOL) {
        return;
    }

    let removed_type = data_set.remove(&ICMP_TYPE_IPV4).is_some();
    let removed_code = data_set.remove(&ICMP_CODE_IPV4).is_some();
    if removed_type || removed_code {
        log::trace!(
            "[strip_icmp_fields] protocol={:?}, dropped icmp type={} code={}",
            protocol,
            removed_type,
            removed_code
        );
    }
}

fn write_agent(out: &mut String, agent_id: &str) -> Result<(), EncodeError> {
    out.push_str("\"AgentID\":");
    let literal = serde_json::to_string(agent_id).map_err(EncodeError::TextEncoding)?;
    out.push_str(&literal);
    out.push(',');
    Ok(())
}

fn write_header(out: &mut String, header: &MessageHeader) {
    let _ = write!(
        out,
        "\"Header\":{{\"Version\":{},\"Length\":{},\"ExportTime\":{},\"SequenceNo\":{},\"DomainID\":{}}},",
        header.version, header.length, header.export_time, header.sequence_no, header.domain_id
    );
}

fn write_data_set(out: &mut String, data_set: &DataSet) -> Result<(), EncodeError> {
    out.push_str("\"Data\":{");
    for (i, (id, values)) in data_set.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "\"{}\":", id);

        if values.len() == 1 {
            values[0].write_literal(out)?;
            continue;
        }

        out.push('[');
        let kept = values.iter().filter(|v| !v.is_empty_string());
        for (j, value) in kept.enumerate() {
            if j > 0 {
                out.push(',');
            }
            value.write_literal(out)?;
        }
        out.push(']');
    }
    out.push('}');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn message_with(data_set: DataSet) -> Message {
        let mut msg = Message::new(
            "192.0.2.10",
            MessageHeader {
                version: 10,
                length: 96,
                export_time: 1_700_000_000,
                sequence_no: 7,
                domain_id: 3,
            },
        );
        msg.data_sets.push(data_set);
        msg
    }

    #[test]
    fn test_encode_empty_data_set() {
        let mut msg = message_with(DataSet::new());
        let out = encode(&mut msg, 0).expect("encode");
        assert_eq!(
            out,
            "{\"AgentID\":\"192.0.2.10\",\"Header\":{\"Version\":10,\"Length\":96,\
             \"ExportTime\":1700000000,\"SequenceNo\":7,\"DomainID\":3},\"Data\":{}}"
        );
    }

    #[test]
    fn test_encode_single_value() {
        let mut set = DataSet::new();
        set.insert(FieldIdentity::new(0, 7), FieldValue::Unsigned16(443));
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with(",\"Data\":{\"0_7\":443}}"), "{}", out);
    }

    #[test]
    fn test_encode_discriminant_suffix() {
        let mut set = DataSet::new();
        set.insert(
            FieldIdentity::with_multi_type(9999, 12, 1),
            FieldValue::Ipv4Address([10, 1, 2, 3].into()),
        );
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with("\"Data\":{\"9999_12_1\":\"10.1.2.3\"}}"), "{}", out);
    }

    #[test]
    fn test_encode_repeated_drops_empty_strings() {
        let id = FieldIdentity::new(0, 82);
        let set: DataSet = ["eth0", "", "eth1", ""]
            .iter()
            .map(|s| (id, FieldValue::String(s.to_string())))
            .collect();
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with("\"Data\":{\"0_82\":[\"eth0\",\"eth1\"]}}"), "{}", out);
    }

    #[test]
    fn test_encode_repeated_all_empty() {
        let id = FieldIdentity::new(0, 82);
        let set: DataSet = vec![(id, FieldValue::String(String::new())); 2]
            .into_iter()
            .collect();
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with("\"Data\":{\"0_82\":[]}}"), "{}", out);
    }

    #[test]
    fn test_single_empty_string_is_kept() {
        let mut set = DataSet::new();
        set.insert(FieldIdentity::new(0, 82), FieldValue::String(String::new()));
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with("\"Data\":{\"0_82\":\"\"}}"), "{}", out);
    }

    #[test]
    fn test_icmp_fields_removed_without_protocol() {
        let mut set = DataSet::new();
        set.insert(ICMP_TYPE_IPV4, FieldValue::Unsigned8(8));
        set.insert(ICMP_CODE_IPV4, FieldValue::Unsigned8(0));
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.ends_with("\"Data\":{}}"), "{}", out);
        assert!(msg.data_sets[0].is_empty());
    }

    #[test]
    fn test_icmp_fields_kept_for_icmp() {
        let mut set = DataSet::new();
        set.insert(PROTOCOL_IDENTIFIER, FieldValue::Unsigned8(1));
        set.insert(ICMP_TYPE_IPV4, FieldValue::Unsigned8(8));
        let mut msg = message_with(set);

        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.contains("\"0_176\":8"), "{}", out);
        assert_eq!(msg.data_sets[0].len(), 2);
    }

    #[test]
    fn test_unsupported_value_aborts() {
        let mut set = DataSet::new();
        set.insert(FieldIdentity::new(0, 999), FieldValue::Boolean(true));
        let mut msg = message_with(set);

        let mut encoder = JsonEncoder::new();
        let err = encoder.encode(&mut msg, 0).unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedValueType("boolean")));
        assert!(encoder.take().is_empty());
    }

    #[test]
    fn test_unsupported_value_inside_array_aborts() {
        let id = FieldIdentity::new(0, 999);
        let set: DataSet = vec![
            (id, FieldValue::Unsigned8(1)),
            (id, FieldValue::Boolean(false)),
            (id, FieldValue::Unsigned8(2)),
        ]
        .into_iter()
        .collect();
        let mut msg = message_with(set);

        assert!(matches!(
            encode(&mut msg, 0),
            Err(EncodeError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut msg = message_with(DataSet::new());
        let err = encode(&mut msg, 1).unwrap_err();
        assert!(matches!(err, EncodeError::DataSetIndex { index: 1, len: 1 }));
    }

    #[test]
    fn test_agent_id_is_escaped() {
        let mut msg = message_with(DataSet::new());
        msg.agent_id = "edge \"a\"".to_string();
        let out = encode(&mut msg, 0).expect("encode");
        assert!(out.starts_with("{\"AgentID\":\"edge \\\"a\\\"\","), "{}", out);
    }

    #[test]
    fn test_encoder_reuse() {
        let mut encoder = JsonEncoder::with_capacity(256);
        let mut first = message_with(DataSet::new());
        let mut set = DataSet::new();
        set.insert(FieldIdentity::new(0, 2), FieldValue::Unsigned64(12));
        let mut second = message_with(set);

        let a = encoder.encode(&mut first, 0).expect("first").to_string();
        let b = encoder.encode(&mut second, 0).expect("second").to_string();
        assert!(a.ends_with("\"Data\":{}}"));
        assert!(b.ends_with("\"Data\":{\"0_2\":12}}"));
    }
}
