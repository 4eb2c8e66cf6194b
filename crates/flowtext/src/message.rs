// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoded IPFIX message as handed over by the decoder.

use std::collections::hash_map;
use std::collections::HashMap;

use crate::identity::FieldIdentity;
use crate::value::FieldValue;

/// IPFIX message header (RFC 7011 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub version: u16,
    /// Total message length in octets, header included.
    pub length: u16,
    /// Seconds since the UNIX epoch at export.
    pub export_time: u32,
    pub sequence_no: u32,
    pub domain_id: u32,
}

/// One data record: every field present mapped to its occurrences in
/// decode order.
///
/// A field with more than one value was repeated in the record. Iteration
/// order over fields is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    fields: HashMap<FieldIdentity, Vec<FieldValue>>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all occurrences of `id` with a single value.
    pub fn insert(&mut self, id: FieldIdentity, value: FieldValue) {
        self.fields.insert(id, vec![value]);
    }

    /// Append another occurrence of `id`.
    pub fn push(&mut self, id: FieldIdentity, value: FieldValue) {
        self.fields.entry(id).or_default().push(value);
    }

    pub fn get(&self, id: &FieldIdentity) -> Option<&[FieldValue]> {
        self.fields.get(id).map(Vec::as_slice)
    }

    /// Remove a field and all its occurrences.
    pub fn remove(&mut self, id: &FieldIdentity) -> Option<Vec<FieldValue>> {
        self.fields.remove(id)
    }

    pub fn contains(&self, id: &FieldIdentity) -> bool {
        self.fields.contains_key(id)
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, FieldIdentity, Vec<FieldValue>> {
        self.fields.iter()
    }
}

impl FromIterator<(FieldIdentity, FieldValue)> for DataSet {
    /// Repeated identities become repeated occurrences.
    fn from_iter<I: IntoIterator<Item = (FieldIdentity, FieldValue)>>(iter: I) -> Self {
        let mut set = DataSet::new();
        for (id, value) in iter {
            set.push(id, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = (&'a FieldIdentity, &'a Vec<FieldValue>);
    type IntoIter = hash_map::Iter<'a, FieldIdentity, Vec<FieldValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// A decoded export message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Exporter identification, usually its address.
    pub agent_id: String,
    pub header: MessageHeader,
    pub data_sets: Vec<DataSet>,
}

impl Message {
    pub fn new(agent_id: impl Into<String>, header: MessageHeader) -> Self {
        Self {
            agent_id: agent_id.into(),
            header,
            data_sets: Vec::new(),
        }
    }
}
