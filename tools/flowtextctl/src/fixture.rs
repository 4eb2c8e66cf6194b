// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML description of a decoded message.
//!
//! ```yaml
//! agent_id: 192.0.2.10
//! header: {version: 10, length: 96, export_time: 1700000000, sequence_no: 7, domain_id: 0}
//! data_sets:
//!   - - {field: "0_4", values: [1]}
//!     - {field: "0_176", values: [8], type: unsigned8}
//! ```
//!
//! Values are typed with `type` when given, otherwise with the declared
//! type of the field in the information model.

use anyhow::{bail, Context, Result};
use flowtext::{
    DataSet, FieldIdentity, FieldValue, InformationModel, Message, MessageHeader, ScalarType,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct MessageFixture {
    pub agent_id: String,
    #[serde(default)]
    pub header: HeaderFixture,
    #[serde(default)]
    pub data_sets: Vec<Vec<FieldFixture>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HeaderFixture {
    pub version: u16,
    pub length: u16,
    pub export_time: u32,
    pub sequence_no: u32,
    pub domain_id: u32,
}

impl Default for HeaderFixture {
    fn default() -> Self {
        Self {
            version: 10,
            length: 0,
            export_time: 0,
            sequence_no: 0,
            domain_id: 0,
        }
    }
}

impl From<HeaderFixture> for MessageHeader {
    fn from(h: HeaderFixture) -> Self {
        MessageHeader {
            version: h.version,
            length: h.length,
            export_time: h.export_time,
            sequence_no: h.sequence_no,
            domain_id: h.domain_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldFixture {
    /// External key, `<ent>_<id>[_<mt>]`.
    pub field: String,
    #[serde(default)]
    pub values: Vec<serde_yaml::Value>,
    /// Type name overriding the information model.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
}

impl MessageFixture {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid message fixture")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Build the message, typing every value.
    pub fn build(&self, model: &InformationModel) -> Result<Message> {
        let mut message = Message::new(self.agent_id.clone(), self.header.into());

        for (index, fields) in self.data_sets.iter().enumerate() {
            let mut data_set = DataSet::new();
            for field in fields {
                let id: FieldIdentity = field.field.parse()?;
                let ty = match &field.field_type {
                    Some(name) => ScalarType::from_name(name),
                    None => model.field_type(&id),
                };
                for raw in &field.values {
                    let text = scalar_text(raw)
                        .with_context(|| format!("data set {}, field {}", index, id))?;
                    let value = FieldValue::parse(ty, &text)
                        .with_context(|| format!("data set {}, field {}", index, id))?;
                    data_set.push(id, value);
                }
            }
            tracing::debug!(index, fields = data_set.len(), "data set built");
            message.data_sets.push(data_set);
        }

        Ok(message)
    }
}

fn scalar_text(raw: &serde_yaml::Value) -> Result<String> {
    match raw {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        other => bail!("value must be a scalar, got {:?}", other),
    }
}
