// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field specifier identity and IPFIX abstract data types (RFC 5102 §3.1).
//!
//! A field is identified by its enterprise number (0 for IANA elements),
//! its element ID and a multi-type discriminant that tells apart
//! occurrences of one element decoded to different concrete types.
//!
//! ```text
//! FieldIdentity { 0, 8, 0 }     -> "0_8"
//! FieldIdentity { 9999, 1, 1 }  -> "9999_1_1"
//! ```

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// FieldIdentity
// ---------------------------------------------------------------------------

/// Composite key of a field specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldIdentity {
    /// Private enterprise number; 0 denotes an IANA-standard element.
    pub enterprise_no: u32,
    /// Information element ID.
    pub element_id: u16,
    /// 0 for the primary type, nonzero for an alternate type.
    pub multi_type_id: u8,
}

impl FieldIdentity {
    /// Identity of the primary type of `(enterprise_no, element_id)`.
    pub const fn new(enterprise_no: u32, element_id: u16) -> Self {
        Self {
            enterprise_no,
            element_id,
            multi_type_id: 0,
        }
    }

    /// Identity of an alternate type occurrence.
    pub const fn with_multi_type(enterprise_no: u32, element_id: u16, multi_type_id: u8) -> Self {
        Self {
            enterprise_no,
            element_id,
            multi_type_id,
        }
    }

    /// True for vendor-defined elements.
    pub const fn is_enterprise(&self) -> bool {
        self.enterprise_no != 0
    }

    /// Same field specifier with the discriminant cleared.
    pub const fn primary(&self) -> Self {
        Self::new(self.enterprise_no, self.element_id)
    }
}

/// Renders the external key: `<ent>_<id>`, plus `_<mt>` only when `mt != 0`.
impl fmt::Display for FieldIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.enterprise_no, self.element_id)?;
        if self.multi_type_id != 0 {
            write!(f, "_{}", self.multi_type_id)?;
        }
        Ok(())
    }
}

/// Error returned when a textual key is not `<ent>_<id>[_<mt>]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field key: {0:?}")]
pub struct ParseIdentityError(pub String);

impl FromStr for FieldIdentity {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdentityError(s.to_string());
        let mut parts = s.split('_');

        let enterprise_no = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(err)?;
        let element_id = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(err)?;
        let multi_type_id = match parts.next() {
            Some(p) => p.parse::<u8>().map_err(|_| err())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self::with_multi_type(enterprise_no, element_id, multi_type_id))
    }
}

// ---------------------------------------------------------------------------
// ScalarType
// ---------------------------------------------------------------------------

/// Abstract data type of an information element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarType {
    /// Type name not recognized when the model was loaded.
    #[default]
    Unknown,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    /// 6 octets.
    MacAddress,
    /// Finite-length string of octets.
    OctetArray,
    /// Finite-length UTF-8 string.
    String,
    DateTimeSeconds,
    DateTimeMilliseconds,
    DateTimeMicroseconds,
    DateTimeNanoseconds,
    Ipv4Address,
    Ipv6Address,
    /// IPv4 address when exactly 4 bytes long (discriminant 1), string otherwise.
    Ipv4OrString,
}

/// Type names accepted in `ipfix.elements`.
const TYPE_NAMES: &[(&str, ScalarType)] = &[
    ("unsigned8", ScalarType::Uint8),
    ("unsigned16", ScalarType::Uint16),
    ("unsigned32", ScalarType::Uint32),
    ("unsigned64", ScalarType::Uint64),
    ("signed8", ScalarType::Int8),
    ("signed16", ScalarType::Int16),
    ("signed32", ScalarType::Int32),
    ("signed64", ScalarType::Int64),
    ("float32", ScalarType::Float32),
    ("float64", ScalarType::Float64),
    ("boolean", ScalarType::Boolean),
    ("macAddress", ScalarType::MacAddress),
    ("octetArray", ScalarType::OctetArray),
    ("string", ScalarType::String),
    ("dateTimeSeconds", ScalarType::DateTimeSeconds),
    ("dateTimeMilliseconds", ScalarType::DateTimeMilliseconds),
    ("dateTimeMicroseconds", ScalarType::DateTimeMicroseconds),
    ("dateTimeNanoseconds", ScalarType::DateTimeNanoseconds),
    ("ipv4Address", ScalarType::Ipv4Address),
    ("ipv6Address", ScalarType::Ipv6Address),
    ("ipv4OrString", ScalarType::Ipv4OrString),
];

impl ScalarType {
    /// Map a type name to its type. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        TYPE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
            .unwrap_or(ScalarType::Unknown)
    }

    /// Type name as written in `ipfix.elements`.
    pub fn name(&self) -> &'static str {
        TYPE_NAMES
            .iter()
            .find(|(_, t)| t == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// True for types whose encoded length varies per occurrence.
    pub fn is_variable_length(&self) -> bool {
        matches!(
            self,
            ScalarType::String | ScalarType::OctetArray | ScalarType::Ipv4OrString
        )
    }

    /// Natural encoded size in bytes, `None` for variable-length and unknown types.
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            ScalarType::Uint8 | ScalarType::Int8 | ScalarType::Boolean => Some(1),
            ScalarType::Uint16 | ScalarType::Int16 => Some(2),
            ScalarType::Uint32
            | ScalarType::Int32
            | ScalarType::Float32
            | ScalarType::DateTimeSeconds
            | ScalarType::Ipv4Address => Some(4),
            ScalarType::MacAddress => Some(6),
            ScalarType::Uint64
            | ScalarType::Int64
            | ScalarType::Float64
            | ScalarType::DateTimeMilliseconds
            | ScalarType::DateTimeMicroseconds
            | ScalarType::DateTimeNanoseconds => Some(8),
            ScalarType::Ipv6Address => Some(16),
            ScalarType::OctetArray
            | ScalarType::String
            | ScalarType::Ipv4OrString
            | ScalarType::Unknown => None,
        }
    }

    /// Concrete type and multi-type discriminant for an occurrence of
    /// `len` bytes.
    ///
    /// Only `Ipv4OrString` resolves to something other than itself:
    /// exactly 4 bytes is an IPv4 address (discriminant 1), anything else a
    /// string (discriminant 0).
    pub fn resolve_alternate(&self, len: usize) -> (ScalarType, u8) {
        match self {
            ScalarType::Ipv4OrString if len == 4 => (ScalarType::Ipv4Address, 1),
            ScalarType::Ipv4OrString => (ScalarType::String, 0),
            other => (*other, 0),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
