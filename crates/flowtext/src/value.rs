// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed field values and their JSON literal form.
//!
//! Literal rules:
//! - Unsigned/signed integers: decimal (`42`, `-7`)
//! - Floats: shortest round-trip scientific notation, `E` marker and a
//!   signed two-digit exponent (`1.5E+00`, `1E-07`)
//! - Strings: JSON string literal
//! - IPv4/IPv6/MAC addresses: canonical text, quoted (`"10.0.0.1"`);
//!   IPv4-mapped IPv6 addresses render in dotted IPv4 form
//! - Octet arrays: quoted lowercase hex with `0x` prefix (`"0x0aff"`)
//!
//! Booleans have no literal form and are rejected by the encoder.

use std::fmt;
use std::fmt::Write as _;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::encoder::EncodeError;
use crate::identity::ScalarType;

// ---------------------------------------------------------------------------
// MacAddress
// ---------------------------------------------------------------------------

/// IEEE 802 MAC-48 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Error returned for a MAC address that is not six hex octets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address: {0:?}")]
pub struct ParseMacError(pub String);

impl FromStr for MacAddress {
    type Err = ParseMacError;

    /// Accepts `:` or `-` separated octets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(|| ParseMacError(s.to_string()))?;
            if part.len() != 2 {
                return Err(ParseMacError(s.to_string()));
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ParseMacError(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseMacError(s.to_string()));
        }
        Ok(MacAddress(octets))
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// One decoded occurrence of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Unsigned8(u8),
    Unsigned16(u16),
    Unsigned32(u32),
    Unsigned64(u64),
    Signed8(i8),
    Signed16(i16),
    Signed32(i32),
    Signed64(i64),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    MacAddress(MacAddress),
    OctetArray(Vec<u8>),
    String(String),
    Ipv4Address(Ipv4Addr),
    Ipv6Address(Ipv6Addr),
}

impl FieldValue {
    /// Short name of the runtime kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Unsigned8(_) => "unsigned8",
            FieldValue::Unsigned16(_) => "unsigned16",
            FieldValue::Unsigned32(_) => "unsigned32",
            FieldValue::Unsigned64(_) => "unsigned64",
            FieldValue::Signed8(_) => "signed8",
            FieldValue::Signed16(_) => "signed16",
            FieldValue::Signed32(_) => "signed32",
            FieldValue::Signed64(_) => "signed64",
            FieldValue::Float32(_) => "float32",
            FieldValue::Float64(_) => "float64",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::MacAddress(_) => "macAddress",
            FieldValue::OctetArray(_) => "octetArray",
            FieldValue::String(_) => "string",
            FieldValue::Ipv4Address(_) => "ipv4Address",
            FieldValue::Ipv6Address(_) => "ipv6Address",
        }
    }

    /// Integer view of the value; `None` for non-integers and negative numbers.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::Unsigned8(v) => Some(u64::from(v)),
            FieldValue::Unsigned16(v) => Some(u64::from(v)),
            FieldValue::Unsigned32(v) => Some(u64::from(v)),
            FieldValue::Unsigned64(v) => Some(v),
            FieldValue::Signed8(v) => u64::try_from(v).ok(),
            FieldValue::Signed16(v) => u64::try_from(v).ok(),
            FieldValue::Signed32(v) => u64::try_from(v).ok(),
            FieldValue::Signed64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// True for a string value of length zero.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, FieldValue::String(s) if s.is_empty())
    }

    /// Append the JSON literal of this value to `out`.
    ///
    /// On error nothing is guaranteed about what was appended; callers
    /// discard the buffer.
    pub fn write_literal(&self, out: &mut String) -> Result<(), EncodeError> {
        match self {
            FieldValue::Unsigned8(v) => push_display(out, v),
            FieldValue::Unsigned16(v) => push_display(out, v),
            FieldValue::Unsigned32(v) => push_display(out, v),
            FieldValue::Unsigned64(v) => push_display(out, v),
            FieldValue::Signed8(v) => push_display(out, v),
            FieldValue::Signed16(v) => push_display(out, v),
            FieldValue::Signed32(v) => push_display(out, v),
            FieldValue::Signed64(v) => push_display(out, v),
            FieldValue::Float32(v) => {
                push_float(out, v.is_nan(), v.is_infinite(), *v < 0.0, format!("{:E}", v))
            }
            FieldValue::Float64(v) => {
                push_float(out, v.is_nan(), v.is_infinite(), *v < 0.0, format!("{:E}", v))
            }
            FieldValue::String(s) => {
                let literal = serde_json::to_string(s).map_err(EncodeError::TextEncoding)?;
                out.push_str(&literal);
            }
            FieldValue::Ipv4Address(ip) => push_quoted(out, ip),
            FieldValue::Ipv6Address(ip) => match ip.to_ipv4_mapped() {
                Some(v4) => push_quoted(out, &v4),
                None => push_quoted(out, ip),
            },
            FieldValue::MacAddress(mac) => push_quoted(out, mac),
            FieldValue::OctetArray(bytes) => {
                out.reserve(bytes.len() * 2 + 4);
                out.push_str("\"0x");
                for b in bytes {
                    let _ = write!(out, "{:02x}", b);
                }
                out.push('"');
            }
            FieldValue::Boolean(_) => {
                return Err(EncodeError::UnsupportedValueType(self.kind()));
            }
        }
        Ok(())
    }

    /// JSON literal of this value as a new string.
    pub fn to_literal(&self) -> Result<String, EncodeError> {
        let mut out = String::new();
        self.write_literal(&mut out)?;
        Ok(out)
    }

    /// Build a value of the declared type from its textual form.
    ///
    /// Timestamps are carried as unsigned integers of their resolution:
    /// seconds as `Unsigned32`, finer resolutions as `Unsigned64`.
    /// `Ipv4OrString` yields an IPv4 address when the text is one, a string
    /// otherwise.
    pub fn parse(ty: ScalarType, text: &str) -> Result<FieldValue, ValueParseError> {
        let invalid = || ValueParseError::Invalid {
            ty,
            value: text.to_string(),
        };
        let value = match ty {
            ScalarType::Uint8 => FieldValue::Unsigned8(text.parse().map_err(|_| invalid())?),
            ScalarType::Uint16 => FieldValue::Unsigned16(text.parse().map_err(|_| invalid())?),
            ScalarType::Uint32 | ScalarType::DateTimeSeconds => {
                FieldValue::Unsigned32(text.parse().map_err(|_| invalid())?)
            }
            ScalarType::Uint64
            | ScalarType::DateTimeMilliseconds
            | ScalarType::DateTimeMicroseconds
            | ScalarType::DateTimeNanoseconds => {
                FieldValue::Unsigned64(text.parse().map_err(|_| invalid())?)
            }
            ScalarType::Int8 => FieldValue::Signed8(text.parse().map_err(|_| invalid())?),
            ScalarType::Int16 => FieldValue::Signed16(text.parse().map_err(|_| invalid())?),
            ScalarType::Int32 => FieldValue::Signed32(text.parse().map_err(|_| invalid())?),
            ScalarType::Int64 => FieldValue::Signed64(text.parse().map_err(|_| invalid())?),
            ScalarType::Float32 => FieldValue::Float32(text.parse().map_err(|_| invalid())?),
            ScalarType::Float64 => FieldValue::Float64(text.parse().map_err(|_| invalid())?),
            ScalarType::Boolean => FieldValue::Boolean(text.parse().map_err(|_| invalid())?),
            ScalarType::MacAddress => FieldValue::MacAddress(text.parse().map_err(|_| invalid())?),
            ScalarType::OctetArray => FieldValue::OctetArray(parse_hex(text).ok_or_else(invalid)?),
            ScalarType::String => FieldValue::String(text.to_string()),
            ScalarType::Ipv4Address => {
                FieldValue::Ipv4Address(text.parse().map_err(|_| invalid())?)
            }
            ScalarType::Ipv6Address => {
                FieldValue::Ipv6Address(text.parse().map_err(|_| invalid())?)
            }
            ScalarType::Ipv4OrString => match text.parse::<Ipv4Addr>() {
                Ok(ip) => FieldValue::Ipv4Address(ip),
                Err(_) => FieldValue::String(text.to_string()),
            },
            ScalarType::Unknown => return Err(ValueParseError::Untyped),
        };
        Ok(value)
    }
}

/// Errors from [`FieldValue::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
    #[error("cannot parse {value:?} as {ty}")]
    Invalid { ty: ScalarType, value: String },

    #[error("field has no known type")]
    Untyped,
}

fn push_display<T: fmt::Display>(out: &mut String, v: &T) {
    let _ = write!(out, "{}", v);
}

fn push_quoted<T: fmt::Display>(out: &mut String, v: &T) {
    let _ = write!(out, "\"{}\"", v);
}

/// Rewrites Rust's `{:E}` output (`1.5E0`, `1E-7`) to a signed, at least
/// two-digit exponent (`1.5E+00`, `1E-07`).
fn push_float(out: &mut String, nan: bool, infinite: bool, negative: bool, repr: String) {
    if nan {
        out.push_str("NaN");
        return;
    }
    if infinite {
        out.push_str(if negative { "-Inf" } else { "+Inf" });
        return;
    }
    match repr.split_once('E') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            let _ = write!(out, "{}E{}{:02}", mantissa, sign, exp.unsigned_abs());
        }
        None => out.push_str(&repr),
    }
}

/// Decode hex text, with or without a `0x` prefix.
fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}
