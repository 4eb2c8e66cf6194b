// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IPFIX flow records to compact JSON.
//!
//! This crate provides:
//! - Field identity (enterprise number, element ID, multi-type discriminant)
//!   and the IPFIX abstract data types
//! - An information model mapping fields to declared names and types, with a
//!   built-in IANA subset and YAML extension files
//! - A JSON encoder rendering one data set of a decoded message per call
//!
//! # Overview
//!
//! The crate does NOT decode export packets. A decoder builds a [`Message`]
//! (using the [`InformationModel`] to type raw values) and hands it to the
//! encoder.
//!
//! ```text
//! packet --> decoder (+ InformationModel) --> Message --> JsonEncoder --> String
//! ```
//!
//! ```
//! use flowtext::{encode, DataSet, FieldIdentity, FieldValue, Message, MessageHeader};
//!
//! let mut data_set = DataSet::new();
//! data_set.insert(FieldIdentity::new(0, 7), FieldValue::Unsigned16(443));
//!
//! let mut message = Message::new("192.0.2.10", MessageHeader::default());
//! message.data_sets.push(data_set);
//!
//! let json = encode(&mut message, 0).unwrap();
//! assert!(json.ends_with(r#""Data":{"0_7":443}}"#));
//! ```

pub mod encoder;
pub mod identity;
pub mod message;
pub mod registry;
pub mod value;

pub use encoder::{encode, EncodeError, JsonEncoder};
pub use identity::{FieldIdentity, ParseIdentityError, ScalarType};
pub use message::{DataSet, Message, MessageHeader};
pub use registry::{InformationModel, RegistryEntry, RegistryError};
pub use value::{FieldValue, MacAddress, ValueParseError};
