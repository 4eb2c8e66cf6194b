// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in IANA information elements.
//!
//! The subset of <https://www.iana.org/assignments/ipfix/ipfix.xhtml>
//! commonly found in router and probe templates.

use crate::identity::ScalarType::{self, *};

/// `(element ID, name, type)` of IANA elements (enterprise number 0).
pub(super) const ELEMENTS: &[(u16, &str, ScalarType)] = &[
    (1, "octetDeltaCount", Uint64),
    (2, "packetDeltaCount", Uint64),
    (4, "protocolIdentifier", Uint8),
    (5, "ipClassOfService", Uint8),
    (6, "tcpControlBits", Uint16),
    (7, "sourceTransportPort", Uint16),
    (8, "sourceIPv4Address", Ipv4Address),
    (9, "sourceIPv4PrefixLength", Uint8),
    (10, "ingressInterface", Uint32),
    (11, "destinationTransportPort", Uint16),
    (12, "destinationIPv4Address", Ipv4Address),
    (13, "destinationIPv4PrefixLength", Uint8),
    (14, "egressInterface", Uint32),
    (15, "ipNextHopIPv4Address", Ipv4Address),
    (16, "bgpSourceAsNumber", Uint32),
    (17, "bgpDestinationAsNumber", Uint32),
    (18, "bgpNextHopIPv4Address", Ipv4Address),
    (21, "flowEndSysUpTime", Uint32),
    (22, "flowStartSysUpTime", Uint32),
    (27, "sourceIPv6Address", Ipv6Address),
    (28, "destinationIPv6Address", Ipv6Address),
    (29, "sourceIPv6PrefixLength", Uint8),
    (30, "destinationIPv6PrefixLength", Uint8),
    (31, "flowLabelIPv6", Uint32),
    (32, "icmpTypeCodeIPv4", Uint16),
    (52, "minimumTTL", Uint8),
    (53, "maximumTTL", Uint8),
    (56, "sourceMacAddress", MacAddress),
    (58, "vlanId", Uint16),
    (60, "ipVersion", Uint8),
    (61, "flowDirection", Uint8),
    (62, "ipNextHopIPv6Address", Ipv6Address),
    (80, "destinationMacAddress", MacAddress),
    (82, "interfaceName", String),
    (83, "interfaceDescription", String),
    (85, "octetTotalCount", Uint64),
    (86, "packetTotalCount", Uint64),
    (94, "applicationDescription", String),
    (95, "applicationId", OctetArray),
    (96, "applicationName", String),
    (136, "flowEndReason", Uint8),
    (138, "observationPointId", Uint64),
    (139, "icmpTypeCodeIPv6", Uint16),
    (148, "flowId", Uint64),
    (150, "flowStartSeconds", DateTimeSeconds),
    (151, "flowEndSeconds", DateTimeSeconds),
    (152, "flowStartMilliseconds", DateTimeMilliseconds),
    (153, "flowEndMilliseconds", DateTimeMilliseconds),
    (154, "flowStartMicroseconds", DateTimeMicroseconds),
    (155, "flowEndMicroseconds", DateTimeMicroseconds),
    (156, "flowStartNanoseconds", DateTimeNanoseconds),
    (157, "flowEndNanoseconds", DateTimeNanoseconds),
    (176, "icmpTypeIPv4", Uint8),
    (177, "icmpCodeIPv4", Uint8),
    (178, "icmpTypeIPv6", Uint8),
    (179, "icmpCodeIPv6", Uint8),
    (225, "postNATSourceIPv4Address", Ipv4Address),
    (226, "postNATDestinationIPv4Address", Ipv4Address),
    (227, "postNAPTSourceTransportPort", Uint16),
    (228, "postNAPTDestinationTransportPort", Uint16),
    (234, "ingressVRFID", Uint32),
    (235, "egressVRFID", Uint32),
];
