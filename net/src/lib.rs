// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)] // Validation logic should always be strictly safe
#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Strictly validated network primitives for cluster network configurations: contiguous
//! netmasks, aligned IPv4 blocks and their VLAN-indexed segments, managed-mode VLAN ids,
//! segment sizes, address ranges and host/domain names.

pub mod addr;
pub mod ipv4;
pub mod segment;
pub mod vlan;
