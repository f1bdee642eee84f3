// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 netmask and address block arithmetic.

pub mod block;
pub mod netmask;

pub use block::{InvalidBlock, Ipv4Block};
pub use netmask::{InvalidNetmask, Netmask};
