// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Syntactic validation of address strings: IP ranges, domain names and hosts.
//!
//! Nothing in here resolves names or touches the network.

pub mod host;
pub mod range;

pub use host::{DomainName, Host, InvalidDomainName, InvalidHost};
pub use range::{InvalidIpRange, IpRange};
