// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation of EDGE subnets, references to them, and managed subnets

use net::ipv4::{Ipv4Block, Netmask};
use net::segment::SegmentSize;
use net::vlan::Vid;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use tracing::debug;

use crate::errors::ErrorCode;
use crate::field::Field;
use crate::model::subnet::{EdgeSubnet, ManagedSubnet, Subnet};
use crate::settings::ValidationSettings;
use crate::validation::primitive::{Check, FieldRule, apply_rules};
use crate::validation::sink::ErrorSink;

const EDGE_SUBNET_RULES: &[FieldRule<EdgeSubnet>] = &[
    FieldRule {
        field: Field::Subnet,
        value: |s| s.subnet.as_deref(),
        checks: &[Check::Required, Check::Ip],
    },
    FieldRule {
        field: Field::Netmask,
        value: |s| s.netmask.as_deref(),
        checks: &[Check::Required, Check::Netmask],
    },
    FieldRule {
        field: Field::Gateway,
        value: |s| s.gateway.as_deref(),
        checks: &[Check::Required, Check::Ip],
    },
];

const MANAGED_SUBNET_RULES: &[FieldRule<ManagedSubnet>] = &[
    FieldRule {
        field: Field::Subnet,
        value: |s| s.subnet.as_deref(),
        checks: &[Check::Required, Check::Ip],
    },
    FieldRule {
        field: Field::Netmask,
        value: |s| s.netmask.as_deref(),
        checks: &[Check::Required, Check::Netmask],
    },
];

fn display_name(subnet: &impl Subnet) -> &str {
    subnet.identity().unwrap_or("<unnamed>")
}

// Get the IPv4 address of a field that already passed the IP check.
// Subnet arithmetic is 32-bit only: IPv6 addresses are rejected here.
fn ipv4_field(
    field: Field,
    value: Option<&str>,
    code: ErrorCode,
    sink: &mut ErrorSink,
) -> Option<Ipv4Addr> {
    match IpAddr::from_str(value?).ok()? {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(addr) => {
            sink.scope(field)
                .reject(code, format!("{addr} is not an IPv4 address"));
            None
        }
    }
}

// network, netmask of a subnet whose scalars are known to be valid
fn subnet_bits(
    subnet: &impl Subnet,
    code: ErrorCode,
    sink: &mut ErrorSink,
) -> Option<(Ipv4Addr, Netmask)> {
    let network = ipv4_field(Field::Subnet, subnet.subnet(), code, sink)?;
    let netmask = Netmask::from_str(subnet.netmask()?).ok()?;
    Some((network, netmask))
}

fn check_alignment(
    network: Ipv4Addr,
    netmask: Netmask,
    code: ErrorCode,
    sink: &mut ErrorSink,
) -> Option<Ipv4Block> {
    match Ipv4Block::new(network, netmask) {
        Ok(block) => Some(block),
        Err(e) => {
            sink.scope(Field::Subnet).reject(code, format!("invalid subnet: {e}"));
            None
        }
    }
}

/// Validate a fully specified [`EdgeSubnet`]
pub fn validate_edge_subnet(
    subnet: &EdgeSubnet,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    debug!("Validating subnet '{}'...", display_name(subnet));
    let mark = sink.error_count();
    apply_rules(subnet, EDGE_SUBNET_RULES, settings, sink);
    if sink.has_errors_since(mark) {
        return;
    }

    let code = ErrorCode::InvalidSubnet;
    let Some((network, netmask)) = subnet_bits(subnet, code, sink) else {
        return;
    };
    let Some(gateway) = ipv4_field(Field::Gateway, subnet.gateway.as_deref(), code, sink) else {
        return;
    };
    let block = check_alignment(network, netmask, code, sink);
    if !block.is_some_and(|block| block.contains_host(gateway)) {
        sink.scope(Field::Gateway).reject(
            code,
            format!("gateway {gateway} is not a host address of subnet {network}/{netmask}"),
        );
    }
}

/// Validate the subnet of a cluster. A subnet that only names one of the `known` global
/// subnets is a reference to it and has been validated as part of the global list; anything
/// else must be a complete subnet of its own.
pub fn validate_subnet_reference<S: AsRef<str>>(
    subnet: &EdgeSubnet,
    known: &[S],
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    if subnet.is_reference_to(known) {
        debug!("Subnet '{}' refers to a global subnet", display_name(subnet));
        return;
    }
    validate_edge_subnet(subnet, settings, sink);
}

/// Validate a [`ManagedSubnet`]
pub fn validate_managed_subnet(
    managed: &ManagedSubnet,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    debug!("Validating managed subnet '{}'...", display_name(managed));
    let code = ErrorCode::InvalidManagedSubnet;
    let mark = sink.error_count();
    apply_rules(managed, MANAGED_SUBNET_RULES, settings, sink);
    if !sink.has_errors_since(mark)
        && let Some((network, netmask)) = subnet_bits(managed, code, sink)
    {
        check_alignment(network, netmask, code, sink);
    }

    if let Some(size) = managed.segment_size {
        let mut scope = sink.scope(Field::SegmentSize);
        for violation in SegmentSize::violations(size) {
            scope.reject(code, format!("invalid segment size: {violation}"));
        }
    }

    if let Some(min) = managed.min_vlan {
        let mut scope = sink.scope(Field::MinVlan);
        if let Err(e) = Vid::try_from(min) {
            scope.reject(code, format!("invalid MinVlan: {e}"));
        }
        // ordering is only checked here so that it gets reported once
        if let Some(max) = managed.max_vlan
            && min > max
        {
            scope.reject(code, format!("MinVlan {min} is larger than MaxVlan {max}"));
        }
    }

    if let Some(max) = managed.max_vlan
        && let Err(e) = Vid::try_from(max)
    {
        sink.scope(Field::MaxVlan)
            .reject(code, format!("invalid MaxVlan: {e}"));
    }
}
