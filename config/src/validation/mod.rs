// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation of a [`NetworkConfiguration`].
//!
//! Validation never stops at the first problem: every violation found is recorded as a
//! [`Failure`] tagged with the dotted path of the offending field. Checks that combine several
//! fields (subnet alignment, gateway containment) only run once the fields they depend on
//! have passed their own checks, so that a bad input is reported once and not as a cascade.

pub mod cluster;
pub mod midonet;
pub mod primitive;
pub mod sink;
pub mod subnet;


use tracing::debug;

use crate::errors::{ConfigResult, ErrorCode, Failure, ValidationErrors};
use crate::field::Field;
use crate::model::{ModeKind, NetworkConfiguration};
use crate::settings::ValidationSettings;
use crate::validation::cluster::validate_cluster;
use crate::validation::midonet::validate_midonet;
use crate::validation::primitive::{Check, FieldRule, apply_rules, check_each};
use crate::validation::sink::ErrorSink;
use crate::validation::subnet::{validate_edge_subnet, validate_managed_subnet};

const ROOT_RULES: &[FieldRule<NetworkConfiguration>] = &[
    FieldRule {
        field: Field::InstanceDnsDomain,
        value: |c| c.instance_dns_domain.as_deref(),
        checks: &[Check::Domain],
    },
    FieldRule {
        field: Field::MacPrefix,
        value: |c| c.mac_prefix.as_deref(),
        checks: &[Check::MacPrefix],
    },
    FieldRule {
        field: Field::Mode,
        value: |c| c.mode.as_deref(),
        checks: &[Check::Mode],
    },
];

fn validate_address_pools(
    config: &NetworkConfiguration,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    if config.public_ips.is_empty() {
        sink.scope(Field::PublicIps)
            .reject(ErrorCode::Required, "at least one public address is required");
    }
    check_each(
        Field::PublicIps,
        &config.public_ips,
        Check::IpOrRange,
        settings,
        sink,
    );
    check_each(
        Field::PrivateIps,
        &config.private_ips,
        Check::IpOrRange,
        settings,
        sink,
    );
    check_each(
        Field::InstanceDnsServers,
        &config.instance_dns_servers,
        Check::Host,
        settings,
        sink,
    );
}

fn validate_overlay_mode(
    config: &NetworkConfiguration,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    let mut scope = sink.scope(Field::Mido);
    match &config.mido {
        Some(mido) => validate_midonet(mido, settings, &mut scope),
        None => scope.reject(ErrorCode::Required, "overlay settings are required"),
    }
}

fn validate_edge_mode(
    config: &NetworkConfiguration,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    for (index, subnet) in config.subnets.iter().enumerate() {
        let mut scope = sink.scope_indexed(Field::Subnets, index);
        validate_edge_subnet(subnet, settings, &mut scope);
    }
    if config.managed_subnet.is_some() {
        sink.scope(Field::ManagedSubnet).reject(
            ErrorCode::InvalidSubnet,
            "unexpected ManagedSubnet in EDGE mode",
        );
    }
}

fn validate_managed_mode(
    config: &NetworkConfiguration,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    {
        let mut scope = sink.scope(Field::ManagedSubnet);
        match &config.managed_subnet {
            Some(managed) => validate_managed_subnet(managed, settings, &mut scope),
            None => scope.reject(
                ErrorCode::Required,
                "a managed subnet is required in MANAGED modes",
            ),
        }
    }
    if !config.subnets.is_empty() {
        sink.scope(Field::Subnets).reject(
            ErrorCode::InvalidSubnet,
            "unexpected Subnets for non-EDGE mode",
        );
    }
}

/// Validate `config`, recording failures in `sink` under its current path
pub fn validate_network_configuration(
    config: &NetworkConfiguration,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    let kind = config.mode_kind();
    debug!("Validating network configuration ({kind:?} mode)...");

    validate_address_pools(config, settings, sink);
    apply_rules(config, ROOT_RULES, settings, sink);

    // clusters may only refer to global subnets in EDGE mode
    let mut declared = 0;
    let mut known: Vec<&str> = vec![];
    match kind {
        ModeKind::Overlay => validate_overlay_mode(config, settings, sink),
        ModeKind::Edge => {
            validate_edge_mode(config, settings, sink);
            declared = config.subnets.len();
            known.extend(config.subnet_identities());
        }
        ModeKind::Managed => validate_managed_mode(config, settings, sink),
    }

    for (index, cluster) in config.clusters.iter().enumerate() {
        let mut scope = sink.scope_indexed(Field::Clusters, index);
        validate_cluster(cluster, declared, &known, settings, &mut scope);
    }
}

/// Validate `config` with the given settings and return every failure found, in the order
/// the checks ran. An empty list means the configuration is valid.
#[must_use]
pub fn validate_with(config: &NetworkConfiguration, settings: &ValidationSettings) -> Vec<Failure> {
    let mut sink = ErrorSink::new();
    validate_network_configuration(config, settings, &mut sink);
    sink.into_failures()
}

/// Validate `config` with the default settings
#[must_use]
pub fn validate(config: &NetworkConfiguration) -> Vec<Failure> {
    validate_with(config, &ValidationSettings::default())
}

impl NetworkConfiguration {
    /// Validate this configuration
    pub fn validate(&self) -> ConfigResult {
        let failures = validate(self);
        if failures.is_empty() {
            debug!("Network configuration is VALID:\n{self}");
            Ok(())
        } else {
            debug!(
                "Network configuration is INVALID:\n{}",
                crate::display::FailureList(&failures)
            );
            Err(ValidationErrors(failures))
        }
    }
}
