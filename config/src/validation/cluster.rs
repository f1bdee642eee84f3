// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation of cluster entries

use tracing::debug;

use crate::errors::ErrorCode;
use crate::field::Field;
use crate::model::cluster::Cluster;
use crate::settings::ValidationSettings;
use crate::validation::primitive::{Check, FieldRule, apply_rules, check_each};
use crate::validation::sink::ErrorSink;
use crate::validation::subnet::validate_subnet_reference;

const CLUSTER_RULES: &[FieldRule<Cluster>] = &[
    FieldRule {
        field: Field::Name,
        value: |c| c.name.as_deref(),
        checks: &[Check::Required],
    },
    FieldRule {
        field: Field::MacPrefix,
        value: |c| c.mac_prefix.as_deref(),
        checks: &[Check::MacPrefix],
    },
];

/// Validate a [`Cluster`]. `declared` is the number of globally declared subnets: when there
/// is more than one of them a cluster has to say which one it uses. `known` holds the
/// identities a cluster subnet may refer to.
pub fn validate_cluster<S: AsRef<str>>(
    cluster: &Cluster,
    declared: usize,
    known: &[S],
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    debug!(
        "Validating cluster '{}'...",
        cluster.name.as_deref().unwrap_or("<unnamed>")
    );
    apply_rules(cluster, CLUSTER_RULES, settings, sink);

    match &cluster.subnet {
        None if declared > 1 => sink.scope(Field::Subnet).reject(
            ErrorCode::Required,
            format!("required when {declared} global subnets are declared"),
        ),
        None => {}
        Some(subnet) => {
            let mut scope = sink.scope(Field::Subnet);
            validate_subnet_reference(subnet, known, settings, &mut scope);
        }
    }

    check_each(
        Field::PrivateIps,
        &cluster.private_ips,
        Check::IpOrRange,
        settings,
        sink,
    );
}
