// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Cluster network configuration model. This is the model of the configuration document: all
//! scalars are kept as supplied so that validation, and not loading, decides what is legal.

pub mod cluster;
pub mod midonet;
pub mod subnet;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumString, IntoStaticStr, VariantNames};

use cluster::Cluster;
use midonet::MidonetConfig;
use subnet::{EdgeSubnet, ManagedSubnet, Subnet};

/// The closed set of network modes a cloud may run in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
pub enum NetworkMode {
    /// Flat addressing from administrator-declared subnets with explicit gateways
    #[strum(serialize = "EDGE")]
    Edge,
    /// A managed subnet cut into VLAN-tagged segments
    #[strum(serialize = "MANAGED")]
    Managed,
    /// A managed subnet cut into segments, without VLAN tagging
    #[strum(serialize = "MANAGED-NOVLAN")]
    ManagedNoVlan,
    /// Addressing delegated to a Midonet overlay
    #[strum(serialize = "VPCMIDO")]
    VpcMido,
}

/// How a configuration is validated, depending on its mode
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Edge,
    Overlay,
    Managed,
}

impl NetworkMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
    #[must_use]
    pub fn kind(self) -> ModeKind {
        match self {
            NetworkMode::Edge => ModeKind::Edge,
            NetworkMode::VpcMido => ModeKind::Overlay,
            NetworkMode::Managed | NetworkMode::ManagedNoVlan => ModeKind::Managed,
        }
    }
}

/// Treat blank strings as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The network configuration of a whole cloud
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkConfiguration {
    pub mode: Option<String>,                /* one of NetworkMode, EDGE if absent */
    pub instance_dns_domain: Option<String>, /* domain of instance host names */
    pub instance_dns_servers: Vec<String>,   /* hosts */
    pub mac_prefix: Option<String>,          /* two hex bytes, XX:XX */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mido: Option<MidonetConfig>, /* overlay settings, VPCMIDO only */
    pub public_ips: Vec<String>,     /* addresses or address ranges */
    pub private_ips: Vec<String>,    /* addresses or address ranges */
    pub subnets: Vec<EdgeSubnet>,    /* EDGE only */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_subnet: Option<ManagedSubnet>, /* MANAGED modes only */
    pub clusters: Vec<Cluster>,
}

impl NetworkConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_owned());
        self
    }
    #[must_use]
    pub fn set_instance_dns_domain(mut self, domain: &str) -> Self {
        self.instance_dns_domain = Some(domain.to_owned());
        self
    }
    #[must_use]
    pub fn add_instance_dns_server(mut self, server: &str) -> Self {
        self.instance_dns_servers.push(server.to_owned());
        self
    }
    #[must_use]
    pub fn set_mac_prefix(mut self, prefix: &str) -> Self {
        self.mac_prefix = Some(prefix.to_owned());
        self
    }
    #[must_use]
    pub fn set_mido(mut self, mido: MidonetConfig) -> Self {
        self.mido = Some(mido);
        self
    }
    #[must_use]
    pub fn add_public_ip(mut self, ip: &str) -> Self {
        self.public_ips.push(ip.to_owned());
        self
    }
    #[must_use]
    pub fn add_private_ip(mut self, ip: &str) -> Self {
        self.private_ips.push(ip.to_owned());
        self
    }
    #[must_use]
    pub fn add_subnet(mut self, subnet: EdgeSubnet) -> Self {
        self.subnets.push(subnet);
        self
    }
    #[must_use]
    pub fn set_managed_subnet(mut self, managed: ManagedSubnet) -> Self {
        self.managed_subnet = Some(managed);
        self
    }
    #[must_use]
    pub fn add_cluster(mut self, cluster: Cluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// The configured mode, if it is a recognized one. `None` if unset or unrecognized.
    #[must_use]
    pub fn network_mode(&self) -> Option<NetworkMode> {
        non_blank(self.mode.as_deref()).and_then(|mode| NetworkMode::from_str(mode).ok())
    }

    /// How this configuration must be validated. An absent mode means EDGE; tokens that are
    /// neither EDGE nor VPCMIDO, recognized or not, are handled as managed modes.
    #[must_use]
    pub fn mode_kind(&self) -> ModeKind {
        match non_blank(self.mode.as_deref()) {
            None => ModeKind::Edge,
            Some(mode) => NetworkMode::from_str(mode).map_or(ModeKind::Managed, NetworkMode::kind),
        }
    }

    /// Identities of the globally declared subnets, in declaration order: their name, or their
    /// network address for subnets without a name.
    pub fn subnet_identities(&self) -> impl Iterator<Item = &str> {
        self.subnets.iter().filter_map(|subnet| subnet.identity())
    }

    /// Look up a cluster by name
    #[must_use]
    pub fn get_cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|cluster| cluster.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_classification() {
        let config = NetworkConfiguration::new();
        assert_eq!(config.mode_kind(), ModeKind::Edge);
        assert_eq!(config.network_mode(), None);

        let config = NetworkConfiguration::new().set_mode("  ");
        assert_eq!(config.mode_kind(), ModeKind::Edge);

        let cases = [
            ("EDGE", ModeKind::Edge),
            ("VPCMIDO", ModeKind::Overlay),
            ("MANAGED", ModeKind::Managed),
            ("MANAGED-NOVLAN", ModeKind::Managed),
            ("SYSTEM", ModeKind::Managed),
            ("edge", ModeKind::Managed),
        ];
        for (mode, kind) in cases {
            assert_eq!(NetworkConfiguration::new().set_mode(mode).mode_kind(), kind, "{mode}");
        }
        assert_eq!(
            NetworkConfiguration::new().set_mode("MANAGED-NOVLAN").network_mode(),
            Some(NetworkMode::ManagedNoVlan)
        );
    }

    #[test]
    fn mode_tokens() {
        assert_eq!(
            NetworkMode::VARIANTS,
            &["EDGE", "MANAGED", "MANAGED-NOVLAN", "VPCMIDO"]
        );
        assert_eq!(NetworkMode::VpcMido.as_str(), "VPCMIDO");
    }

    #[test]
    fn subnet_identities_fall_back_to_address() {
        let config = NetworkConfiguration::new()
            .add_subnet(EdgeSubnet::new().set_name("sub0").set_subnet("10.0.0.0"))
            .add_subnet(EdgeSubnet::new().set_subnet("10.1.0.0"))
            .add_subnet(EdgeSubnet::new().set_name(" ").set_subnet("10.2.0.0"))
            .add_subnet(EdgeSubnet::new());
        let ids: Vec<_> = config.subnet_identities().collect();
        assert_eq!(ids, vec!["sub0", "10.1.0.0", "10.2.0.0"]);
    }

    #[test]
    fn cluster_lookup() {
        let config = NetworkConfiguration::new()
            .add_cluster(Cluster::new("one"))
            .add_cluster(Cluster::new("two").set_mac_prefix("d0:0d"));
        assert_eq!(
            config.get_cluster("two").and_then(|c| c.mac_prefix.as_deref()),
            Some("d0:0d")
        );
        assert!(config.get_cluster("three").is_none());
    }
}
