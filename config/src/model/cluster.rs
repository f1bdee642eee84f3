// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Per-cluster network overrides

use serde::{Deserialize, Serialize};

use crate::model::subnet::EdgeSubnet;

/// Network settings of one cluster. Cluster names are unique within a configuration; that is
/// up to whoever assembles the list of clusters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Cluster {
    pub name: Option<String>,       /* mandatory */
    pub mac_prefix: Option<String>, /* overrides the global MAC prefix */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<EdgeSubnet>, /* reference to a global subnet, or an inline subnet */
    pub private_ips: Vec<String>,   /* cluster-local private address pool */
}

impl Cluster {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            ..Default::default()
        }
    }
    #[must_use]
    pub fn set_mac_prefix(mut self, prefix: &str) -> Self {
        self.mac_prefix = Some(prefix.to_owned());
        self
    }
    #[must_use]
    pub fn set_subnet(mut self, subnet: EdgeSubnet) -> Self {
        self.subnet = Some(subnet);
        self
    }
    /// Refer to a globally declared subnet by its name (or address, if it has no name)
    #[must_use]
    pub fn set_subnet_ref(self, name: &str) -> Self {
        self.set_subnet(EdgeSubnet::new().set_name(name))
    }
    #[must_use]
    pub fn add_private_ip(mut self, ip: &str) -> Self {
        self.private_ips.push(ip.to_owned());
        self
    }
}
