// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Midonet overlay settings (VPCMIDO mode)

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MidonetConfig {
    pub eucanetd_host: Option<String>, /* host running the overlay control plane agent */
    pub gateway_host: Option<String>,  /* host acting as overlay gateway */
    #[serde(rename = "GatewayIP")]
    pub gateway_ip: Option<String>, /* address of the gateway on the public network */
    pub gateway_interface: Option<String>, /* interface of the gateway host */
    pub public_network: Option<String>, /* CIDR of the public network */
    #[serde(rename = "PublicGatewayIP")]
    pub public_gateway_ip: Option<String>, /* upstream router of the public network */
}

impl MidonetConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_eucanetd_host(mut self, host: &str) -> Self {
        self.eucanetd_host = Some(host.to_owned());
        self
    }
    #[must_use]
    pub fn set_gateway_host(mut self, host: &str) -> Self {
        self.gateway_host = Some(host.to_owned());
        self
    }
    #[must_use]
    pub fn set_gateway_ip(mut self, ip: &str) -> Self {
        self.gateway_ip = Some(ip.to_owned());
        self
    }
    #[must_use]
    pub fn set_gateway_interface(mut self, interface: &str) -> Self {
        self.gateway_interface = Some(interface.to_owned());
        self
    }
    #[must_use]
    pub fn set_public_network(mut self, cidr: &str) -> Self {
        self.public_network = Some(cidr.to_owned());
        self
    }
    #[must_use]
    pub fn set_public_gateway_ip(mut self, ip: &str) -> Self {
        self.public_gateway_ip = Some(ip.to_owned());
        self
    }
}
