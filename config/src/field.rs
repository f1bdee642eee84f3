// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Names of the fields validation failures are reported against.
//!
//! Variants are named after the fields of the model; the string each one renders to is the
//! name the field has in the configuration document (`InstanceDnsDomain`, `GatewayIP`, ...).

use strum::{EnumIter, IntoStaticStr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "PascalCase")]
pub enum Field {
    /* NetworkConfiguration */
    Mode,
    InstanceDnsDomain,
    InstanceDnsServers,
    MacPrefix,
    Mido,
    PublicIps,
    PrivateIps,
    Subnets,
    ManagedSubnet,
    Clusters,

    /* MidonetConfig */
    EucanetdHost,
    GatewayHost,
    #[strum(serialize = "GatewayIP")]
    GatewayIp,
    GatewayInterface,
    PublicNetwork,
    #[strum(serialize = "PublicGatewayIP")]
    PublicGatewayIp,

    /* subnets and clusters */
    Name,
    Subnet,
    Netmask,
    Gateway,
    MinVlan,
    MaxVlan,
    SegmentSize,
}

impl Field {
    /// The name of the field in the configuration document
    #[must_use]
    pub fn external_name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use strum::IntoEnumIterator;

    #[test]
    fn external_names() {
        assert_eq!(Field::InstanceDnsDomain.external_name(), "InstanceDnsDomain");
        assert_eq!(Field::GatewayIp.external_name(), "GatewayIP");
        assert_eq!(Field::PublicGatewayIp.external_name(), "PublicGatewayIP");
        assert_eq!(Field::MinVlan.external_name(), "MinVlan");
        assert_eq!(Field::Mido.external_name(), "Mido");
    }

    #[test]
    fn external_names_are_unique() {
        let mut names: Vec<_> = Field::iter().map(Field::external_name).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
