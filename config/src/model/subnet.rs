// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Subnets: the EDGE-mode subnets with explicit gateways and the managed subnet that MANAGED
//! modes cut into VLAN-indexed segments.

use ipnet::Ipv4Net;
use net::ipv4::{Ipv4Block, Netmask};
use net::segment::SegmentSize;
use net::vlan::{Vid, VlanRange};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::model::non_blank;

/// What all subnet flavors have in common
pub trait Subnet {
    fn name(&self) -> Option<&str>;
    fn subnet(&self) -> Option<&str>;
    fn netmask(&self) -> Option<&str>;

    /// The name of the subnet; its network address if it has no name
    fn identity(&self) -> Option<&str> {
        non_blank(self.name()).or_else(|| non_blank(self.subnet()))
    }

    /// The address block of the subnet, if its address and netmask are legal and aligned
    fn block(&self) -> Option<Ipv4Block> {
        let network = Ipv4Addr::from_str(self.subnet()?.trim()).ok()?;
        let netmask = Netmask::from_str(self.netmask()?).ok()?;
        Ipv4Block::new(network, netmask).ok()
    }
}

/// A subnet with a gateway, as used by EDGE mode globally or inline in a cluster
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EdgeSubnet {
    pub name: Option<String>,    /* defaults to the network address */
    pub subnet: Option<String>,  /* network address, dotted */
    pub netmask: Option<String>, /* dotted */
    pub gateway: Option<String>, /* dotted, inside the subnet */
}

impl EdgeSubnet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }
    #[must_use]
    pub fn set_subnet(mut self, subnet: &str) -> Self {
        self.subnet = Some(subnet.to_owned());
        self
    }
    #[must_use]
    pub fn set_netmask(mut self, netmask: &str) -> Self {
        self.netmask = Some(netmask.to_owned());
        self
    }
    #[must_use]
    pub fn set_gateway(mut self, gateway: &str) -> Self {
        self.gateway = Some(gateway.to_owned());
        self
    }

    /// Tell if this subnet only names one of `known` subnets, without defining anything of its
    /// own. Subnets carrying a name and local settings are not references.
    #[must_use]
    pub fn is_reference_to<S: AsRef<str>>(&self, known: &[S]) -> bool {
        let Some(name) = non_blank(self.name.as_deref()) else {
            return false;
        };
        known.iter().any(|k| k.as_ref() == name)
            && non_blank(self.subnet.as_deref()).is_none()
            && non_blank(self.netmask.as_deref()).is_none()
            && non_blank(self.gateway.as_deref()).is_none()
    }
}

impl Subnet for EdgeSubnet {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn subnet(&self) -> Option<&str> {
        self.subnet.as_deref()
    }
    fn netmask(&self) -> Option<&str> {
        self.netmask.as_deref()
    }
}

/// The single address block MANAGED modes allocate from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ManagedSubnet {
    pub name: Option<String>,
    pub subnet: Option<String>,
    pub netmask: Option<String>,
    pub min_vlan: Option<i64>,     /* defaults to 2 */
    pub max_vlan: Option<i64>,     /* defaults to 4095 */
    pub segment_size: Option<i64>, /* power of two in [16, 2048], defaults to 32 */
}

impl ManagedSubnet {
    pub const DEFAULT_MIN_VLAN: Vid = Vid::MIN;
    pub const DEFAULT_MAX_VLAN: Vid = Vid::MAX;
    pub const DEFAULT_SEGMENT_SIZE: SegmentSize = SegmentSize::DEFAULT;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }
    #[must_use]
    pub fn set_subnet(mut self, subnet: &str) -> Self {
        self.subnet = Some(subnet.to_owned());
        self
    }
    #[must_use]
    pub fn set_netmask(mut self, netmask: &str) -> Self {
        self.netmask = Some(netmask.to_owned());
        self
    }
    #[must_use]
    pub fn set_min_vlan(mut self, vlan: i64) -> Self {
        self.min_vlan = Some(vlan);
        self
    }
    #[must_use]
    pub fn set_max_vlan(mut self, vlan: i64) -> Self {
        self.max_vlan = Some(vlan);
        self
    }
    #[must_use]
    pub fn set_segment_size(mut self, size: i64) -> Self {
        self.segment_size = Some(size);
        self
    }

    /// The VLAN range in use, defaults applied. `None` if the configured bounds are illegal.
    #[must_use]
    pub fn vlan_range(&self) -> Option<VlanRange> {
        let min = self
            .min_vlan
            .map_or(Ok(Self::DEFAULT_MIN_VLAN), Vid::try_from)
            .ok()?;
        let max = self
            .max_vlan
            .map_or(Ok(Self::DEFAULT_MAX_VLAN), Vid::try_from)
            .ok()?;
        VlanRange::new(min, max).ok()
    }

    /// The segment size in use, default applied. `None` if the configured size is illegal.
    #[must_use]
    pub fn effective_segment_size(&self) -> Option<SegmentSize> {
        self.segment_size
            .map_or(Ok(Self::DEFAULT_SEGMENT_SIZE), SegmentSize::try_from)
            .ok()
    }

    /// The addresses of the segment mapped to `vid`. `None` if the subnet is not legal, if
    /// `vid` is outside of the VLAN range or if the segment does not fit in the subnet.
    #[must_use]
    pub fn segment(&self, vid: Vid) -> Option<Ipv4Net> {
        if !self.vlan_range()?.contains(vid) {
            return None;
        }
        self.block()?.segment(self.effective_segment_size()?, vid)
    }

    /// Number of segments actually usable: those fitting in the subnet and in the VLAN range
    #[must_use]
    pub fn usable_segments(&self) -> usize {
        let (Some(range), Some(block), Some(size)) = (
            self.vlan_range(),
            self.block(),
            self.effective_segment_size(),
        ) else {
            return 0;
        };
        range
            .iter()
            .filter(|vid| block.segment(size, *vid).is_some())
            .count()
    }
}

impl Subnet for ManagedSubnet {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn subnet(&self) -> Option<&str> {
        self.subnet.as_deref()
    }
    fn netmask(&self) -> Option<&str> {
        self.netmask.as_deref()
    }
}
