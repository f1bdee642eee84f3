// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display of model objects and validation failures

use std::fmt::Display;

use crate::errors::{ErrorCode, Failure};
use crate::field::Field;
use crate::model::NetworkConfiguration;
use crate::model::{NetworkMode, non_blank};
use crate::model::cluster::Cluster;
use crate::model::midonet::MidonetConfig;
use crate::model::subnet::{EdgeSubnet, ManagedSubnet, Subnet};

const NONE: &str = "--";

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or(NONE)
}

fn fmt_list(f: &mut std::fmt::Formatter<'_>, heading: &str, list: &[String]) -> std::fmt::Result {
    write!(f, " {heading:<20}:")?;
    if list.is_empty() {
        write!(f, " {NONE}")?;
    }
    for item in list {
        write!(f, " {item}")?;
    }
    writeln!(f)
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.external_name())
    }
}

impl Display for NetworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} [{}]", self.path, self.message, self.code)
    }
}

// Auxiliary type to display a list of failures, one per line
pub struct FailureList<'a>(pub &'a [Failure]);
impl Display for FailureList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (num, failure) in self.0.iter().enumerate() {
            writeln!(f, " {:>3}. {failure}", num + 1)?;
        }
        Ok(())
    }
}

/* ========= Subnets =========*/

macro_rules! SUBNET_TBL_FMT {
    () => {
        " {:<16} {:<16} {:<16} {:<16}"
    };
}
fn fmt_subnet_table_heading(f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(
        f,
        "{}",
        format_args!(SUBNET_TBL_FMT!(), "name", "subnet", "netmask", "gateway")
    )
}

impl Display for EdgeSubnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{}",
            format_args!(
                SUBNET_TBL_FMT!(),
                or_none(self.name.as_deref()),
                or_none(self.subnet.as_deref()),
                or_none(self.netmask.as_deref()),
                or_none(self.gateway.as_deref())
            )
        )
    }
}

impl Display for ManagedSubnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            " managed subnet {}: {}/{}",
            or_none(self.name.as_deref()),
            or_none(self.subnet.as_deref()),
            or_none(self.netmask.as_deref())
        )?;
        match self.vlan_range() {
            Some(range) => writeln!(f, "   vlans        : {range}")?,
            None => writeln!(f, "   vlans        : illegal")?,
        }
        match self.effective_segment_size() {
            Some(size) => writeln!(f, "   segment size : {size}")?,
            None => writeln!(f, "   segment size : illegal")?,
        }
        writeln!(f, "   segments     : {}", self.usable_segments())
    }
}

impl Display for MidonetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, " overlay:")?;
        writeln!(f, "   eucanetd host     : {}", or_none(self.eucanetd_host.as_deref()))?;
        writeln!(f, "   gateway host      : {}", or_none(self.gateway_host.as_deref()))?;
        writeln!(f, "   gateway ip        : {}", or_none(self.gateway_ip.as_deref()))?;
        writeln!(
            f,
            "   gateway interface : {}",
            or_none(self.gateway_interface.as_deref())
        )?;
        writeln!(f, "   public network    : {}", or_none(self.public_network.as_deref()))?;
        writeln!(
            f,
            "   public gateway ip : {}",
            or_none(self.public_gateway_ip.as_deref())
        )
    }
}

/* ========= Clusters =========*/

macro_rules! CLUSTER_TBL_FMT {
    () => {
        " {:<16} {:<8} {:<16} {}"
    };
}
fn fmt_cluster_table_heading(f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(
        f,
        "{}",
        format_args!(CLUSTER_TBL_FMT!(), "cluster", "mac", "subnet", "private ips")
    )
}

impl Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subnet = self.subnet.as_ref().and_then(|s| s.identity());
        let ips = if self.private_ips.is_empty() {
            NONE.to_owned()
        } else {
            self.private_ips.join(" ")
        };
        writeln!(
            f,
            "{}",
            format_args!(
                CLUSTER_TBL_FMT!(),
                or_none(self.name.as_deref()),
                or_none(self.mac_prefix.as_deref()),
                or_none(subnet),
                ips
            )
        )
    }
}

impl Display for NetworkConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match (self.network_mode(), non_blank(self.mode.as_deref())) {
            (Some(mode), _) => mode.to_string(),
            (None, Some(raw)) => format!("{raw} (unrecognized)"),
            (None, None) => format!("{:?} (default)", self.mode_kind()),
        };
        writeln!(f, " {:<20}: {mode}", "mode")?;
        writeln!(
            f,
            " {:<20}: {}",
            "dns domain",
            or_none(self.instance_dns_domain.as_deref())
        )?;
        fmt_list(f, "dns servers", &self.instance_dns_servers)?;
        writeln!(f, " {:<20}: {}", "mac prefix", or_none(self.mac_prefix.as_deref()))?;
        fmt_list(f, "public ips", &self.public_ips)?;
        fmt_list(f, "private ips", &self.private_ips)?;

        if !self.subnets.is_empty() {
            writeln!(f)?;
            fmt_subnet_table_heading(f)?;
            for subnet in &self.subnets {
                subnet.fmt(f)?;
            }
        }
        if let Some(managed) = &self.managed_subnet {
            writeln!(f)?;
            managed.fmt(f)?;
        }
        if let Some(mido) = &self.mido {
            writeln!(f)?;
            mido.fmt(f)?;
        }
        if !self.clusters.is_empty() {
            writeln!(f)?;
            fmt_cluster_table_heading(f)?;
            for cluster in &self.clusters {
                cluster.fmt(f)?;
            }
        }
        Ok(())
    }
}
