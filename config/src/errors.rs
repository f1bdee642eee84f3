// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Types for validation failures.
//! Validation never stops at the first problem: every failure found while walking a
//! [`NetworkConfiguration`] is recorded as a [`Failure`] tagged with the path of the offending
//! field. Callers wanting a `Result` get all of them at once in a [`ValidationErrors`].

#[cfg(doc)]
use crate::model::NetworkConfiguration;

use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

/// The kinds of failures a configuration may be rejected for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum ErrorCode {
    /// A mandatory field is missing or blank
    #[strum(serialize = "property.required")]
    Required,
    #[strum(serialize = "property.invalid.domain")]
    InvalidDomain,
    #[strum(serialize = "property.invalid.host")]
    InvalidHost,
    #[strum(serialize = "property.invalid.ip")]
    InvalidIp,
    /// An address pool entry is neither an address nor a range of addresses
    #[strum(serialize = "property.invalid.range")]
    InvalidRange,
    #[strum(serialize = "property.invalid.cidr")]
    InvalidCidr,
    /// A value does not match its expected pattern (MAC prefix, mode)
    #[strum(serialize = "property.invalid.regex")]
    InvalidRegex,
    #[strum(serialize = "property.invalid.netmask")]
    InvalidNetmask,
    /// Subnet/netmask misalignment, gateway outside of its subnet, or subnets declared in a
    /// mode that does not use them
    #[strum(serialize = "property.invalid.subnet")]
    InvalidSubnet,
    /// Managed subnet misalignment, illegal segment size or illegal VLAN bounds
    #[strum(serialize = "property.invalid.managedsubnet")]
    InvalidManagedSubnet,
}

impl ErrorCode {
    /// The external, dotted name of the code (e.g. `property.invalid.netmask`)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A single validation failure
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Failure {
    pub path: String,    /* dotted path of the field, e.g. Clusters[0].Subnet.Gateway */
    pub code: ErrorCode, /* kind of failure */
    pub message: String, /* human readable explanation */
}

impl Failure {
    #[must_use]
    pub fn new(path: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }
}

/// All the failures found when validating a configuration
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("network configuration is invalid ({} error(s))", .0.len())]
pub struct ValidationErrors(pub Vec<Failure>);

impl ValidationErrors {
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.0
    }
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.0
    }
}

/// Result-like type for configuration validation
pub type ConfigResult = Result<(), ValidationErrors>;

#[must_use]
pub fn stringify(conf_result: &ConfigResult) -> String {
    match conf_result {
        Ok(()) => "Ok".to_string(),
        Err(e) => format!("FAILED: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn codes_render_with_external_names() {
        assert_eq!(ErrorCode::Required.as_str(), "property.required");
        assert_eq!(ErrorCode::InvalidNetmask.as_str(), "property.invalid.netmask");
        assert_eq!(
            ErrorCode::InvalidManagedSubnet.as_str(),
            "property.invalid.managedsubnet"
        );
        assert_eq!(
            ErrorCode::from_str("property.invalid.range").unwrap(),
            ErrorCode::InvalidRange
        );
    }

    #[test]
    fn stringify_results() {
        assert_eq!(stringify(&Ok(())), "Ok");
        let errors = ValidationErrors(vec![Failure::new(
            "PublicIps",
            ErrorCode::Required,
            "required value missing",
        )]);
        let rendered = stringify(&Err(errors));
        assert_eq!(rendered, "FAILED: network configuration is invalid (1 error(s))");
    }
}
