// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Checks of single scalar values, and tables binding them to the fields of an entity.
//!
//! A check does nothing for absent or blank values (that is what [`Check::Required`] is for)
//! and otherwise either accepts the value or records one failure at the current path.

use ipnet::IpNet;
use net::addr::{DomainName, Host, IpRange};
use net::ipv4::Netmask;
use regex::Regex;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;
use strum::VariantNames;

use crate::errors::ErrorCode;
use crate::field::Field;
use crate::model::{NetworkMode, non_blank};
use crate::settings::ValidationSettings;
use crate::validation::sink::ErrorSink;

/// Two hex bytes, e.g. `d0:0d`
pub const MAC_PREFIX_PATTERN: &str = "^[0-9A-Fa-f]{2}:[0-9A-Fa-f]{2}$";

static MAC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(MAC_PREFIX_PATTERN).unwrap_or_else(|e| unreachable!("bad MAC prefix regex: {e}"))
});

static MODE: LazyLock<Regex> = LazyLock::new(|| {
    let tokens: Vec<String> = NetworkMode::VARIANTS
        .iter()
        .map(|token| regex::escape(token))
        .collect();
    Regex::new(&format!("^(?:{})$", tokens.join("|")))
        .unwrap_or_else(|e| unreachable!("bad mode regex: {e}"))
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Check {
    Required,  /* present and not blank */
    Ip,        /* IPv4 or IPv6 literal */
    Host,      /* IP literal or domain name; may be disabled */
    Domain,    /* domain name, IP literals refused */
    Cidr,      /* address/prefix-length */
    Netmask,   /* IP literal with contiguous bits */
    IpOrRange, /* address or address range */
    MacPrefix, /* XX:XX */
    Mode,      /* one of the network mode tokens */
}

fn check_regex(regex: &Regex, value: &str, sink: &mut ErrorSink) {
    if !regex.is_match(value) {
        sink.reject(
            ErrorCode::InvalidRegex,
            format!("'{value}' does not match pattern {}", regex.as_str()),
        );
    }
}

fn check_ip(value: &str, sink: &mut ErrorSink) -> Option<IpAddr> {
    match IpAddr::from_str(value) {
        Ok(ip) => Some(ip),
        Err(_) => {
            sink.reject(
                ErrorCode::InvalidIp,
                format!("'{value}' is not a valid IP address"),
            );
            None
        }
    }
}

impl Check {
    /// Apply this check to `value`, recording failures in `sink` at its current path
    pub fn apply(self, value: Option<&str>, settings: &ValidationSettings, sink: &mut ErrorSink) {
        let Some(value) = non_blank(value) else {
            if self == Check::Required {
                sink.reject(ErrorCode::Required, "required value missing");
            }
            return;
        };
        match self {
            Check::Required => {}
            Check::Ip => {
                check_ip(value, sink);
            }
            Check::Host => {
                if !settings.host_check {
                    return;
                }
                if let Err(e) = Host::from_str(value) {
                    sink.reject(ErrorCode::InvalidHost, e.to_string());
                }
            }
            Check::Domain => {
                if let Err(e) = DomainName::from_str(value) {
                    sink.reject(
                        ErrorCode::InvalidDomain,
                        format!("'{value}' is not a valid domain name: {e}"),
                    );
                }
            }
            Check::Cidr => {
                if IpNet::from_str(value).is_err() {
                    sink.reject(
                        ErrorCode::InvalidCidr,
                        format!("'{value}' is not a valid CIDR block"),
                    );
                }
            }
            Check::Netmask => {
                if let Some(ip) = check_ip(value, sink)
                    && let Err(e) = Netmask::try_from(ip)
                {
                    sink.reject(ErrorCode::InvalidNetmask, format!("invalid netmask: {e}"));
                }
            }
            Check::IpOrRange => {
                if let Err(e) = IpRange::from_str(value) {
                    sink.reject(
                        ErrorCode::InvalidRange,
                        format!("'{value}' is not a valid IP address or range: {e}"),
                    );
                }
            }
            Check::MacPrefix => check_regex(&MAC_PREFIX, value, sink),
            Check::Mode => check_regex(&MODE, value, sink),
        }
    }
}

/// Binds a field of an entity of type `T` to the checks that apply to it
pub struct FieldRule<T> {
    pub field: Field,
    pub value: fn(&T) -> Option<&str>,
    pub checks: &'static [Check],
}

/// Apply a table of [`FieldRule`]s to `subject`, each field under its own path segment
pub fn apply_rules<T>(
    subject: &T,
    rules: &[FieldRule<T>],
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    for rule in rules {
        let mut scope = sink.scope(rule.field);
        let value = (rule.value)(subject);
        for check in rule.checks {
            check.apply(value, settings, &mut scope);
        }
    }
}

/// Check every entry of a list, under `field[index]`. Entries must not be blank.
pub fn check_each<S: AsRef<str>>(
    field: Field,
    values: &[S],
    check: Check,
    settings: &ValidationSettings,
    sink: &mut ErrorSink,
) {
    for (index, value) in values.iter().enumerate() {
        let mut scope = sink.scope_indexed(field, index);
        Check::Required.apply(Some(value.as_ref()), settings, &mut scope);
        check.apply(Some(value.as_ref()), settings, &mut scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Failure;
    use pretty_assertions::assert_eq;

    fn run(check: Check, value: Option<&str>) -> Vec<Failure> {
        run_with(check, value, &ValidationSettings::new().set_host_check(true))
    }

    fn run_with(check: Check, value: Option<&str>, settings: &ValidationSettings) -> Vec<Failure> {
        let mut sink = ErrorSink::new();
        {
            let mut scope = sink.scope(Field::Subnet);
            check.apply(value, settings, &mut scope);
        }
        sink.into_failures()
    }

    fn codes(check: Check, value: &str) -> Vec<ErrorCode> {
        run(check, Some(value)).into_iter().map(|f| f.code).collect()
    }

    #[test]
    fn absent_values_only_fail_required() {
        for check in [
            Check::Ip,
            Check::Host,
            Check::Domain,
            Check::Cidr,
            Check::Netmask,
            Check::IpOrRange,
            Check::MacPrefix,
            Check::Mode,
        ] {
            assert!(run(check, None).is_empty());
            assert!(run(check, Some("   ")).is_empty());
        }
        for value in [None, Some(""), Some(" \t")] {
            assert_eq!(
                run(Check::Required, value),
                vec![Failure::new(
                    "Subnet",
                    ErrorCode::Required,
                    "required value missing"
                )]
            );
        }
        assert!(run(Check::Required, Some("x")).is_empty());
    }

    #[test]
    fn ip_check() {
        assert!(codes(Check::Ip, "10.0.0.1").is_empty());
        assert!(codes(Check::Ip, "2001:db8::1").is_empty());
        assert_eq!(codes(Check::Ip, "10.0.0.256"), vec![ErrorCode::InvalidIp]);
        assert_eq!(codes(Check::Ip, "host.example.com"), vec![ErrorCode::InvalidIp]);
    }

    #[test]
    fn netmask_check() {
        for mask in ["255.255.255.0", "0.0.0.0", "255.255.255.255"] {
            assert!(codes(Check::Netmask, mask).is_empty(), "{mask}");
        }
        assert_eq!(
            codes(Check::Netmask, "255.0.255.0"),
            vec![ErrorCode::InvalidNetmask]
        );
        assert_eq!(codes(Check::Netmask, "ffff::"), vec![ErrorCode::InvalidNetmask]);
        assert_eq!(codes(Check::Netmask, "255.255.0"), vec![ErrorCode::InvalidIp]);
    }

    #[test]
    fn host_and_domain_checks() {
        assert!(codes(Check::Host, "10.0.0.1").is_empty());
        assert!(codes(Check::Host, "mido.example.com").is_empty());
        assert_eq!(codes(Check::Host, "mido host"), vec![ErrorCode::InvalidHost]);
        assert!(codes(Check::Domain, "cloud.internal").is_empty());
        assert_eq!(codes(Check::Domain, "10.0.0.1"), vec![ErrorCode::InvalidDomain]);
    }

    #[test]
    fn host_check_can_be_disabled() {
        let settings = ValidationSettings::new().set_host_check(false);
        assert!(run_with(Check::Host, Some("mido host"), &settings).is_empty());
        // the domain check is not affected
        assert_eq!(
            run_with(Check::Domain, Some("10.0.0.1"), &settings).len(),
            1
        );
    }

    #[test]
    fn cidr_and_range_checks() {
        assert!(codes(Check::Cidr, "203.0.113.0/24").is_empty());
        assert!(codes(Check::Cidr, "2001:db8::/32").is_empty());
        assert_eq!(codes(Check::Cidr, "203.0.113.0/33"), vec![ErrorCode::InvalidCidr]);
        assert_eq!(codes(Check::Cidr, "203.0.113.0"), vec![ErrorCode::InvalidCidr]);
        assert!(codes(Check::IpOrRange, "10.0.0.1").is_empty());
        assert!(codes(Check::IpOrRange, "10.0.0.1-10.0.0.9").is_empty());
        assert_eq!(
            codes(Check::IpOrRange, "10.0.0.9-10.0.0.1"),
            vec![ErrorCode::InvalidRange]
        );
        assert_eq!(codes(Check::IpOrRange, "ten"), vec![ErrorCode::InvalidRange]);
    }

    #[test]
    fn regex_checks() {
        assert!(codes(Check::MacPrefix, "d0:0D").is_empty());
        for prefix in ["d0:0", "d0-0d", "d0:0d:00", "g0:0d", " d0:0d"] {
            assert_eq!(codes(Check::MacPrefix, prefix), vec![ErrorCode::InvalidRegex]);
        }
        for mode in ["EDGE", "MANAGED", "MANAGED-NOVLAN", "VPCMIDO"] {
            assert!(codes(Check::Mode, mode).is_empty(), "{mode}");
        }
        for mode in ["edge", "SYSTEM", "EDGEX", "MANAGED-"] {
            assert_eq!(codes(Check::Mode, mode), vec![ErrorCode::InvalidRegex]);
        }
    }

    #[test]
    fn lists_report_indexed_paths() {
        let mut sink = ErrorSink::new();
        let values = ["10.0.0.1", "", "bogus"];
        check_each(
            Field::PublicIps,
            &values,
            Check::IpOrRange,
            &ValidationSettings::new(),
            &mut sink,
        );
        let failures: Vec<_> = sink
            .failures()
            .iter()
            .map(|f| (f.path.as_str(), f.code))
            .collect();
        assert_eq!(
            failures,
            vec![
                ("PublicIps[1]", ErrorCode::Required),
                ("PublicIps[2]", ErrorCode::InvalidRange)
            ]
        );
    }
}
