// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Domain names and hosts (an IP literal or a domain name).

use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

/// A syntactically valid domain name.
///
/// The name is at most 253 characters long (ignoring a trailing dot) and made of dot-separated
/// labels of 1 to 63 ASCII letters, digits, hyphens or underscores. A label neither starts nor
/// ends with a hyphen or an underscore, and the final label starts with a letter, which rules
/// out IP literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(String);

/// Errors which can occur when parsing a [`DomainName`]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDomainName {
    /// Empty name
    #[error("domain name is empty")]
    Empty,
    /// Name is an IP address
    #[error("'{0}' is an IP address, not a domain name")]
    IpLiteral(String),
    /// Name is too long
    #[error("domain name is {0} characters long (max is {MAX})", MAX = DomainName::MAX_LEN)]
    TooLong(usize),
    /// One of the labels is empty or too long
    #[error("label '{0}' must be 1 to {MAX} characters long", MAX = DomainName::MAX_LABEL_LEN)]
    BadLabelLength(String),
    /// One of the labels has an illegal character or shape
    #[error("label '{0}' is not a valid domain name label")]
    BadLabel(String),
    /// The last label does not start with a letter
    #[error("top level label '{0}' must start with a letter")]
    BadTopLevel(String),
}

impl DomainName {
    /// Maximum length of a domain name
    pub const MAX_LEN: usize = 253;
    /// Maximum length of a label
    pub const MAX_LABEL_LEN: usize = 63;

    fn check_label(label: &str) -> Result<(), InvalidDomainName> {
        if label.is_empty() || label.len() > DomainName::MAX_LABEL_LEN {
            return Err(InvalidDomainName::BadLabelLength(label.to_owned()));
        }
        let legal_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        let legal_edge = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
        if !label.chars().all(legal_char)
            || !legal_edge(label.chars().next())
            || !legal_edge(label.chars().last())
        {
            return Err(InvalidDomainName::BadLabel(label.to_owned()));
        }
        Ok(())
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DomainName {
    type Err = InvalidDomainName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidDomainName::Empty);
        }
        if IpAddr::from_str(s).is_ok() {
            return Err(InvalidDomainName::IpLiteral(s.to_owned()));
        }
        let name = s.strip_suffix('.').unwrap_or(s);
        if name.len() > DomainName::MAX_LEN {
            return Err(InvalidDomainName::TooLong(name.len()));
        }
        let mut last = "";
        for label in name.split('.') {
            DomainName::check_label(label)?;
            last = label;
        }
        if !last.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(InvalidDomainName::BadTopLevel(last.to_owned()));
        }
        Ok(DomainName(s.to_owned()))
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A host: either an IP literal or a domain name
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Host {
    /// IP literal
    Ip(IpAddr),
    /// Domain name
    Domain(DomainName),
}

/// Error returned for strings which are neither an IP literal nor a domain name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("'{host}' is neither an IP address nor a domain name: {reason}")]
pub struct InvalidHost {
    /// The offending value
    pub host: String,
    /// Why it failed to parse as a domain name
    pub reason: InvalidDomainName,
}

impl FromStr for Host {
    type Err = InvalidHost;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(ip) = IpAddr::from_str(s) {
            return Ok(Host::Ip(ip));
        }
        DomainName::from_str(s)
            .map(Host::Domain)
            .map_err(|reason| InvalidHost {
                host: s.to_owned(),
                reason,
            })
    }
}

impl Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Host::Ip(ip) => write!(f, "{ip}"),
            Host::Domain(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn good_domain_names() {
        for name in [
            "cloud.example.com",
            "example.com.",
            "localdomain",
            "a-b.c_d.internal",
            "10-0-0-1.compute.internal",
        ] {
            assert!(name.parse::<DomainName>().is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn bad_domain_names() {
        assert_eq!("".parse::<DomainName>(), Err(InvalidDomainName::Empty));
        assert_eq!(
            "10.1.2.3".parse::<DomainName>(),
            Err(InvalidDomainName::IpLiteral("10.1.2.3".to_owned()))
        );
        assert_eq!(
            "a..b".parse::<DomainName>(),
            Err(InvalidDomainName::BadLabelLength(String::new()))
        );
        assert_eq!(
            "-a.com".parse::<DomainName>(),
            Err(InvalidDomainName::BadLabel("-a".to_owned()))
        );
        assert_eq!(
            "a b.com".parse::<DomainName>(),
            Err(InvalidDomainName::BadLabel("a b".to_owned()))
        );
        assert_eq!(
            "example.123".parse::<DomainName>(),
            Err(InvalidDomainName::BadTopLevel("123".to_owned()))
        );
        let long_label = "a".repeat(64);
        assert_eq!(
            format!("{long_label}.com").parse::<DomainName>(),
            Err(InvalidDomainName::BadLabelLength(long_label))
        );
        let long_name = ["abcdefghi"; 26].join(".");
        assert_eq!(
            long_name.parse::<DomainName>(),
            Err(InvalidDomainName::TooLong(long_name.len()))
        );
    }

    #[test]
    fn hosts() {
        assert_eq!(
            "10.0.0.1".parse::<Host>().unwrap(),
            Host::Ip("10.0.0.1".parse().unwrap())
        );
        assert!(matches!("::1".parse::<Host>(), Ok(Host::Ip(_))));
        assert!(matches!(
            "mido.example.com".parse::<Host>(),
            Ok(Host::Domain(_))
        ));
        let err = "10.0.0.999".parse::<Host>().unwrap_err();
        assert_eq!(err.host, "10.0.0.999");
        assert!("not a host".parse::<Host>().is_err());
    }
}
