// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Single addresses and address ranges as written in address pools (`10.0.0.1`,
//! `10.0.0.10-10.0.0.20`).

use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

/// An inclusive range of IP addresses of a single family.
///
/// A single address is a range whose start and end are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IpRange {
    start: IpAddr,
    end: IpAddr,
}

/// Errors which can occur when parsing an [`IpRange`]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIpRange {
    /// One of the ends is not an IP address
    #[error("'{0}' is not an IP address")]
    BadAddress(String),
    /// The two ends are of different IP families
    #[error("range mixes IPv4 and IPv6 addresses: {0} - {1}")]
    MixedFamilies(IpAddr, IpAddr),
    /// The range ends before it starts
    #[error("range is inverted: {0} is above {1}")]
    Inverted(IpAddr, IpAddr),
}

impl IpRange {
    /// Build a new [`IpRange`]
    ///
    /// # Errors
    ///
    /// Returns an error if the ends are of different families or if `start > end`.
    pub fn new(start: IpAddr, end: IpAddr) -> Result<IpRange, InvalidIpRange> {
        match (start, end) {
            (IpAddr::V4(_), IpAddr::V6(_)) | (IpAddr::V6(_), IpAddr::V4(_)) => {
                Err(InvalidIpRange::MixedFamilies(start, end))
            }
            _ if start > end => Err(InvalidIpRange::Inverted(start, end)),
            _ => Ok(IpRange { start, end }),
        }
    }

    /// First address of the range
    #[must_use]
    pub const fn start(&self) -> IpAddr {
        self.start
    }

    /// Last address of the range
    #[must_use]
    pub const fn end(&self) -> IpAddr {
        self.end
    }

    /// Tell if the range holds a single address
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl From<IpAddr> for IpRange {
    fn from(addr: IpAddr) -> Self {
        IpRange {
            start: addr,
            end: addr,
        }
    }
}

fn parse_addr(s: &str) -> Result<IpAddr, InvalidIpRange> {
    let s = s.trim();
    IpAddr::from_str(s).map_err(|_| InvalidIpRange::BadAddress(s.to_owned()))
}

impl FromStr for IpRange {
    type Err = InvalidIpRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((start, end)) => IpRange::new(parse_addr(start)?, parse_addr(end)?),
            None => Ok(IpRange::from(parse_addr(s)?)),
        }
    }
}

impl Display for IpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_addresses() {
        let range: IpRange = "10.0.0.1".parse().unwrap();
        assert!(range.is_single());
        assert_eq!(range.to_string(), "10.0.0.1");
        let range: IpRange = "2001:db8::1".parse().unwrap();
        assert!(range.is_single());
    }

    #[test]
    fn ranges() {
        let range: IpRange = "10.0.0.10-10.0.0.20".parse().unwrap();
        assert_eq!(range.start(), "10.0.0.10".parse::<IpAddr>().unwrap());
        assert_eq!(range.end(), "10.0.0.20".parse::<IpAddr>().unwrap());
        assert_eq!(range.to_string(), "10.0.0.10-10.0.0.20");
        assert!("10.0.0.10 - 10.0.0.20".parse::<IpRange>().is_ok());
        assert!("10.0.0.10-10.0.0.10".parse::<IpRange>().unwrap().is_single());
    }

    #[test]
    fn bad_ranges() {
        assert_eq!(
            "10.0.0.300".parse::<IpRange>().unwrap_err(),
            InvalidIpRange::BadAddress("10.0.0.300".to_owned())
        );
        assert_eq!(
            "10.0.0.1-".parse::<IpRange>().unwrap_err(),
            InvalidIpRange::BadAddress(String::new())
        );
        assert!(matches!(
            "10.0.0.1-::1".parse::<IpRange>(),
            Err(InvalidIpRange::MixedFamilies(_, _))
        ));
        assert!(matches!(
            "10.0.0.20-10.0.0.10".parse::<IpRange>(),
            Err(InvalidIpRange::Inverted(_, _))
        ));
        assert!("10.0.0.1-10.0.0.2-10.0.0.3".parse::<IpRange>().is_err());
    }
}
