// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Contiguous IPv4 netmasks.

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// A contiguous IPv4 netmask.
///
/// Scanned from the most significant bit, the 32 bits of a `Netmask` are a (possibly empty)
/// run of ones followed by a (possibly empty) run of zeros. `0.0.0.0` and `255.255.255.255`
/// are both legal netmasks; `255.0.255.0` is not.
///
/// It is not possible to build a `Netmask` from an arbitrary address without going through
/// [`Netmask::new`], which enforces contiguity.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Netmask(Ipv4Addr);

/// Errors which can occur when building a [`Netmask`]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNetmask {
    /// The value is not an IP address at all
    #[error("'{0}' is not an IP address")]
    Syntax(String),
    /// Netmasks only exist for IPv4 in this model
    #[error("{0} is not an IPv4 address")]
    NotIpv4(IpAddr),
    /// The bits of the mask are not a run of ones followed by a run of zeros
    #[error("{0} is not a contiguous netmask")]
    NonContiguous(Ipv4Addr),
    /// Prefix lengths stop at 32
    #[error("prefix length {0} is too large for an IPv4 netmask")]
    PrefixTooLong(u8),
}

impl Netmask {
    /// The empty mask (`0.0.0.0`)
    pub const EMPTY: Netmask = Netmask(Ipv4Addr::UNSPECIFIED);
    /// The host mask (`255.255.255.255`)
    pub const HOST: Netmask = Netmask(Ipv4Addr::BROADCAST);

    /// Tell whether the given bit pattern is a contiguous netmask.
    ///
    /// A mask is contiguous iff its leading ones and its trailing zeros account for all of
    /// its 32 bits: there is exactly one transition from 1 to 0 when scanning from the high
    /// bit, and never a transition from 0 back to 1.
    #[must_use]
    pub const fn is_contiguous(bits: u32) -> bool {
        bits.leading_ones() + bits.trailing_zeros() == u32::BITS
    }

    /// Build a [`Netmask`] from an [`Ipv4Addr`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNetmask::NonContiguous`] if the bits of the address are not contiguous.
    pub fn new(mask: Ipv4Addr) -> Result<Netmask, InvalidNetmask> {
        if Netmask::is_contiguous(mask.to_bits()) {
            Ok(Netmask(mask))
        } else {
            Err(InvalidNetmask::NonContiguous(mask))
        }
    }

    /// Build a [`Netmask`] from a prefix length (`24` is `255.255.255.0`).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNetmask::PrefixTooLong`] if `len` is larger than 32.
    pub fn from_prefix_len(len: u8) -> Result<Netmask, InvalidNetmask> {
        match len {
            0 => Ok(Netmask::EMPTY),
            1..=32 => Ok(Netmask(Ipv4Addr::from_bits(
                u32::MAX << (u32::BITS - u32::from(len)),
            ))),
            _ => Err(InvalidNetmask::PrefixTooLong(len)),
        }
    }

    /// The raw bits of the mask
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0.to_bits()
    }

    /// The mask as an address
    #[must_use]
    pub const fn addr(self) -> Ipv4Addr {
        self.0
    }

    /// The number of leading one bits
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // leading_ones of a u32 is at most 32
    pub const fn prefix_len(self) -> u8 {
        self.bits().leading_ones() as u8
    }

    /// Number of addresses covered by a block using this mask (including the network address)
    #[must_use]
    pub const fn host_count(self) -> u64 {
        1u64 << (u32::BITS - self.bits().leading_ones())
    }
}

impl TryFrom<Ipv4Addr> for Netmask {
    type Error = InvalidNetmask;

    fn try_from(mask: Ipv4Addr) -> Result<Self, Self::Error> {
        Netmask::new(mask)
    }
}

impl TryFrom<IpAddr> for Netmask {
    type Error = InvalidNetmask;

    fn try_from(mask: IpAddr) -> Result<Self, Self::Error> {
        match mask {
            IpAddr::V4(mask) => Netmask::new(mask),
            IpAddr::V6(_) => Err(InvalidNetmask::NotIpv4(mask)),
        }
    }
}

impl FromStr for Netmask {
    type Err = InvalidNetmask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = IpAddr::from_str(s.trim()).map_err(|_| InvalidNetmask::Syntax(s.to_owned()))?;
        Netmask::try_from(addr)
    }
}

impl From<Netmask> for Ipv4Addr {
    fn from(mask: Netmask) -> Self {
        mask.0
    }
}

impl Display for Netmask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::ipv4::Netmask;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Netmask {
        fn generate<D: Driver>(u: &mut D) -> Option<Self> {
            let len = u.produce::<u8>()? % 33;
            Some(Netmask::from_prefix_len(len).unwrap_or_else(|e| unreachable!("{e:?}")))
        }
    }
}
