// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Aligned IPv4 address blocks and their VLAN-indexed segments.

use crate::ipv4::Netmask;
use crate::segment::SegmentSize;
use crate::vlan::Vid;
use ipnet::Ipv4Net;
use std::fmt::Display;
use std::net::Ipv4Addr;

/// An IPv4 network address together with its [`Netmask`].
///
/// The network address of an `Ipv4Block` is always aligned to its mask: no host bits are set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Block {
    network: Ipv4Addr,
    netmask: Netmask,
}

/// Errors which can occur when building an [`Ipv4Block`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBlock {
    /// The network address has bits set outside of its netmask
    #[error("{0} is not aligned to netmask {1}")]
    Unaligned(Ipv4Addr, Netmask),
}

impl Ipv4Block {
    /// Tell if `network` has no bits set outside of `netmask`, i.e. `network & netmask == network`.
    #[must_use]
    pub const fn is_aligned(network: Ipv4Addr, netmask: Netmask) -> bool {
        let bits = network.to_bits();
        bits & netmask.bits() == bits
    }

    /// Build a new [`Ipv4Block`]
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBlock::Unaligned`] if the network address is not aligned to the mask.
    pub fn new(network: Ipv4Addr, netmask: Netmask) -> Result<Ipv4Block, InvalidBlock> {
        if Ipv4Block::is_aligned(network, netmask) {
            Ok(Ipv4Block { network, netmask })
        } else {
            Err(InvalidBlock::Unaligned(network, netmask))
        }
    }

    /// The network address of this block
    #[must_use]
    pub const fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The netmask of this block
    #[must_use]
    pub const fn netmask(&self) -> Netmask {
        self.netmask
    }

    /// Number of addresses in this block
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.netmask.host_count()
    }

    /// Tell if `addr` is a usable host address of this block: it shares the network prefix
    /// and it is not the network address itself.
    #[must_use]
    pub const fn contains_host(&self, addr: Ipv4Addr) -> bool {
        let bits = addr.to_bits();
        let network = self.network.to_bits();
        bits != network && bits & self.netmask.bits() == network
    }

    /// Number of segments of the given size this block can hold.
    #[must_use]
    pub fn segment_count(&self, size: SegmentSize) -> u64 {
        self.size() / size.as_u64()
    }

    /// The segment of `size` addresses mapped to VLAN `vid`.
    ///
    /// Segments are laid out from the lowest to the highest address of the block and segment
    /// number `n` is mapped to VLAN id `n`. Returns `None` if that segment does not fit in
    /// the block.
    #[must_use]
    pub fn segment(&self, size: SegmentSize, vid: Vid) -> Option<Ipv4Net> {
        let index = u64::from(vid.as_u16());
        if index >= self.segment_count(size) {
            return None;
        }
        let offset = u32::try_from(index * size.as_u64()).ok()?;
        let start = self.network.to_bits().checked_add(offset)?;
        Ipv4Net::new(Ipv4Addr::from_bits(start), size.prefix_len()).ok()
    }
}

impl From<Ipv4Block> for Ipv4Net {
    fn from(block: Ipv4Block) -> Self {
        Ipv4Net::new(block.network, block.netmask.prefix_len())
            .unwrap_or_else(|_| unreachable!("netmask prefix length is at most 32"))
    }
}

impl Display for Ipv4Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.netmask.prefix_len())
    }
}
