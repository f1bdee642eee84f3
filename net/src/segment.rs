// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Size of the VLAN-indexed segments a managed subnet is cut into.

use std::fmt::Display;

/// Number of contiguous addresses held by one managed-subnet segment.
///
/// A `SegmentSize` is a power of two in `[16, 2048]`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentSize(u32);

/// The constraints a [`SegmentSize`] may violate. A single value may violate several.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSegmentSize {
    /// Below [`SegmentSize::MIN`]
    #[error("segment size {0} is smaller than {MIN}", MIN = SegmentSize::MIN)]
    TooSmall(i64),
    /// Above [`SegmentSize::MAX`]
    #[error("segment size {0} is larger than {MAX}", MAX = SegmentSize::MAX)]
    TooLarge(i64),
    /// Not a power of two
    #[error("segment size {0} is not a power of two")]
    NotPowerOfTwo(i64),
}

impl SegmentSize {
    /// Smallest legal segment size
    pub const MIN: u32 = 16;
    /// Largest legal segment size
    pub const MAX: u32 = 2048;
    /// Segment size used when none is configured
    pub const DEFAULT: SegmentSize = SegmentSize(32);

    /// Every constraint violated by `size`, in the order min, max, power of two.
    #[must_use]
    pub fn violations(size: i64) -> Vec<InvalidSegmentSize> {
        let mut violations = Vec::new();
        if size < i64::from(SegmentSize::MIN) {
            violations.push(InvalidSegmentSize::TooSmall(size));
        }
        if size > i64::from(SegmentSize::MAX) {
            violations.push(InvalidSegmentSize::TooLarge(size));
        }
        if !u64::try_from(size).is_ok_and(u64::is_power_of_two) {
            violations.push(InvalidSegmentSize::NotPowerOfTwo(size));
        }
        violations
    }

    /// Build a new [`SegmentSize`]
    ///
    /// # Errors
    ///
    /// Returns the first constraint violated by `size`, if any.
    pub fn new(size: i64) -> Result<SegmentSize, InvalidSegmentSize> {
        match SegmentSize::violations(size).first() {
            Some(violation) => Err(*violation),
            None => u32::try_from(size)
                .map(SegmentSize)
                .map_err(|_| InvalidSegmentSize::TooLarge(size)),
        }
    }

    /// The size as a `u32`
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The size as a `u64`
    #[must_use]
    pub fn as_u64(self) -> u64 {
        u64::from(self.0)
    }

    /// Prefix length of a block holding exactly one segment (`32` addresses is a `/27`)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // trailing_zeros of a u32 is at most 32
    pub const fn prefix_len(self) -> u8 {
        (u32::BITS - self.0.trailing_zeros()) as u8
    }
}

impl Default for SegmentSize {
    fn default() -> Self {
        SegmentSize::DEFAULT
    }
}

impl TryFrom<i64> for SegmentSize {
    type Error = InvalidSegmentSize;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        SegmentSize::new(size)
    }
}

impl Display for SegmentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
