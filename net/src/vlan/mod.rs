// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! VLAN ids used to index the segments of a managed subnet.

#[allow(unused_imports)] // conditional re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

use core::num::NonZero;
use std::fmt::Display;

/// A VLAN Identifier usable by a managed subnet.
///
/// Managed subnets map one VLAN to each of their segments. VLAN 0 means "untagged" and VLAN 1
/// is reserved for the untagged default network, so the legal range is `[2, 4095]`.
///
/// This type is marked `#[repr(transparent)]` so that [`Option<Vid>`] has the same size and
/// alignment as `u16`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vid(NonZero<u16>);

/// Errors which can occur when converting an integer to a validated [`Vid`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[must_use]
pub enum InvalidVid {
    /// 0 and 1 are reserved
    #[error("{0} is a reserved Vid (min is {MIN})", MIN = Vid::MIN)]
    Reserved(i64),
    /// The value is too large to be a legal [`Vid`]
    #[error("{0} is too large to be a legal Vid ({MAX} is max legal value)", MAX = Vid::MAX)]
    TooLarge(i64),
}

impl Vid {
    /// The minimum legal [`Vid`] value (2).
    #[allow(clippy::unwrap_used)] // safe due to const eval
    pub const MIN: Vid = Vid(NonZero::new(2).unwrap());

    /// The maximum legal [`Vid`] value (4095).
    #[allow(clippy::unwrap_used)] // safe due to const eval
    pub const MAX: Vid = Vid(NonZero::new(4095).unwrap());

    /// Create a new [`Vid`] from a `u16`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below [`Vid::MIN`] or above [`Vid::MAX`].
    pub fn new(vid: u16) -> Result<Self, InvalidVid> {
        Vid::try_from(i64::from(vid))
    }

    /// Get the value of the [`Vid`] as a `u16`.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<i64> for Vid {
    type Error = InvalidVid;

    fn try_from(raw: i64) -> Result<Vid, Self::Error> {
        if raw < i64::from(Vid::MIN.as_u16()) {
            return Err(InvalidVid::Reserved(raw));
        }
        if raw > i64::from(Vid::MAX.as_u16()) {
            return Err(InvalidVid::TooLarge(raw));
        }
        u16::try_from(raw)
            .ok()
            .and_then(NonZero::new)
            .map(Vid)
            .ok_or(InvalidVid::TooLarge(raw))
    }
}

impl From<Vid> for u16 {
    fn from(vid: Vid) -> u16 {
        vid.as_u16()
    }
}

impl Display for Vid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// An inclusive range of [`Vid`]s
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VlanRange {
    min: Vid,
    max: Vid,
}

/// Error returned for a [`VlanRange`] whose bounds are inverted
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("VLAN range is inverted: min {min} is larger than max {max}")]
pub struct InvalidVlanRange {
    /// lower bound supplied
    pub min: Vid,
    /// upper bound supplied
    pub max: Vid,
}

impl VlanRange {
    /// Build a new [`VlanRange`]
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVlanRange`] if `min > max`.
    pub fn new(min: Vid, max: Vid) -> Result<Self, InvalidVlanRange> {
        if min > max {
            Err(InvalidVlanRange { min, max })
        } else {
            Ok(VlanRange { min, max })
        }
    }

    /// Lower bound (inclusive)
    #[must_use]
    pub const fn min(&self) -> Vid {
        self.min
    }

    /// Upper bound (inclusive)
    #[must_use]
    pub const fn max(&self) -> Vid {
        self.max
    }

    /// Number of VLANs in the range
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.max.as_u16() - self.min.as_u16() + 1
    }

    /// A [`VlanRange`] is never empty; provided for clippy's `len_without_is_empty`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Tell if `vid` falls inside the range
    #[must_use]
    pub fn contains(&self, vid: Vid) -> bool {
        self.min <= vid && vid <= self.max
    }

    /// Iterate over the VLAN ids of the range, lowest first
    pub fn iter(&self) -> impl Iterator<Item = Vid> {
        (self.min.as_u16()..=self.max.as_u16()).filter_map(|raw| Vid::new(raw).ok())
    }
}

impl Default for VlanRange {
    fn default() -> Self {
        VlanRange {
            min: Vid::MIN,
            max: Vid::MAX,
        }
    }
}

impl Display for VlanRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::vlan::Vid;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Vid {
        fn generate<D: Driver>(u: &mut D) -> Option<Self> {
            let span = Vid::MAX.as_u16() - Vid::MIN.as_u16() + 1;
            let raw = Vid::MIN.as_u16() + u.produce::<u16>()? % span;
            Some(Vid::new(raw).unwrap_or_else(|e| unreachable!("{e:?}")))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vid_min_is_valid() {
        assert_eq!(Vid::MIN.as_u16(), 2);
        assert_eq!(Vid::MIN, Vid::new(2).unwrap());
    }

    #[test]
    fn vid_max_is_valid() {
        assert_eq!(Vid::MAX.as_u16(), 4095);
        assert_eq!(Vid::MAX, Vid::new(4095).unwrap());
    }

    #[test]
    fn reserved_vids_are_invalid() {
        assert_eq!(Vid::new(0).unwrap_err(), InvalidVid::Reserved(0));
        assert_eq!(Vid::new(1).unwrap_err(), InvalidVid::Reserved(1));
        assert_eq!(Vid::try_from(-5).unwrap_err(), InvalidVid::Reserved(-5));
    }

    #[test]
    fn vid_too_large_is_invalid() {
        assert_eq!(Vid::new(4096).unwrap_err(), InvalidVid::TooLarge(4096));
        assert_eq!(
            Vid::try_from(i64::MAX).unwrap_err(),
            InvalidVid::TooLarge(i64::MAX)
        );
    }

    #[test]
    fn vlan_range_ordering() {
        let low = Vid::new(10).unwrap();
        let high = Vid::new(5).unwrap();
        assert_eq!(
            VlanRange::new(low, high).unwrap_err(),
            InvalidVlanRange { min: low, max: high }
        );
        let range = VlanRange::new(high, low).unwrap();
        assert_eq!(range.len(), 6);
        assert!(range.contains(Vid::new(7).unwrap()));
        assert_eq!(range.iter().count(), 6);
        assert_eq!(VlanRange::default().len(), 4094);
    }

    #[test]
    fn vid_bounds_respected() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|raw: i64| match Vid::try_from(raw) {
                Ok(vid) => {
                    assert_eq!(i64::from(vid.as_u16()), raw);
                    assert!(Vid::MIN <= vid && vid <= Vid::MAX);
                }
                Err(InvalidVid::Reserved(x)) => {
                    assert_eq!(x, raw);
                    assert!(raw < 2);
                }
                Err(InvalidVid::TooLarge(x)) => {
                    assert_eq!(x, raw);
                    assert!(raw > 4095);
                }
            });
    }

    #[test]
    fn generated_vids_comply_with_contract() {
        bolero::check!().with_type().cloned().for_each(|vid: Vid| {
            assert!(VlanRange::default().contains(vid));
        });
    }
}
