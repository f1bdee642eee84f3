// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Path-tracked accumulator of validation failures.
//!
//! The sink keeps a stack of path segments that mirrors the position of the validator in the
//! configuration tree. Segments are normally pushed through [`ErrorSink::scope`] and
//! [`ErrorSink::scope_indexed`], whose guards pop them when dropped, whatever way the
//! enclosing validator returns.

use std::fmt::Write;
use std::ops::{Deref, DerefMut};
use tracing::warn;

use crate::errors::{ErrorCode, Failure};
use crate::field::Field;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Segment {
    Field(Field),
    Indexed(Field, usize),
}

/// Accumulates the failures of one validation run
#[derive(Debug, Default)]
pub struct ErrorSink {
    segments: Vec<Segment>,
    failures: Vec<Failure>,
}

impl ErrorSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, field: Field) {
        self.segments.push(Segment::Field(field));
    }
    pub fn push_indexed_segment(&mut self, field: Field, index: usize) {
        self.segments.push(Segment::Indexed(field, index));
    }
    pub fn pop_segment(&mut self) {
        if self.segments.pop().is_none() {
            warn!("Unbalanced pop of validation path segment");
        }
    }

    /// Push `field` for as long as the returned guard lives
    pub fn scope(&mut self, field: Field) -> PathScope<'_> {
        self.push_segment(field);
        PathScope { sink: self }
    }
    /// Push `field[index]` for as long as the returned guard lives
    pub fn scope_indexed(&mut self, field: Field, index: usize) -> PathScope<'_> {
        self.push_indexed_segment(field, index);
        PathScope { sink: self }
    }

    /// Dotted, externally named path of the current position, e.g. `Clusters[0].Subnet`
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::new();
        for (n, segment) in self.segments.iter().enumerate() {
            if n > 0 {
                path.push('.');
            }
            match segment {
                Segment::Field(field) => path.push_str(field.external_name()),
                Segment::Indexed(field, index) => {
                    let _ = write!(path, "{}[{index}]", field.external_name());
                }
            }
        }
        path
    }

    /// Record a failure at the current path
    pub fn reject(&mut self, code: ErrorCode, message: impl Into<String>) {
        let failure = Failure::new(self.path(), code, message);
        warn!(
            "{}: {} [{}]",
            failure.path,
            failure.message,
            failure.code.as_str()
        );
        self.failures.push(failure);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
    /// Number of failures recorded so far. Doubles as a mark for [`ErrorSink::has_errors_since`].
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }
    /// Tell if failures were recorded after `mark` was taken with [`ErrorSink::error_count`]
    #[must_use]
    pub fn has_errors_since(&self, mark: usize) -> bool {
        self.failures.len() > mark
    }

    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

/// Guard returned by [`ErrorSink::scope`]. Derefs to the sink; pops its segment on drop.
pub struct PathScope<'a> {
    sink: &'a mut ErrorSink,
}

impl Deref for PathScope<'_> {
    type Target = ErrorSink;
    fn deref(&self) -> &ErrorSink {
        self.sink
    }
}

impl DerefMut for PathScope<'_> {
    fn deref_mut(&mut self) -> &mut ErrorSink {
        self.sink
    }
}

impl Drop for PathScope<'_> {
    fn drop(&mut self) {
        self.sink.pop_segment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[test]
    fn paths_are_dotted_and_externally_named() {
        let mut sink = ErrorSink::new();
        assert_eq!(sink.path(), "");
        {
            let mut clusters = sink.scope_indexed(Field::Clusters, 0);
            let mut subnet = clusters.scope(Field::Subnet);
            let gateway = subnet.scope(Field::Gateway);
            assert_eq!(gateway.path(), "Clusters[0].Subnet.Gateway");
        }
        assert_eq!(sink.path(), "");
        let scope = sink.scope(Field::InstanceDnsDomain);
        assert_eq!(scope.path(), "InstanceDnsDomain");
    }

    #[test]
    fn scopes_pop_on_early_return() {
        fn nested(sink: &mut ErrorSink, fail: bool) -> Option<()> {
            let mut scope = sink.scope(Field::ManagedSubnet);
            let mut inner = scope.scope(Field::MinVlan);
            if fail {
                inner.reject(ErrorCode::InvalidManagedSubnet, "bad vlan");
                return None;
            }
            Some(())
        }
        let mut sink = ErrorSink::new();
        assert_eq!(nested(&mut sink, true), None);
        assert_eq!(sink.path(), "");
        assert_eq!(nested(&mut sink, false), Some(()));
        assert_eq!(sink.path(), "");
        assert_eq!(
            sink.failures(),
            &[Failure::new(
                "ManagedSubnet.MinVlan",
                ErrorCode::InvalidManagedSubnet,
                "bad vlan"
            )]
        );
    }

    #[traced_test]
    #[test]
    fn failures_are_kept_in_order_and_logged() {
        let mut sink = ErrorSink::new();
        let mark = sink.error_count();
        assert!(!sink.has_errors());
        sink.push_indexed_segment(Field::PublicIps, 2);
        sink.reject(ErrorCode::InvalidRange, "first");
        sink.pop_segment();
        sink.reject(ErrorCode::Required, "second");
        assert!(sink.has_errors());
        assert!(sink.has_errors_since(mark));
        assert!(!sink.has_errors_since(sink.error_count()));
        let failures = sink.into_failures();
        assert_eq!(failures[0].path, "PublicIps[2]");
        assert_eq!(failures[1].path, "");
        assert_eq!(failures[1].message, "second");
        assert!(logs_contain("PublicIps[2]: first [property.invalid.range]"));
    }

    #[traced_test]
    #[test]
    fn unbalanced_pop_is_harmless() {
        let mut sink = ErrorSink::new();
        sink.pop_segment();
        assert_eq!(sink.path(), "");
        assert!(logs_contain("Unbalanced pop"));
    }
}
