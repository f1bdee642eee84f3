// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Network configuration model of a private cloud, and its validation. A
//! [`NetworkConfiguration`] is checked as a whole before it gets applied: [`validate`] walks
//! every field and returns the complete list of [`Failure`]s, each tagged with the dotted path
//! of the offending field (e.g. `Clusters[0].Subnet.Gateway`).

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod display;
pub mod errors;
pub mod field;
pub mod model;
pub mod settings;
pub mod validation;

pub use errors::{ConfigResult, ErrorCode, Failure, ValidationErrors, stringify}; // re-export
pub use model::{ModeKind, NetworkConfiguration, NetworkMode}; // re-export
pub use settings::ValidationSettings; // re-export
pub use validation::{validate, validate_with}; // re-export
