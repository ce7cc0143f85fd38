// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree construction.

use thiserror::Error;

/// Result type alias using [`TreeError`].
pub type Result<T> = core::result::Result<T, TreeError>;

/// Errors reported by tree configuration and bulk loading.
///
/// Queries never fail: on an empty (or never-loaded) tree they report
/// "not found". Internal index inconsistencies are programming errors and
/// assert in debug builds rather than surfacing here.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The configured fan-out exceeds the hard per-node cap.
    #[error("max entries per node is {got}, hard limit is {max}")]
    FanoutTooLarge {
        /// Configured value.
        got: usize,
        /// Hard cap ([`crate::MAX_POSSIBLE_ENTRIES`]).
        max: usize,
    },

    /// The configured fan-out cannot form a branching tree.
    #[error("max entries per node is {got}, need at least 2")]
    FanoutTooSmall {
        /// Configured value.
        got: usize,
    },

    /// The tree is static and was already bulk loaded once.
    #[error("tree is static, cannot load twice")]
    AlreadyBuilt,
}
