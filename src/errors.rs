// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Error codes
//!

use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
///
/// Error codes produced by the partial-match rewrite
///
pub enum Error {
    /// An end anchor `<AEND>` was reached in a context where the left edge
    /// must be the true start of the text (rewrite mode `StartOnly`).
    ///
    /// The original expression places the anchor somewhere the end of the
    /// text cannot be.
    EndAnchorAtStart,

    /// A start anchor `<ASTART>` was reached in a context where the right
    /// edge must be the true end of the text (rewrite mode `EndOnly`).
    StartAnchorAtEnd,

    /// An anchor was reached in a context where neither edge can touch a
    /// text boundary (rewrite mode `Neither`), e.g. an anchor nested
    /// between two consuming sub-expressions.
    AnchorInside,

    /// [partial_match][crate::regular_expressions::Regex::partial_match]
    /// was called on a tree that is itself the result of a partial-match
    /// rewrite.
    ///
    /// This is almost always a mistake: the rewrite is not idempotent. Use
    /// [force_partial_match][crate::regular_expressions::Regex::force_partial_match]
    /// to re-apply it anyway.
    RewriteAlreadyApplied,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::EndAnchorAtStart => "expected start of expression but found end anchor",
            Self::StartAnchorAtEnd => "expected end of expression but found start anchor",
            Self::AnchorInside => "neither anchor type allowed here",
            Self::RewriteAlreadyApplied => "partial-match rewrite already applied to this tree",
        }
        .fmt(f)
    }
}

impl std::error::Error for Error {}
