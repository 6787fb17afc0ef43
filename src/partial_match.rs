// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Partial-match rewriting
//!
//! A regular expression normally describes complete words. The rewrite in
//! this module produces an expression that matches anywhere inside
//! surrounding text: for every word `w` of the original language and any
//! texts `p`, `s`, the rewritten expression accepts `p·w·s` — except where
//! an anchor pins part of the expression to a true text boundary, in which
//! case that boundary constraint is preserved exactly.
//!
//! The rewrite is defined by four mutually recursive modes (see
//! [RewriteMode]): each mode states whether the current node's left edge
//! may coincide with the true start of the text and whether its right edge
//! may coincide with the true end. Concatenation splits the modes between
//! its children; a star without anchors is padded with `@any*`; anchors are
//! legal only in modes that can reach their boundary, otherwise the rewrite
//! fails with an [Error](crate::errors::Error).
//!

use crate::errors::Error;
use crate::regular_expressions::{AnchorKind, BaseRegex, Regex};

///
/// Rewrite context of a node
///
/// `Start` refers to the true start of the text, `End` to its true end.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RewriteMode {
    /// The node's left edge may be the start and its right edge may be the end
    Both,
    /// Only the left edge may touch a boundary (the start)
    StartOnly,
    /// Only the right edge may touch a boundary (the end)
    EndOnly,
    /// Neither edge may touch a boundary
    Neither,
}

// @any* e @any*
fn pad_both(e: Regex) -> Regex {
    Regex::concat(Regex::concat(Regex::any_star(), e), Regex::any_star())
}

// @any* e
fn pad_left(e: Regex) -> Regex {
    Regex::concat(Regex::any_star(), e)
}

// e @any*
fn pad_right(e: Regex) -> Regex {
    Regex::concat(e, Regex::any_star())
}

impl Regex {
    ///
    /// Rewrite this expression for partial matching
    ///
    /// Returns a fresh tree accepting `p·w·s` for every word `w` of this
    /// expression's language and arbitrary surrounding texts `p` and `s`,
    /// with anchored sub-expressions still pinned to their boundaries.
    ///
    /// The result is tagged, and calling `partial_match` on it again fails
    /// with [Error::RewriteAlreadyApplied]; use
    /// [force_partial_match](Self::force_partial_match) to override.
    ///
    /// # Errors
    ///
    /// An anchor reached in a mode that cannot satisfy it (e.g. an end
    /// anchor strictly inside a concatenation) fails with the
    /// corresponding anchor error.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    /// use symbolic_regex::symbols::word;
    ///
    /// let e = Regex::literal("ab").partial_match().unwrap();
    /// assert!(e.accepts(&word("xxabyy")));
    /// assert!(!e.accepts(&word("xxayy")));
    /// ```
    pub fn partial_match(&self) -> Result<Regex, Error> {
        if self.pm_applied {
            return Err(Error::RewriteAlreadyApplied);
        }
        self.force_partial_match()
    }

    /// Re-apply the partial-match rewrite regardless of the tag
    ///
    /// See [partial_match](Self::partial_match).
    pub fn force_partial_match(&self) -> Result<Regex, Error> {
        let mut result = self.rewrite(RewriteMode::Both)?;
        result.pm_applied = true;
        Ok(result)
    }

    ///
    /// Rewrite this expression under an explicit mode
    ///
    /// [partial_match](Self::partial_match) applies `RewriteMode::Both` at
    /// the root; the other modes arise in recursive positions.
    ///
    pub fn rewrite(&self, mode: RewriteMode) -> Result<Regex, Error> {
        use RewriteMode::*;

        match (&self.expr, mode) {
            // symbol leaves and epsilon: pad with @any* on the open sides
            (BaseRegex::Epsilon, _)
            | (BaseRegex::Atom(_), _)
            | (BaseRegex::Class(_), _)
            | (BaseRegex::Any, _) => Ok(match mode {
                Both => pad_both(self.clone()),
                StartOnly => pad_left(self.clone()),
                EndOnly => pad_right(self.clone()),
                Neither => self.clone(),
            }),

            // the empty set absorbs any padding
            (BaseRegex::Empty, _) => Ok(self.clone()),

            (BaseRegex::Anchor(AnchorKind::Start), Both) => {
                Ok(Regex::concat(self.clone(), Regex::any_star()))
            }
            (BaseRegex::Anchor(AnchorKind::Start), StartOnly) => Ok(self.clone()),
            (BaseRegex::Anchor(AnchorKind::Start), EndOnly) => Err(Error::StartAnchorAtEnd),
            (BaseRegex::Anchor(AnchorKind::End), Both) => {
                Ok(Regex::concat(Regex::any_star(), self.clone()))
            }
            (BaseRegex::Anchor(AnchorKind::End), EndOnly) => Ok(self.clone()),
            (BaseRegex::Anchor(AnchorKind::End), StartOnly) => Err(Error::EndAnchorAtStart),
            (BaseRegex::Anchor(_), Neither) => Err(Error::AnchorInside),

            (BaseRegex::Concat(a, b), Both) => {
                Ok(Regex::concat(a.rewrite(StartOnly)?, b.rewrite(EndOnly)?))
            }
            (BaseRegex::Concat(a, b), StartOnly) => {
                Ok(Regex::concat(a.rewrite(StartOnly)?, b.rewrite(Neither)?))
            }
            (BaseRegex::Concat(a, b), EndOnly) => {
                Ok(Regex::concat(a.rewrite(Neither)?, b.rewrite(EndOnly)?))
            }
            (BaseRegex::Concat(a, b), Neither) => {
                Ok(Regex::concat(a.rewrite(Neither)?, b.rewrite(Neither)?))
            }

            (BaseRegex::Disj(a, b), _) => Ok(Regex::disj(a.rewrite(mode)?, b.rewrite(mode)?)),

            (BaseRegex::Opt(a), _) => Ok(Regex::disj(a.rewrite(mode)?, Regex::epsilon())),

            // an inner repetition never touches a boundary
            (BaseRegex::Star(a), Neither) => Ok(Regex::star(a.rewrite(Neither)?)),
            // an anchored star can repeat at most once without violating
            // its anchors: keep one anchored copy or match nothing
            (BaseRegex::Star(a), _) if self.contains_anchor() => {
                Ok(Regex::disj(a.rewrite(mode)?, Regex::epsilon()))
            }
            (BaseRegex::Star(a), Both) => Ok(pad_both(Regex::star(a.rewrite(Neither)?))),
            (BaseRegex::Star(a), StartOnly) => Ok(pad_left(Regex::star(a.rewrite(Neither)?))),
            (BaseRegex::Star(a), EndOnly) => Ok(pad_right(Regex::star(a.rewrite(Neither)?))),
        }
    }
}
