// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Backtracking simulation
//!
//! This module implements the membership algorithm used by most programming
//! language runtimes: recursively consume a prefix of the word at each node
//! and backtrack over every alternative. Worst-case cost is exponential in
//! the number of repetitions — intentionally so. The harness compares this
//! matcher against the derivative matcher
//! ([Regex::accepts](crate::regular_expressions::Regex::accepts)) on
//! pathological expressions such as `(a + a)*`, where backtracking takes
//! exponential time on words of the form `aⁿb` while the derivative
//! approach stays linear.
//!
//! The search is lazy: [backtrack_match](crate::regular_expressions::Regex::backtrack_match)
//! returns an iterator of leftover suffixes, and a caller can stop pulling
//! at any point to bound the work.
//!

use std::iter;

use crate::regular_expressions::{BaseRegex, Regex};
use crate::symbols::Symbol;

impl Regex {
    ///
    /// All leftover suffixes of `word` after matching a prefix
    ///
    /// Every way this expression can consume a prefix of `word` yields the
    /// remaining suffix, lazily and in backtracking order: disjunctions
    /// yield the left branch first, options yield the skip outcome first,
    /// and stars try longer repetitions before stopping.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    /// use symbolic_regex::symbols::word;
    ///
    /// let e = Regex::star(Regex::atom('a' as u32));
    /// let w = word("aab");
    /// let suffixes: Vec<_> = e.backtrack_match(&w).collect();
    /// assert_eq!(suffixes, vec![&w[2..], &w[1..], &w[..]]);
    /// ```
    pub fn backtrack_match<'a>(
        &'a self,
        word: &'a [Symbol],
    ) -> Box<dyn Iterator<Item = &'a [Symbol]> + 'a> {
        match &self.expr {
            BaseRegex::Empty => Box::new(iter::empty()),
            BaseRegex::Epsilon | BaseRegex::Anchor(_) => Box::new(iter::once(word)),
            BaseRegex::Atom(_) | BaseRegex::Class(_) | BaseRegex::Any => {
                if !word.is_empty() && self.accepts_symbol(word[0]) {
                    Box::new(iter::once(&word[1..]))
                } else {
                    Box::new(iter::empty())
                }
            }
            BaseRegex::Concat(a, b) => {
                let b: &'a Regex = b;
                Box::new(
                    a.backtrack_match(word)
                        .flat_map(move |rest| b.backtrack_match(rest)),
                )
            }
            BaseRegex::Disj(a, b) => {
                Box::new(a.backtrack_match(word).chain(b.backtrack_match(word)))
            }
            BaseRegex::Star(a) => {
                // only recurse on strictly shorter suffixes: an empty-width
                // repetition yields nothing the final outcome doesn't
                Box::new(
                    a.backtrack_match(word)
                        .filter(move |rest| rest.len() < word.len())
                        .flat_map(move |rest| self.backtrack_match(rest))
                        .chain(iter::once(word)),
                )
            }
            BaseRegex::Opt(a) => Box::new(iter::once(word).chain(a.backtrack_match(word))),
        }
    }

    ///
    /// Backtracking membership test
    ///
    /// True iff some suffix stream entry is empty, or the expression is
    /// nullable and the word is empty. Never errors: a non-match is simply
    /// an exhausted stream.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    /// use symbolic_regex::symbols::word;
    ///
    /// let e = Regex::star(Regex::disj(Regex::literal("ac"), Regex::literal("bc")));
    /// assert!(e.backtrack_accepts(&word("acbc")));
    /// assert!(!e.backtrack_accepts(&word("acb")));
    /// ```
    pub fn backtrack_accepts(&self, word: &[Symbol]) -> bool {
        if word.is_empty() {
            return self.nullable();
        }
        self.backtrack_match(word).any(|rest| rest.is_empty())
    }
}
