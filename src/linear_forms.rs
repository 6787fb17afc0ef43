// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Linear forms (Antimirov partial derivatives)
//!
//! The linear form of a regular expression R is a finite map from *head*
//! leaves to sets of *continuation* trees such that R is equivalent to the
//! sum of `head · tail` over all pairs. For example, the linear form of
//! `(ab + cd)*` maps `a` to `{ b(ab + cd)* }` and `c` to `{ d(ab + cd)* }`.
//!
//! Linear forms are the basis of derivative-based matching and of the
//! partial-derivative automaton constructions performed by an external
//! automata library. Each node caches its linear form after the first
//! computation; the cache is built bottom-up and a populated cache is never
//! recomputed.
//!
//! The derivative of R with respect to a symbol `c` is the union of the
//! continuations whose head accepts `c`: all words of R that start with
//! `c`, with `c` removed. [Regex::accepts] runs this simulation over a
//! whole word without materializing union trees.
//!

use std::collections::{HashMap, HashSet};

use crate::regular_expressions::{BaseRegex, Regex};
use crate::symbols::Symbol;

/// Linear form: head leaf to set of continuation trees
pub type LinearForm = HashMap<Regex, HashSet<Regex>>;

fn is_empty_node(re: &Regex) -> bool {
    matches!(re.expr, BaseRegex::Empty)
}

// Anchors match like epsilon, so they collapse like epsilon in tails.
fn is_epsilon_like(re: &Regex) -> bool {
    matches!(re.expr, BaseRegex::Epsilon | BaseRegex::Anchor(_))
}

// tail · rest, collapsing the empty set and empty-word tails
fn extend_tail(tail: &Regex, rest: &Regex) -> Regex {
    if is_empty_node(tail) {
        Regex::empty()
    } else if is_epsilon_like(tail) {
        rest.clone()
    } else {
        Regex::concat(tail.clone(), rest.clone())
    }
}

// key-wise union of src into dst
fn merge_into(dst: &mut LinearForm, src: &LinearForm) {
    for (head, tails) in src {
        dst.entry(head.clone())
            .or_insert_with(HashSet::new)
            .extend(tails.iter().cloned());
    }
}

impl Regex {
    ///
    /// The linear form of this expression
    ///
    /// Computed on first use and cached for the lifetime of the node.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    ///
    /// let e = Regex::star(Regex::literal("ab"));
    /// let lf = e.linear_form();
    ///
    /// // one head: the atom 'a'; one continuation: b(ab)*
    /// assert_eq!(lf.len(), 1);
    /// let tails = &lf[&Regex::atom('a' as u32)];
    /// assert!(tails.contains(&Regex::concat(Regex::atom('b' as u32), e.clone())));
    /// ```
    pub fn linear_form(&self) -> &LinearForm {
        self.lf.get_or_init(|| self.compute_linear_form())
    }

    fn compute_linear_form(&self) -> LinearForm {
        match &self.expr {
            BaseRegex::Empty | BaseRegex::Epsilon | BaseRegex::Anchor(_) => LinearForm::new(),
            BaseRegex::Atom(_) | BaseRegex::Class(_) | BaseRegex::Any => {
                let mut tails = HashSet::new();
                tails.insert(Regex::epsilon());
                let mut lf = LinearForm::new();
                lf.insert(self.clone(), tails);
                lf
            }
            BaseRegex::Concat(a, b) => {
                let mut lf = LinearForm::new();
                for (head, tails) in a.linear_form() {
                    let set: HashSet<Regex> = tails.iter().map(|t| extend_tail(t, b)).collect();
                    lf.insert(head.clone(), set);
                }
                if a.nullable() {
                    merge_into(&mut lf, b.linear_form());
                }
                lf
            }
            BaseRegex::Star(a) => {
                let mut lf = LinearForm::new();
                for (head, tails) in a.linear_form() {
                    // the continuation is "tail, then retry the whole star"
                    let set: HashSet<Regex> = tails.iter().map(|t| extend_tail(t, self)).collect();
                    lf.insert(head.clone(), set);
                }
                lf
            }
            BaseRegex::Disj(a, b) => {
                let mut lf = a.linear_form().clone();
                merge_into(&mut lf, b.linear_form());
                lf
            }
            BaseRegex::Opt(a) => a.linear_form().clone(),
        }
    }

    ///
    /// Derivative with respect to a symbol
    ///
    /// The derivative of R with respect to `x` is an expression S such that
    /// `L(S) = { w | x·w ∈ L(R) }`. Leaves reduce to epsilon or the empty
    /// set; compound expressions return the disjunction of their
    /// linear-form continuations under heads accepting `x`.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    ///
    /// let e = Regex::literal("ab");
    /// assert_eq!(e.derivative('a' as u32), Regex::atom('b' as u32));
    /// assert_eq!(e.derivative('b' as u32), Regex::empty());
    /// ```
    pub fn derivative(&self, x: Symbol) -> Regex {
        match &self.expr {
            BaseRegex::Empty | BaseRegex::Epsilon | BaseRegex::Anchor(_) => Regex::empty(),
            BaseRegex::Atom(_) | BaseRegex::Class(_) | BaseRegex::Any => {
                if self.accepts_symbol(x) {
                    Regex::epsilon()
                } else {
                    Regex::empty()
                }
            }
            _ => {
                let mut parts: Vec<Regex> = Vec::new();
                for (head, tails) in self.linear_form() {
                    if head.accepts_symbol(x) {
                        for t in tails {
                            if !is_empty_node(t) && !parts.contains(t) {
                                parts.push(t.clone());
                            }
                        }
                    }
                }
                // hash-map order is arbitrary; sort for a stable result
                parts.sort_by_key(|t| t.to_string());
                let mut iter = parts.into_iter();
                match iter.next() {
                    None => Regex::empty(),
                    Some(first) => iter.fold(first, Regex::disj),
                }
            }
        }
    }

    ///
    /// Derivative-based membership test
    ///
    /// Simulates the set of partial derivatives through the word: linear in
    /// the word length for a fixed expression. This is the matcher the
    /// backtracking simulator (see [backtracking](crate::backtracking)) is
    /// compared against.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    /// use symbolic_regex::symbols::word;
    ///
    /// // (ac + bc)*
    /// let e = Regex::star(Regex::disj(Regex::literal("ac"), Regex::literal("bc")));
    /// assert!(e.accepts(&word("acbcac")));
    /// assert!(!e.accepts(&word("acb")));
    /// ```
    pub fn accepts(&self, w: &[Symbol]) -> bool {
        let mut states: HashSet<Regex> = HashSet::new();
        states.insert(self.clone());
        for &c in w {
            let mut next: HashSet<Regex> = HashSet::new();
            for state in &states {
                for (head, tails) in state.linear_form() {
                    if head.accepts_symbol(c) {
                        for t in tails {
                            if !is_empty_node(t) {
                                next.insert(t.clone());
                            }
                        }
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            states = next;
        }
        states.iter().any(|s| s.nullable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regular_expressions::{CharClass, ClassItem};
    use crate::symbols::word;

    fn atom(c: char) -> Regex {
        Regex::atom(c as u32)
    }

    #[test]
    fn test_atom_linear_form() {
        let a = atom('a');
        let lf = a.linear_form();
        assert_eq!(lf.len(), 1);
        assert_eq!(lf[&atom('a')], {
            let mut s = HashSet::new();
            s.insert(Regex::epsilon());
            s
        });
    }

    #[test]
    fn test_concat_linear_form() {
        let e = Regex::literal("ab");
        let lf = e.linear_form();
        assert_eq!(lf.len(), 1);
        assert!(lf[&atom('a')].contains(&atom('b')));

        // nullable left operand contributes the right operand's heads
        let e = Regex::concat(Regex::opt(atom('a')), atom('b'));
        let lf = e.linear_form();
        assert_eq!(lf.len(), 2);
        assert!(lf[&atom('a')].contains(&atom('b')));
        assert!(lf[&atom('b')].contains(&Regex::epsilon()));
    }

    #[test]
    fn test_star_linear_form() {
        let e = Regex::star(Regex::disj(Regex::literal("ab"), Regex::literal("cd")));
        let lf = e.linear_form();
        assert_eq!(lf.len(), 2);
        assert!(lf[&atom('a')].contains(&Regex::concat(atom('b'), e.clone())));
        assert!(lf[&atom('c')].contains(&Regex::concat(atom('d'), e.clone())));
    }

    #[test]
    fn test_disj_merges_common_heads() {
        let e = Regex::disj(Regex::literal("ab"), Regex::literal("ac"));
        let lf = e.linear_form();
        assert_eq!(lf.len(), 1);
        let tails = &lf[&atom('a')];
        assert_eq!(tails.len(), 2);
        assert!(tails.contains(&atom('b')));
        assert!(tails.contains(&atom('c')));
    }

    #[test]
    fn test_opt_linear_form() {
        let e = Regex::opt(Regex::literal("ab"));
        assert_eq!(e.linear_form(), Regex::literal("ab").linear_form());
    }

    #[test]
    fn test_anchor_tail_collapses_like_epsilon() {
        // (a <AEND>) has head 'a' with the anchor tail collapsed away
        let e = Regex::concat(atom('a'), Regex::end_anchor());
        let lf = e.linear_form();
        let tails = &lf[&atom('a')];
        assert!(tails.contains(&Regex::end_anchor()) || tails.contains(&Regex::epsilon()));
    }

    #[test]
    fn test_memoized_once() {
        let e = Regex::star(Regex::literal("ab"));
        let first = e.linear_form() as *const LinearForm;
        let second = e.linear_form() as *const LinearForm;
        assert_eq!(first, second);
    }

    #[test]
    fn test_derivative_leaves() {
        assert_eq!(Regex::empty().derivative('a' as u32), Regex::empty());
        assert_eq!(Regex::epsilon().derivative('a' as u32), Regex::empty());
        assert_eq!(Regex::start_anchor().derivative('a' as u32), Regex::empty());
        assert_eq!(atom('a').derivative('a' as u32), Regex::epsilon());
        assert_eq!(atom('a').derivative('b' as u32), Regex::empty());
        assert_eq!(Regex::any().derivative('q' as u32), Regex::epsilon());

        let digits = Regex::class(CharClass::new(
            vec![ClassItem::Range('0' as u32, '9' as u32)],
            false,
        ));
        assert_eq!(digits.derivative('7' as u32), Regex::epsilon());
        assert_eq!(digits.derivative('a' as u32), Regex::empty());
    }

    #[test]
    fn test_derivative_compound() {
        let e = Regex::disj(Regex::literal("abc"), Regex::literal("acc"));
        let d = e.derivative('a' as u32);
        // 'bc + cc' up to operand order
        assert!(d.accepts(&word("bc")));
        assert!(d.accepts(&word("cc")));
        assert!(!d.accepts(&word("ab")));

        assert_eq!(e.derivative('x' as u32), Regex::empty());
    }

    #[test]
    fn test_derivative_agrees_with_linear_form() {
        let samples = vec![
            Regex::literal("ab"),
            Regex::star(Regex::disj(Regex::literal("ab"), Regex::literal("cd"))),
            Regex::concat(Regex::opt(atom('a')), atom('b')),
            Regex::disj(Regex::literal("a"), Regex::star(atom('b'))),
        ];
        let symbols = word("abcdx");
        for e in &samples {
            for &c in &symbols {
                let by_deriv = e.derivative(c).nullable();
                let by_lf = e.linear_form().iter().any(|(head, tails)| {
                    head.accepts_symbol(c) && tails.iter().any(|t| t.nullable())
                });
                assert_eq!(by_deriv, by_lf, "mismatch for {} at {}", e, c);
            }
        }
    }

    #[test]
    fn test_accepts() {
        let e = Regex::star(Regex::disj(Regex::literal("ac"), Regex::literal("bc")));
        assert!(e.accepts(&word("")));
        assert!(e.accepts(&word("acacbc")));
        assert!(!e.accepts(&word("acb")));
        assert!(!e.accepts(&word("x")));

        // the evil expression: linear-time here, exponential for backtracking
        let evil = Regex::star(Regex::disj(atom('a'), atom('a')));
        let mut w = word(&"a".repeat(30));
        assert!(evil.accepts(&w));
        w.push('b' as u32);
        assert!(!evil.accepts(&w));
    }
}
