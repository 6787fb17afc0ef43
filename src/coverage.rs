// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Pairwise coverage word generation
//!
//! [pair_gen](crate::regular_expressions::Regex::pair_gen) produces a small
//! set of witness words exercising an expression, following the pairwise
//! string-generation strategy of Zheng et al., *String Generating for
//! Testing Regular Expressions* (The Computer Journal, 2020).
//!
//! Pairwise generation over a two-operand concatenation is the full cross
//! product of the operand witness sets. For a star, the inner witnesses are
//! greedily chained so that every witness appears immediately after every
//! other at least once, approximating pairwise coverage of the iteration
//! boundary; the chain covering is a best-effort heuristic, not a proven
//! guarantee.
//!

use std::collections::{BTreeMap, BTreeSet};

use crate::regular_expressions::{BaseRegex, Regex};
use crate::symbols::Word;

// Greedy chain covering: link inner witnesses so that every ordered pair
// of witnesses occurs at some iteration boundary.
fn chain_cover(uncovered: &BTreeSet<Word>) -> BTreeSet<Word> {
    let mut covered = uncovered.clone();
    let mut cross: BTreeMap<Word, BTreeSet<Word>> = uncovered
        .iter()
        .map(|w| (w.clone(), uncovered.clone()))
        .collect();

    for start in uncovered {
        let mut chain: Vec<Word> = vec![start.clone()];
        loop {
            let last = chain.last().expect("chain is never empty").clone();
            match cross.get_mut(&last) {
                None => {
                    let joined: Word = chain.iter().flatten().copied().collect();
                    covered.insert(joined);
                    break;
                }
                Some(successors) => {
                    let next = successors
                        .iter()
                        .next()
                        .expect("emptied entries are removed")
                        .clone();
                    successors.remove(&next);
                    if successors.is_empty() {
                        cross.remove(&last);
                    }
                    chain.push(next);
                }
            }
        }
    }
    covered
}

impl Regex {
    ///
    /// Pairwise coverage witness words
    ///
    /// Returns a set of words accepted by this expression that exercises
    /// its structure: both branches of every disjunction, presence and
    /// absence of every option, the prefix/suffix cross product of every
    /// concatenation, and chained repetitions of every star (including the
    /// empty repetition). Symbol leaves contribute their first accepted
    /// symbol.
    ///
    /// The result is empty only for expressions whose language is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    /// use symbolic_regex::symbols::word;
    ///
    /// let e = Regex::concat(
    ///     Regex::disj(Regex::atom('a' as u32), Regex::atom('b' as u32)),
    ///     Regex::atom('c' as u32),
    /// );
    /// let words = e.pair_gen();
    /// assert!(words.contains(&word("ac")));
    /// assert!(words.contains(&word("bc")));
    /// assert_eq!(words.len(), 2);
    /// ```
    pub fn pair_gen(&self) -> BTreeSet<Word> {
        match &self.expr {
            BaseRegex::Empty => BTreeSet::new(),
            BaseRegex::Epsilon | BaseRegex::Anchor(_) => {
                let mut words = BTreeSet::new();
                words.insert(Word::new());
                words
            }
            BaseRegex::Atom(_) | BaseRegex::Class(_) | BaseRegex::Any => {
                let mut words = BTreeSet::new();
                if let Some(c) = self.next_symbol(None) {
                    words.insert(vec![c]);
                }
                words
            }
            BaseRegex::Opt(a) => {
                let mut words = a.pair_gen();
                words.insert(Word::new());
                words
            }
            BaseRegex::Disj(a, b) => {
                let mut words = a.pair_gen();
                words.extend(b.pair_gen());
                words
            }
            BaseRegex::Concat(a, b) => {
                // pairwise generation for two arguments is the full cross
                // product of prefixes and suffixes
                let prefixes = a.pair_gen();
                let suffixes = b.pair_gen();
                let mut words = BTreeSet::new();
                for p in &prefixes {
                    for s in &suffixes {
                        let mut w = p.clone();
                        w.extend_from_slice(s);
                        words.insert(w);
                    }
                }
                words
            }
            BaseRegex::Star(a) => {
                let mut words = chain_cover(&a.pair_gen());
                words.insert(Word::new());
                words
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regular_expressions::{CharClass, ClassItem};
    use crate::symbols::{word, word_string};

    fn atom(c: char) -> Regex {
        Regex::atom(c as u32)
    }

    fn strings(words: &BTreeSet<Word>) -> BTreeSet<String> {
        words.iter().map(|w| word_string(w)).collect()
    }

    #[test]
    fn test_leaves() {
        assert!(Regex::empty().pair_gen().is_empty());

        let eps = Regex::epsilon().pair_gen();
        assert_eq!(eps.len(), 1);
        assert!(eps.contains(&Word::new()));

        assert_eq!(Regex::start_anchor().pair_gen(), eps);

        assert_eq!(strings(&atom('a').pair_gen()), ["a".to_string()].iter().cloned().collect());

        let digits = Regex::class(CharClass::new(
            vec![ClassItem::Range('0' as u32, '9' as u32)],
            false,
        ));
        assert_eq!(strings(&digits.pair_gen()), ["0".to_string()].iter().cloned().collect());

        let any = Regex::any().pair_gen();
        assert_eq!(any.len(), 1);
        assert!(any.contains(&word(" ")));
    }

    #[test]
    fn test_option_and_disjunction() {
        let e = Regex::opt(atom('a'));
        assert_eq!(strings(&e.pair_gen()), ["".to_string(), "a".to_string()].iter().cloned().collect());

        let e = Regex::disj(Regex::literal("ab"), Regex::literal("cd"));
        assert_eq!(
            strings(&e.pair_gen()),
            ["ab".to_string(), "cd".to_string()].iter().cloned().collect()
        );
    }

    #[test]
    fn test_concat_cross_product() {
        let e = Regex::concat(
            Regex::disj(atom('a'), atom('b')),
            Regex::disj(atom('c'), atom('d')),
        );
        assert_eq!(
            strings(&e.pair_gen()),
            ["ac", "ad", "bc", "bd"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_star_includes_empty_and_adjacencies() {
        let e = Regex::star(Regex::disj(atom('a'), atom('b')));
        let words = e.pair_gen();
        assert!(words.contains(&Word::new()));

        // every generated word is accepted
        for w in &words {
            assert!(e.accepts(w), "pair_gen produced a non-member {:?}", w);
        }

        // both iteration adjacencies are covered somewhere
        let has_pair = |x: u32, y: u32| {
            words
                .iter()
                .any(|w| w.windows(2).any(|pair| pair == [x, y]))
        };
        assert!(has_pair('a' as u32, 'b' as u32));
        assert!(has_pair('b' as u32, 'a' as u32));
        assert!(has_pair('a' as u32, 'a' as u32));
        assert!(has_pair('b' as u32, 'b' as u32));
    }

    #[test]
    fn test_star_of_empty() {
        let e = Regex::star(Regex::empty());
        let words = e.pair_gen();
        assert_eq!(words.len(), 1);
        assert!(words.contains(&Word::new()));
    }

    #[test]
    fn test_generated_words_are_members() {
        let samples = vec![
            Regex::star(Regex::concat(atom('a'), Regex::opt(atom('b')))),
            Regex::concat(Regex::star(atom('a')), Regex::disj(atom('b'), Regex::epsilon())),
            Regex::opt(Regex::star(Regex::disj(Regex::literal("ab"), atom('c')))),
        ];
        for e in &samples {
            for w in &e.pair_gen() {
                assert!(e.accepts(w), "{} does not accept generated {:?}", e, w);
                assert!(e.backtrack_accepts(w));
            }
        }
    }
}
