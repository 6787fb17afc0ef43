// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Regular expressions
//!
//! This module defines the abstract syntax of regular expressions
//! [BaseRegex] and the regular expression type [Regex]. A [Regex] owns its
//! children exclusively: the structure is a finite tree, never a DAG, and
//! two trees are equal iff they have the same shape and the same leaf
//! values.
//!
//! A [Regex] combines the abstract syntax with per-node attributes: an
//! optional *position* tag used by external automaton constructions (see
//! [marked](Regex::marked)) and a memoized linear form (see
//! [linear_forms](crate::linear_forms)). The memo cache is the only mutable
//! state; it is write-once and does not participate in equality.
//!
//! Leaf nodes implement the symbol-level queries needed by the matching and
//! generation algorithms: membership ([accepts_symbol](Regex::accepts_symbol)),
//! successor enumeration ([next_symbol](Regex::next_symbol)) and weighted
//! random sampling ([random_symbol](Regex::random_symbol)). Character
//! classes store their ranges in an
//! [IntervalSet](crate::interval_sets::IntervalSet).
//!

use std::fmt::Display;
use std::fmt::Write as _;
use std::hash::Hash;

use once_cell::unsync::OnceCell;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::interval_sets::IntervalSet;
use crate::linear_forms::LinearForm;
use crate::symbols::{atom_string, symbol_string, word, Symbol, FIRST_PRINTABLE, MAX_SYMBOL};

///
/// Anchor kinds
///
/// An anchor behaves like [Epsilon](BaseRegex::Epsilon) for matching but is
/// tied to the true start or end of the text. The partial-match rewrite
/// (see [partial_match](crate::partial_match)) must keep it adjacent to the
/// corresponding boundary.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum AnchorKind {
    /// `^` in programmer syntax; rendered `<ASTART>`
    Start,
    /// `$` in programmer syntax; rendered `<AEND>`
    End,
}

impl Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorKind::Start => write!(f, "<ASTART>"),
            AnchorKind::End => write!(f, "<AEND>"),
        }
    }
}

///
/// Element of a character-class description
///
/// Classes are built from single symbols and inclusive symbol ranges,
/// e.g. `[a-z0-9_]` is two ranges and one symbol.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ClassItem {
    /// A single symbol
    Symbol(Symbol),
    /// An inclusive range of symbols
    Range(Symbol, Symbol),
}

///
/// A character class: any single symbol inside (or, if negated, outside) a
/// set of inclusive ranges
///
/// # Example
///
/// ```
/// use symbolic_regex::regular_expressions::{CharClass, ClassItem};
///
/// let c = CharClass::new(vec![ClassItem::Range('a' as u32, 'z' as u32)], false);
/// assert!(c.accepts('g' as u32));
/// assert!(!c.accepts('0' as u32));
/// assert_eq!(c.to_string(), "[a-z]");
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct CharClass {
    ranges: IntervalSet<Symbol>,
    negated: bool,
}

impl CharClass {
    /// Build a class from a list of symbols and ranges
    ///
    /// # Panics
    ///
    /// If a range has its lower bound above its upper bound.
    pub fn new(items: impl IntoIterator<Item = ClassItem>, negated: bool) -> Self {
        let mut ranges = IntervalSet::new();
        for item in items {
            match item {
                ClassItem::Symbol(s) => ranges.add_element(s),
                ClassItem::Range(lo, hi) => ranges.add(lo, hi),
            }
        }
        CharClass { ranges, negated }
    }

    /// Build a class directly from an interval set
    pub fn from_ranges(ranges: IntervalSet<Symbol>, negated: bool) -> Self {
        CharClass { ranges, negated }
    }

    /// Whether the class is negated (`[^...]`)
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The underlying range set (negation not applied)
    pub fn ranges(&self) -> &IntervalSet<Symbol> {
        &self.ranges
    }

    /// Check whether `x` appears in the listed ranges, ignoring negation
    pub fn lists(&self, x: Symbol) -> bool {
        self.ranges.contains(x)
    }

    /// Check whether the class accepts the symbol `x`
    pub fn accepts(&self, x: Symbol) -> bool {
        self.lists(x) != self.negated
    }

    ///
    /// Smallest accepted symbol strictly greater than `current`
    ///
    /// With `current = None`, return the smallest accepted symbol: the
    /// start of the first range for a positive class, the first symbol at
    /// or above [FIRST_PRINTABLE] outside every range for a negated class.
    /// Negated classes never enumerate past [MAX_SYMBOL].
    ///
    pub fn next_symbol(&self, current: Option<Symbol>) -> Option<Symbol> {
        if !self.negated {
            let target = match current {
                None => return self.ranges.iter().next().map(|&(a, _)| a),
                Some(c) if c < MAX_SYMBOL => c + 1,
                Some(_) => return None,
            };
            let i = self.ranges.search(target);
            if i < self.ranges.len() {
                let (a, _) = self.ranges.get(i);
                Some(target.max(a))
            } else {
                None
            }
        } else {
            let mut n = match current {
                None => FIRST_PRINTABLE,
                Some(c) if c < MAX_SYMBOL => c + 1,
                Some(_) => return None,
            };
            loop {
                match self.ranges.index_of(n) {
                    None => return Some(n),
                    Some(i) => {
                        let (_, b) = self.ranges.get(i);
                        if b >= MAX_SYMBOL {
                            return None;
                        }
                        n = b + 1;
                    }
                }
            }
        }
    }

    ///
    /// Intersection with another class
    ///
    /// Returns `None` when the intersection accepts no symbol at all.
    /// Two negated classes combine by uniting their ranges
    /// (`¬A ∩ ¬B = ¬(A ∪ B)`); a mixed pair subtracts the negated ranges
    /// from the positive ones.
    ///
    pub fn intersect(&self, other: &CharClass) -> Option<CharClass> {
        if self.negated == other.negated {
            if self.negated {
                let mut union = self.ranges.clone();
                for &(a, b) in other.ranges.iter() {
                    union.add(a, b);
                }
                Some(CharClass {
                    ranges: union,
                    negated: true,
                })
            } else {
                let inter = self.ranges.intersection(&other.ranges);
                if inter.is_empty() {
                    None
                } else {
                    Some(CharClass {
                        ranges: inter,
                        negated: false,
                    })
                }
            }
        } else {
            let (pos, neg) = if self.negated {
                (other, self)
            } else {
                (self, other)
            };
            let mut ranges = pos.ranges.clone();
            for &(a, b) in neg.ranges.iter() {
                ranges.remove(a, b);
            }
            if ranges.is_empty() {
                None
            } else {
                Some(CharClass {
                    ranges,
                    negated: false,
                })
            }
        }
    }

    // Accepted ranges of a negated class within [FIRST_PRINTABLE, MAX_SYMBOL]
    fn gaps(&self) -> Vec<(Symbol, Symbol)> {
        let mut out = Vec::new();
        let mut n = FIRST_PRINTABLE;
        for &(a, b) in self.ranges.iter() {
            if b < n {
                continue;
            }
            if n < a {
                out.push((n, a - 1));
            }
            if b >= MAX_SYMBOL {
                return out;
            }
            n = b + 1;
        }
        out.push((n, MAX_SYMBOL));
        out
    }

    ///
    /// Random accepted symbol
    ///
    /// Ranges are weighted by their width, so every accepted symbol is
    /// equally likely. For a negated class the sample is drawn from the
    /// complement gaps within `[FIRST_PRINTABLE, MAX_SYMBOL]`.
    /// Returns `None` when the class accepts nothing in that domain.
    ///
    pub fn random_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Symbol> {
        let ranges: Vec<(Symbol, Symbol)> = if self.negated {
            self.gaps()
        } else {
            self.ranges.iter().copied().collect()
        };
        if ranges.is_empty() {
            return None;
        }
        let weights = ranges.iter().map(|&(a, b)| (b - a + 1) as u64);
        let dist = WeightedIndex::new(weights).ok()?;
        let (a, b) = ranges[dist.sample(rng)];
        Some(rng.gen_range(a..=b))
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        if self.negated {
            write!(f, "^")?;
        }
        for &(a, b) in self.ranges.iter() {
            if a == b {
                write!(f, "{}", symbol_string(a))?;
            } else {
                write!(f, "{}-{}", symbol_string(a), symbol_string(b))?;
            }
        }
        write!(f, "]")
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
///
/// Abstract syntax for regular expressions
///
pub enum BaseRegex {
    /// The empty language
    Empty,

    /// The language that contains only the empty word
    Epsilon,

    /// A zero-width assertion tied to a text boundary; matches like
    /// [Epsilon](BaseRegex::Epsilon)
    Anchor(AnchorKind),

    /// Exactly one specific symbol
    Atom(Symbol),

    /// Any single symbol in (or, if negated, outside) a set of ranges
    Class(CharClass),

    /// Any single symbol (the wildcard)
    Any,

    /// Concatenation of two languages
    Concat(Box<Regex>, Box<Regex>),

    /// Union of two languages
    Disj(Box<Regex>, Box<Regex>),

    /// Zero or more repetitions
    Star(Box<Regex>),

    /// Zero or one occurrence
    Opt(Box<Regex>),
}

///
/// Regular expression tree
///
/// A regular expression combines an abstract syntax tree of type
/// [BaseRegex] with per-node attributes:
/// - an optional position tag, set by [marked](Regex::marked) and consumed
///   by external position-based automaton constructions;
/// - the memoized linear form, computed lazily by
///   [linear_form](Regex::linear_form) and cached for the lifetime of the
///   node.
///
/// Equality and hashing are structural over the syntax and the position
/// tag. The memo cache never influences equality, and cloning a tree
/// produces an independent deep copy with an empty cache.
///
#[derive(Debug)]
pub struct Regex {
    /// Abstract syntax tree
    pub(crate) expr: BaseRegex,
    /// Marked position (automaton-construction hook)
    pub(crate) pos: Option<u32>,
    /// Set on trees produced by the partial-match rewrite
    pub(crate) pm_applied: bool,
    /// Memoized linear form
    pub(crate) lf: OnceCell<LinearForm>,
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr && self.pos == other.pos
    }
}

impl Eq for Regex {}

impl Hash for Regex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.expr.hash(state);
        self.pos.hash(state);
    }
}

impl Clone for Regex {
    fn clone(&self) -> Self {
        Regex {
            expr: self.expr.clone(),
            pos: self.pos,
            pm_applied: self.pm_applied,
            lf: OnceCell::new(),
        }
    }
}

impl Regex {
    pub(crate) fn make(expr: BaseRegex) -> Self {
        Regex {
            expr,
            pos: None,
            pm_applied: false,
            lf: OnceCell::new(),
        }
    }

    /// The empty language
    pub fn empty() -> Self {
        Self::make(BaseRegex::Empty)
    }

    /// The language containing only the empty word
    pub fn epsilon() -> Self {
        Self::make(BaseRegex::Epsilon)
    }

    /// An anchor of the given kind
    pub fn anchor(kind: AnchorKind) -> Self {
        Self::make(BaseRegex::Anchor(kind))
    }

    /// The start anchor `<ASTART>`
    pub fn start_anchor() -> Self {
        Self::anchor(AnchorKind::Start)
    }

    /// The end anchor `<AEND>`
    pub fn end_anchor() -> Self {
        Self::anchor(AnchorKind::End)
    }

    /// The language containing the one-symbol word `sym`
    pub fn atom(sym: Symbol) -> Self {
        Self::make(BaseRegex::Atom(sym))
    }

    /// A character class
    pub fn class(class: CharClass) -> Self {
        Self::make(BaseRegex::Class(class))
    }

    /// The wildcard: any single symbol
    pub fn any() -> Self {
        Self::make(BaseRegex::Any)
    }

    /// Concatenation `(e1 e2)`
    pub fn concat(e1: Regex, e2: Regex) -> Self {
        Self::make(BaseRegex::Concat(Box::new(e1), Box::new(e2)))
    }

    /// Disjunction `(e1 + e2)`
    pub fn disj(e1: Regex, e2: Regex) -> Self {
        Self::make(BaseRegex::Disj(Box::new(e1), Box::new(e2)))
    }

    /// Star closure `e*`
    pub fn star(e: Regex) -> Self {
        Self::make(BaseRegex::Star(Box::new(e)))
    }

    /// Option `e?`
    pub fn opt(e: Regex) -> Self {
        Self::make(BaseRegex::Opt(Box::new(e)))
    }

    /// `@any*`: the language of all words
    pub fn any_star() -> Self {
        Self::star(Self::any())
    }

    /// The language containing exactly the word `s`
    ///
    /// Builds a right-nested concatenation of atoms; the empty string
    /// yields [epsilon](Self::epsilon).
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    ///
    /// assert_eq!(Regex::literal("ab").to_string(), "(a b)");
    /// ```
    pub fn literal(s: &str) -> Self {
        let syms = word(s);
        match syms.split_last() {
            None => Self::epsilon(),
            Some((&last, rest)) => {
                let mut e = Self::atom(last);
                for &c in rest.iter().rev() {
                    e = Self::concat(Self::atom(c), e);
                }
                e
            }
        }
    }

    /// The abstract syntax tree of this expression
    pub fn expr(&self) -> &BaseRegex {
        &self.expr
    }

    /// The marked position of this node, if any
    pub fn position(&self) -> Option<u32> {
        self.pos
    }

    ///
    /// Empty-word property
    ///
    /// Check whether the language of this expression contains the empty
    /// word. Anchors count as nullable: they match without consuming.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    ///
    /// assert!(Regex::star(Regex::literal("ab")).nullable());
    /// assert!(!Regex::literal("ab").nullable());
    /// ```
    pub fn nullable(&self) -> bool {
        match &self.expr {
            BaseRegex::Empty => false,
            BaseRegex::Epsilon => true,
            BaseRegex::Anchor(_) => true,
            BaseRegex::Atom(_) => false,
            BaseRegex::Class(_) => false,
            BaseRegex::Any => false,
            BaseRegex::Concat(e1, e2) => e1.nullable() && e2.nullable(),
            BaseRegex::Disj(e1, e2) => e1.nullable() || e2.nullable(),
            BaseRegex::Star(_) => true,
            BaseRegex::Opt(_) => true,
        }
    }

    /// Check whether any descendant is an anchor
    pub fn contains_anchor(&self) -> bool {
        match &self.expr {
            BaseRegex::Anchor(_) => true,
            BaseRegex::Concat(e1, e2) | BaseRegex::Disj(e1, e2) => {
                e1.contains_anchor() || e2.contains_anchor()
            }
            BaseRegex::Star(e) | BaseRegex::Opt(e) => e.contains_anchor(),
            _ => false,
        }
    }

    /// Check whether this leaf accepts the symbol `x`
    ///
    /// Always false for non-symbol nodes: compound expressions accept
    /// words, not symbols.
    pub fn accepts_symbol(&self, x: Symbol) -> bool {
        match &self.expr {
            BaseRegex::Atom(s) => *s == x,
            BaseRegex::Class(c) => c.accepts(x),
            BaseRegex::Any => true,
            _ => false,
        }
    }

    ///
    /// Smallest accepted symbol strictly greater than `current`
    ///
    /// With `current = None`, the smallest accepted symbol overall. The
    /// wildcard starts at [FIRST_PRINTABLE]. Returns `None` for non-symbol
    /// nodes and when no accepted symbol remains.
    ///
    pub fn next_symbol(&self, current: Option<Symbol>) -> Option<Symbol> {
        match &self.expr {
            BaseRegex::Atom(s) => match current {
                None => Some(*s),
                Some(c) if c < *s => Some(*s),
                Some(_) => None,
            },
            BaseRegex::Class(c) => c.next_symbol(current),
            BaseRegex::Any => match current {
                None => Some(FIRST_PRINTABLE),
                Some(c) if c < MAX_SYMBOL => Some(c + 1),
                Some(_) => None,
            },
            _ => None,
        }
    }

    ///
    /// Random accepted symbol
    ///
    /// Atoms return their symbol; the wildcard samples uniformly from
    /// `[FIRST_PRINTABLE, MAX_SYMBOL]`; classes sample uniformly over
    /// their accepted symbols (see [CharClass::random_symbol]). `None`
    /// for non-symbol nodes.
    ///
    pub fn random_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Symbol> {
        match &self.expr {
            BaseRegex::Atom(s) => Some(*s),
            BaseRegex::Class(c) => c.random_symbol(rng),
            BaseRegex::Any => Some(rng.gen_range(FIRST_PRINTABLE..=MAX_SYMBOL)),
            _ => None,
        }
    }

    ///
    /// Copy of this tree with symbol leaves marked by position
    ///
    /// Positions are assigned left to right starting at 1. Returns the
    /// marked tree and the number of marked leaves. This is the input to
    /// position-based automaton constructions (Glushkov, follow, ...),
    /// which are performed by an external library.
    ///
    /// # Example
    ///
    /// ```
    /// use symbolic_regex::regular_expressions::Regex;
    ///
    /// let (m, n) = Regex::literal("ab").marked();
    /// assert_eq!(n, 2);
    /// assert_eq!(m.to_string(), "(marked(a, 1) marked(b, 2))");
    /// ```
    pub fn marked(&self) -> (Regex, u32) {
        fn walk(re: &Regex, next: &mut u32) -> Regex {
            match &re.expr {
                BaseRegex::Concat(a, b) => {
                    let left = walk(a, next);
                    let right = walk(b, next);
                    Regex::concat(left, right)
                }
                BaseRegex::Disj(a, b) => {
                    let left = walk(a, next);
                    let right = walk(b, next);
                    Regex::disj(left, right)
                }
                BaseRegex::Star(a) => Regex::star(walk(a, next)),
                BaseRegex::Opt(a) => Regex::opt(walk(a, next)),
                BaseRegex::Atom(_) | BaseRegex::Class(_) | BaseRegex::Any => {
                    *next += 1;
                    let mut leaf = Regex::make(re.expr.clone());
                    leaf.pos = Some(*next);
                    leaf
                }
                other => Regex::make(other.clone()),
            }
        }

        let mut count = 0;
        let tree = walk(self, &mut count);
        (tree, count)
    }

    /// Copy of this tree with all position marks removed
    pub fn unmarked(&self) -> Regex {
        match &self.expr {
            BaseRegex::Concat(a, b) => Regex::concat(a.unmarked(), b.unmarked()),
            BaseRegex::Disj(a, b) => Regex::disj(a.unmarked(), b.unmarked()),
            BaseRegex::Star(a) => Regex::star(a.unmarked()),
            BaseRegex::Opt(a) => Regex::opt(a.unmarked()),
            other => Regex::make(other.clone()),
        }
    }

    ///
    /// Graphviz rendering of the tree
    ///
    /// One graph node per tree node, directed edges to children, the
    /// expression string as the graph label. Internal nodes are circles
    /// labeled `.`, `+`, `*` or `?`; leaves have shape `none`.
    ///
    pub fn to_dot(&self) -> String {
        fn node(re: &Regex, out: &mut String, next: &mut usize) -> usize {
            let id = *next;
            *next += 1;
            match &re.expr {
                BaseRegex::Concat(a, b) => {
                    let _ = writeln!(out, "{}[label=\".\", shape=circle];", id);
                    binary(id, a, b, out, next);
                }
                BaseRegex::Disj(a, b) => {
                    let _ = writeln!(out, "{}[label=\"+\", shape=circle];", id);
                    binary(id, a, b, out, next);
                }
                BaseRegex::Star(a) => {
                    let _ = writeln!(out, "{}[label=\"*\", shape=circle];", id);
                    unary(id, a, out, next);
                }
                BaseRegex::Opt(a) => {
                    let _ = writeln!(out, "{}[label=\"?\", shape=circle];", id);
                    unary(id, a, out, next);
                }
                _ => {
                    let mut label = re.to_string();
                    if label == " " {
                        label = "SPACE".to_string();
                    }
                    let _ = writeln!(out, "{}[label=\"{}\", shape=none];", id, label);
                }
            }
            id
        }

        fn binary(id: usize, a: &Regex, b: &Regex, out: &mut String, next: &mut usize) {
            let left = node(a, out, next);
            let right = node(b, out, next);
            let _ = writeln!(out, "{} -> {};", id, left);
            let _ = writeln!(out, "{} -> {};", id, right);
        }

        fn unary(id: usize, a: &Regex, out: &mut String, next: &mut usize) {
            let child = node(a, out, next);
            let _ = writeln!(out, "{} -> {};", id, child);
        }

        let mut body = String::new();
        let mut counter = 0;
        node(self, &mut body, &mut counter);
        format!(
            "digraph {{\nlabel=\"{}\";\nlabelloc=\"t\";\n{}}}\n",
            self, body
        )
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // leaf body, wrapped as marked(body, pos) when a position is set
        fn leaf(f: &mut std::fmt::Formatter<'_>, body: &str, pos: Option<u32>) -> std::fmt::Result {
            match pos {
                Some(p) => write!(f, "marked({}, {})", body, p),
                None => write!(f, "{}", body),
            }
        }

        match &self.expr {
            BaseRegex::Empty => write!(f, "@emptyset"),
            BaseRegex::Epsilon => write!(f, "@epsilon"),
            BaseRegex::Anchor(kind) => write!(f, "{}", kind),
            BaseRegex::Atom(s) => leaf(f, &atom_string(*s), self.pos),
            BaseRegex::Class(c) => leaf(f, &c.to_string(), self.pos),
            BaseRegex::Any => leaf(f, "@any", self.pos),
            BaseRegex::Concat(a, b) => write!(f, "({} {})", a, b),
            BaseRegex::Disj(a, b) => write!(f, "({} + {})", a, b),
            BaseRegex::Star(a) => write!(f, "{}*", a),
            BaseRegex::Opt(a) => write!(f, "{}?", a),
        }
    }
}
