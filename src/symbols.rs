// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! The symbol domain of regular expressions
//!
//! A symbol is an unsigned integer in the range `[0..MAX_SYMBOL]`. We
//! represent symbols by `u32` integers in this range, which is enough to
//! encode the characters sampled from real-world expressions. A word is a
//! sequence of symbols.
//!

use std::fmt::Write;

/// A single symbol of the input alphabet
pub type Symbol = u32;

/// A word over the symbol alphabet
pub type Word = Vec<Symbol>;

/// Maximal symbol index
pub const MAX_SYMBOL: Symbol = 0xFFFF;

/// First printable symbol (ASCII space)
///
/// Wildcard enumeration and random sampling start here.
pub const FIRST_PRINTABLE: Symbol = 0x20;

/// Convert a string to a word
///
/// # Example
///
/// ```
/// use symbolic_regex::symbols::word;
///
/// assert_eq!(word("ab"), vec!['a' as u32, 'b' as u32]);
/// ```
pub fn word(s: &str) -> Word {
    s.chars().map(|c| c as u32).collect()
}

/// Convert a word back to a string
///
/// Symbols that are not Unicode scalar values are rendered as `\u{..}`
/// escapes.
pub fn word_string(w: &[Symbol]) -> String {
    let mut s = String::with_capacity(w.len());
    for &x in w {
        match std::char::from_u32(x) {
            Some(c) => s.push(c),
            None => {
                let _ = write!(s, "\\u{{{:x}}}", x);
            }
        }
    }
    s
}

/// Printable form of a symbol without any escaping
///
/// Used inside character classes: `[a-z]` prints its bounds raw.
pub fn symbol_string(x: Symbol) -> String {
    match std::char::from_u32(x) {
        Some(c) if !c.is_control() => c.to_string(),
        _ => format!("\\u{{{:x}}}", x),
    }
}

/// Printable form of a symbol in atom position
///
/// The regular-expression metacharacters `( ) [ ] + * ?` are escaped with a
/// backslash; carriage return, newline and tab print as `\r`, `\n`, `\t`.
pub fn atom_string(x: Symbol) -> String {
    match std::char::from_u32(x) {
        Some(c) if "()[]+*?".contains(c) => format!("\\{}", c),
        Some('\r') => "\\r".to_string(),
        Some('\n') => "\\n".to_string(),
        Some('\t') => "\\t".to_string(),
        _ => symbol_string(x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_round_trip() {
        let w = word("a[b]*");
        assert_eq!(w, vec![0x61, 0x5b, 0x62, 0x5d, 0x2a]);
        assert_eq!(word_string(&w), "a[b]*");
    }

    #[test]
    fn test_atom_escapes() {
        assert_eq!(atom_string('a' as u32), "a");
        assert_eq!(atom_string('*' as u32), "\\*");
        assert_eq!(atom_string('(' as u32), "\\(");
        assert_eq!(atom_string('\n' as u32), "\\n");
        assert_eq!(atom_string('\t' as u32), "\\t");
    }

    #[test]
    fn test_non_scalar_symbol() {
        // 0xD800 is a surrogate, not a Unicode scalar value
        assert_eq!(symbol_string(0xD800), "\\u{d800}");
    }
}
