/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::class::CharClass;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Char(char),
    AnyChar,
    AnyString,
    Class(CharClass),
}

impl Token {
    fn match_one(&self, c: char) -> bool {
        match self {
            Token::Char(v) => *v == c,
            Token::AnyChar => true,
            Token::AnyString => false,
            Token::Class(class) => class.is_match(c),
        }
    }
}

/// A compiled shell style wildcard pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FnMatchPattern {
    raw: String,
    tokens: Vec<Token>,
}

impl FnMatchPattern {
    /// Compile a pattern. Every string is a valid pattern, an unclosed `[`
    /// is matched literally.
    pub fn new(pattern: &str) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());

        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => {
                    // consecutive stars are the same as one
                    if tokens.last() != Some(&Token::AnyString) {
                        tokens.push(Token::AnyString);
                    }
                    i += 1;
                }
                '?' => {
                    tokens.push(Token::AnyChar);
                    i += 1;
                }
                '[' => match find_class_end(&chars, i + 1) {
                    Some(end) => {
                        tokens.push(Token::Class(CharClass::parse(&chars[i + 1..end])));
                        i = end + 1;
                    }
                    None => {
                        tokens.push(Token::Char('['));
                        i += 1;
                    }
                },
                c => {
                    tokens.push(Token::Char(c));
                    i += 1;
                }
            }
        }

        FnMatchPattern {
            raw: pattern.to_string(),
            tokens,
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        let text: Vec<char> = name.chars().collect();

        let mut p = 0;
        let mut t = 0;
        // position of the last star in tokens, and where it began to match in text
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            if let Some(token) = self.tokens.get(p) {
                if *token == Token::AnyString {
                    backtrack = Some((p, t));
                    p += 1;
                    continue;
                }
                if token.match_one(text[t]) {
                    p += 1;
                    t += 1;
                    continue;
                }
            }

            let Some((star_p, star_t)) = backtrack else {
                return false;
            };
            // let the last star eat one more char and retry
            p = star_p + 1;
            t = star_t + 1;
            backtrack = Some((star_p, t));
        }

        self.tokens[p..].iter().all(|t| *t == Token::AnyString)
    }
}

/// Find the index of the `]` closing the class whose content starts at `start`.
///
/// A `]` right after the opening `[` (or after `[!`) is part of the content.
fn find_class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|c| *c == ']')
        .map(|offset| j + offset)
}

impl FromStr for FnMatchPattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FnMatchPattern::new(s))
    }
}

impl fmt::Display for FnMatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
