/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

impl ClassItem {
    fn contains(&self, c: char) -> bool {
        match self {
            ClassItem::Single(v) => *v == c,
            ClassItem::Range(lo, hi) => *lo <= c && c <= *hi,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CharClass {
    negated: bool,
    items: Vec<ClassItem>,
}

impl CharClass {
    /// Parse the content between the brackets, the brackets themselves excluded.
    ///
    /// A leading `!` negates the class. A `-` between two characters makes a
    /// range, and a range whose start is greater than its end is dropped. A
    /// `-` at the start or the end of the content is a normal character.
    pub(crate) fn parse(body: &[char]) -> Self {
        let (negated, body) = match body.split_first() {
            Some(('!', left)) => (true, left),
            _ => (false, body),
        };

        let mut items = Vec::with_capacity(body.len());
        let mut i = 0;
        while i < body.len() {
            let c = body[i];
            if i + 2 < body.len() && body[i + 1] == '-' {
                let end = body[i + 2];
                if c <= end {
                    items.push(ClassItem::Range(c, end));
                }
                i += 3;
            } else {
                items.push(ClassItem::Single(c));
                i += 1;
            }
        }

        CharClass { negated, items }
    }

    pub(crate) fn is_match(&self, c: char) -> bool {
        let found = self.items.iter().any(|item| item.contains(c));
        found != self.negated
    }
}
