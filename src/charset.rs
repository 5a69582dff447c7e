//! Character class sets.

use super::case::{canonicalize, case_variant, simple_lower};

/// The error type used by [`CharSet`].
#[derive(Clone, Debug, Eq, thiserror::Error, PartialEq)]
pub enum Error {
    /// An invalid range was given.
    #[error("range out of order in character class ({0:?} > {1:?})")]
    Range(char, char),
}

/// The largest Unicode code point.
pub const MAX_CODE: u32 = 0x10_FFFF;

const DIGIT: &[(u32, u32)] = &[(0x30, 0x39)];

const WORD: &[(u32, u32)] = &[(0x61, 0x7a), (0x41, 0x5a), (0x30, 0x39), (0x5f, 0x5f)];

const SPACE: &[(u32, u32)] = &[
    (0x09, 0x0d),
    (0x20, 0x20),
    (0xa0, 0xa0),
    (0x1680, 0x1680),
    (0x2000, 0x200a),
    (0x2028, 0x2029),
    (0x202f, 0x202f),
    (0x205f, 0x205f),
    (0x3000, 0x3000),
    (0xfeff, 0xfeff),
];

/// One member of a character class.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClassItem {
    Single(u32),
    /// Inclusive on both ends.
    Range(u32, u32),
}

impl ClassItem {
    #[inline]
    #[must_use]
    pub const fn contains(self, code: u32) -> bool {
        match self {
            ClassItem::Single(c) => c == code,
            ClassItem::Range(lo, hi) => lo <= code && code <= hi,
        }
    }

    /// The code points of this item in ascending order.
    pub fn codes(self) -> impl Iterator<Item = u32> {
        match self {
            ClassItem::Single(c) => c..=c,
            ClassItem::Range(lo, hi) => lo..=hi,
        }
    }
}

/// A character class: the union of its items, optionally negated.
///
/// Items keep their declaration order, which the start-code analysis relies
/// on for its output order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CharSet {
    items: Vec<ClassItem>,
    negated: bool,
    complement: bool,
}

impl CharSet {
    /// Creates a new empty character set.
    #[must_use]
    pub const fn new() -> Self {
        CharSet {
            items: Vec::new(),
            negated: false,
            complement: false,
        }
    }

    /// Builds the set for a shorthand class (`d`, `D`, `w`, `W`, `s`, `S`).
    ///
    /// Negated shorthands keep the positive items and set the negate flag.
    /// Returns `None` for any other byte.
    #[must_use]
    pub fn shorthand(class: char) -> Option<Self> {
        let ranges = shorthand_ranges(class)?;
        let mut set = CharSet::new();
        set.extend_ranges(ranges.iter().copied());
        set.negated = class.is_ascii_uppercase();
        Some(set)
    }

    /// Adds the given character to the character set.
    #[inline]
    pub fn add_char(&mut self, c: char) {
        self.items.push(ClassItem::Single(u32::from(c)));
    }

    /// Adds an inclusive range of characters to the character set.
    ///
    /// # Errors
    ///
    /// If the end of the range is before the start of the range, an [`Error`]
    /// is returned.
    pub fn add_range(&mut self, start: char, end: char) -> Result<(), Error> {
        if start <= end {
            self.items
                .push(ClassItem::Range(u32::from(start), u32::from(end)));
            Ok(())
        } else {
            Err(Error::Range(start, end))
        }
    }

    /// Adds a shorthand class (e.g. `\d`) inside a bracket class.
    ///
    /// A negated shorthand contributes its explicit complement over the whole
    /// code point space and marks the set as containing a complement.
    /// Returns `false` if `class` is not a shorthand identifier.
    pub fn add_shorthand(&mut self, class: char) -> bool {
        let Some(ranges) = shorthand_ranges(class) else {
            return false;
        };
        if class.is_ascii_uppercase() {
            self.extend_ranges(complement(ranges));
            self.complement = true;
        } else {
            self.extend_ranges(ranges.iter().copied());
        }
        true
    }

    fn extend_ranges(&mut self, ranges: impl IntoIterator<Item = (u32, u32)>) {
        self.items.extend(ranges.into_iter().map(|(lo, hi)| {
            if lo == hi {
                ClassItem::Single(lo)
            } else {
                ClassItem::Range(lo, hi)
            }
        }));
    }

    /// Negates the character set.
    #[inline]
    pub fn invert(&mut self) {
        self.negated = !self.negated;
    }

    #[must_use]
    pub fn items(&self) -> &[ClassItem] {
        &self.items
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns `true` if the set is negated or includes the complement of a
    /// shorthand class, i.e. covers most of the code point space.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.negated || self.complement
    }

    /// Returns `true` if `code` is one of the items, ignoring negation.
    #[must_use]
    pub fn contains(&self, code: u32) -> bool {
        self.items.iter().any(|item| item.contains(code))
    }

    /// Returns `true` if the class matches `code`, taking negation and
    /// optionally case into account.
    #[must_use]
    pub fn matches(&self, code: u32, ignore_case: bool) -> bool {
        let member = self.contains(code)
            || (ignore_case && case_variant(code).is_some_and(|v| self.contains(v)));
        member != self.negated
    }

    /// Membership of the input character `c` as the matcher decides it. Under
    /// `ignore_case` a member matches if it canonicalizes to the same character
    /// as `c`.
    #[must_use]
    pub fn matches_char(&self, c: char, ignore_case: bool) -> bool {
        let member = self.contains(u32::from(c))
            || (ignore_case && {
                let canonical = canonicalize(c);
                [canonical, simple_lower(canonical)]
                    .into_iter()
                    .any(|f| canonicalize(f) == canonical && self.contains(u32::from(f)))
            });
        member != self.negated
    }
}

fn shorthand_ranges(class: char) -> Option<&'static [(u32, u32)]> {
    match class.to_ascii_lowercase() {
        'd' => Some(DIGIT),
        'w' => Some(WORD),
        's' => Some(SPACE),
        _ => None,
    }
}

/// The gaps between `ranges` over `0..=MAX_CODE`.
fn complement(ranges: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable();

    let mut gaps = Vec::new();
    let mut next = 0;
    for (lo, hi) in sorted {
        if lo > next {
            gaps.push((next, lo - 1));
        }
        next = next.max(hi + 1);
    }
    if next <= MAX_CODE {
        gaps.push((next, MAX_CODE));
    }
    gaps
}
