//! First-character analysis.
//!
//! Two traversals share the same structural rules. [`compute_start_codes`]
//! enumerates every character a node could begin with and gives up on
//! complements and backreferences. [`can_match_char_code`] only answers
//! whether one of a finite set of candidates could come first, which it can
//! always decide, because a negated class is tested by membership instead of
//! being enumerated. [`can_contain_char_code`] asks the same question of every
//! position in a match.

use super::{
    ast::{Node, Pattern},
    case::case_variant,
    charset::CharSet,
};
use std::collections::HashSet;

/// Line terminators, which `.` does not match without the `s` flag.
pub const LINE_TERMINATORS: [u32; 4] = [0x0a, 0x0d, 0x2028, 0x2029];

/// The result of [`compute_start_codes`] for one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartCodes {
    /// Possible first characters, in traversal order, without duplicates.
    pub codes: Vec<u32>,
    /// The node can match the empty string.
    pub nullable: bool,
    /// `codes` is complete.
    pub enumerable: bool,
}

/// Ordered, duplicate-free accumulator of code points.
#[derive(Default)]
struct CodeList {
    codes: Vec<u32>,
    seen: HashSet<u32>,
}

impl CodeList {
    fn push(&mut self, code: u32) {
        if self.seen.insert(code) {
            self.codes.push(code);
        }
    }

    /// Adds `code`, followed by its case variant when `ignore_case` is set.
    fn push_cased(&mut self, code: u32, ignore_case: bool) {
        self.push(code);
        if ignore_case && let Some(variant) = case_variant(code) {
            self.push(variant);
        }
    }
}

#[derive(Clone, Copy)]
struct Outcome {
    nullable: bool,
    enumerable: bool,
}

impl Outcome {
    const CONSUMES: Self = Self {
        nullable: false,
        enumerable: true,
    };
    const EMPTY: Self = Self {
        nullable: true,
        enumerable: true,
    };
    const UNKNOWN: Self = Self {
        nullable: false,
        enumerable: false,
    };
}

/// Computes the characters `node` could begin a match with.
///
/// The result is deterministic for a given node and case mode.
#[must_use]
pub fn compute_start_codes(node: &Node, case_insensitive: bool) -> StartCodes {
    let mut list = CodeList::default();
    let Outcome {
        nullable,
        enumerable,
    } = first_codes(node, case_insensitive, &mut list);

    StartCodes {
        codes: list.codes,
        nullable,
        enumerable,
    }
}

/// Returns the start codes of `pattern`, or an empty list if they cannot be
/// enumerated.
///
/// An empty result means "unknown, assume anything", not "matches nothing".
/// `case_insensitive` overrides the pattern's own `i` flag when given.
#[must_use]
pub fn get_start_codes(pattern: &Pattern, case_insensitive: Option<bool>) -> Vec<u32> {
    let case_insensitive = case_insensitive.unwrap_or(pattern.flags().ignore_case);
    let result = compute_start_codes(pattern.root(), case_insensitive);
    if result.enumerable {
        result.codes
    } else {
        Vec::new()
    }
}

fn first_codes(node: &Node, ignore_case: bool, out: &mut CodeList) -> Outcome {
    match node {
        Node::Literal(c) => {
            out.push_cased(u32::from(*c), ignore_case);
            Outcome::CONSUMES
        }
        Node::Class(set) => {
            if set.is_unbounded() {
                return Outcome::UNKNOWN;
            }
            for code in set.items().iter().flat_map(|item| item.codes()) {
                out.push_cased(code, ignore_case);
            }
            Outcome::CONSUMES
        }
        Node::AnyChar | Node::Backreference(_) => Outcome::UNKNOWN,
        Node::Assertion(_) => Outcome::EMPTY,
        Node::Group { inner, .. } => first_codes(inner, ignore_case, out),
        Node::Concatenation(items) => {
            for item in items {
                let outcome = first_codes(item, ignore_case, out);
                if !outcome.enumerable {
                    return Outcome::UNKNOWN;
                }
                if !outcome.nullable {
                    return Outcome::CONSUMES;
                }
            }
            Outcome::EMPTY
        }
        Node::Alternation(branches) => {
            let mut result = Outcome {
                nullable: false,
                enumerable: true,
            };
            for branch in branches {
                let outcome = first_codes(branch, ignore_case, out);
                result.nullable |= outcome.nullable;
                result.enumerable &= outcome.enumerable;
            }
            result
        }
        Node::Repetition { inner, quantifier } => {
            let outcome = first_codes(inner, ignore_case, out);
            Outcome {
                nullable: outcome.nullable || quantifier.is_optional(),
                enumerable: outcome.enumerable,
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Hit {
    matched: bool,
    nullable: bool,
}

impl Hit {
    const MISS: Self = Self {
        matched: false,
        nullable: false,
    };
    const EMPTY: Self = Self {
        matched: false,
        nullable: true,
    };

    fn leaf(matched: bool) -> Self {
        Self {
            matched,
            nullable: false,
        }
    }
}

/// Returns `true` if `pattern` could match one of `candidates` as its first
/// character.
///
/// Unlike [`get_start_codes`] this always has an answer. Negated classes are
/// tested by excluding each candidate directly. A backreference is treated as
/// never matching a candidate.
#[must_use]
pub fn can_match_char_code(candidates: &[u32], pattern: &Pattern) -> bool {
    Candidates::new(candidates, pattern)
        .first_matches(pattern.root())
        .matched
}

/// Returns `true` if a match of `pattern` could contain one of `candidates`
/// at any position.
///
/// Lookarounds inspect text outside the match and backreferences repeat text
/// a group already matched, so neither contributes.
#[must_use]
pub fn can_contain_char_code(candidates: &[u32], pattern: &Pattern) -> bool {
    Candidates::new(candidates, pattern).anywhere(pattern.root())
}

struct Candidates<'a> {
    candidates: &'a [u32],
    ignore_case: bool,
    dot_all: bool,
}

impl<'a> Candidates<'a> {
    fn new(candidates: &'a [u32], pattern: &Pattern) -> Self {
        let flags = pattern.flags();
        Candidates {
            candidates,
            ignore_case: flags.ignore_case,
            dot_all: flags.dot_all,
        }
    }

    fn any(&self, f: impl Fn(u32) -> bool) -> bool {
        self.candidates.iter().any(|&c| f(c))
    }

    fn literal(&self, c: char) -> bool {
        let code = u32::from(c);
        let variant = if self.ignore_case {
            case_variant(code)
        } else {
            None
        };
        self.any(|candidate| candidate == code || Some(candidate) == variant)
    }

    fn class(&self, set: &CharSet) -> bool {
        self.any(|candidate| set.matches(candidate, self.ignore_case))
    }

    fn any_char(&self) -> bool {
        self.any(|candidate| self.dot_all || !LINE_TERMINATORS.contains(&candidate))
    }

    fn anywhere(&self, node: &Node) -> bool {
        match node {
            Node::Literal(c) => self.literal(*c),
            Node::Class(set) => self.class(set),
            Node::AnyChar => self.any_char(),
            Node::Assertion(_) | Node::Backreference(_) => false,
            Node::Group { inner, .. } | Node::Repetition { inner, .. } => self.anywhere(inner),
            Node::Concatenation(items) | Node::Alternation(items) => {
                items.iter().any(|item| self.anywhere(item))
            }
        }
    }

    fn first_matches(&self, node: &Node) -> Hit {
        match node {
            Node::Literal(c) => Hit::leaf(self.literal(*c)),
            Node::Class(set) => Hit::leaf(self.class(set)),
            Node::AnyChar => Hit::leaf(self.any_char()),
            Node::Assertion(_) => Hit::EMPTY,
            // TODO: decide whether a backreference to a group that has already
            // consumed a candidate should count as a match.
            Node::Backreference(_) => Hit::MISS,
            Node::Group { inner, .. } => self.first_matches(inner),
            Node::Concatenation(items) => {
                for item in items {
                    let hit = self.first_matches(item);
                    if hit.matched {
                        return hit;
                    }
                    if !hit.nullable {
                        return Hit::MISS;
                    }
                }
                Hit::EMPTY
            }
            Node::Alternation(branches) => {
                let mut result = Hit::MISS;
                for branch in branches {
                    let hit = self.first_matches(branch);
                    if hit.matched {
                        return hit;
                    }
                    result.nullable |= hit.nullable;
                }
                result
            }
            Node::Repetition { inner, quantifier } => {
                let hit = self.first_matches(inner);
                Hit {
                    matched: hit.matched,
                    nullable: hit.nullable || quantifier.is_optional(),
                }
            }
        }
    }
}
