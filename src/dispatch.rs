//! First-character dispatch for a set of token patterns.

use super::{
    Error,
    analysis::get_start_codes,
    ast::{Flags, Pattern, PatternSource},
};
use std::collections::BTreeMap;

/// Why a token pattern's start characters are unknown.
#[derive(Clone, Debug, PartialEq)]
pub enum Unknown {
    /// The analysis ran but the start codes cannot be listed.
    NotEnumerable,
    /// The pattern could not be built, so it was never analysed.
    Syntax(Error),
}

/// The start characters of one token type, as far as they are known.
#[derive(Clone, Debug, PartialEq)]
pub enum StartChars {
    /// Supplied by the token type's author and used verbatim.
    Hinted(Vec<u32>),
    /// Computed from the pattern.
    Computed(Vec<u32>),
    /// The token type must be tried at every position.
    Unknown(Unknown),
}

impl StartChars {
    /// Analyses `pattern` unless `hint` is given, which bypasses analysis.
    #[must_use]
    pub fn analyze(pattern: &Pattern, hint: Option<&[u32]>) -> Self {
        if let Some(hint) = hint {
            return StartChars::Hinted(hint.to_vec());
        }
        let codes = get_start_codes(pattern, None);
        if codes.is_empty() {
            StartChars::Unknown(Unknown::NotEnumerable)
        } else {
            StartChars::Computed(codes)
        }
    }

    /// Builds the pattern for `source` and analyses it. A pattern that fails
    /// to build is reported as [`Unknown::Syntax`] instead of an error.
    #[must_use]
    pub fn analyze_source(source: &PatternSource, flags: Flags, hint: Option<&[u32]>) -> Self {
        if let Some(hint) = hint {
            return StartChars::Hinted(hint.to_vec());
        }
        match Pattern::build(source, flags) {
            Ok(pattern) => Self::analyze(&pattern, None),
            Err(err) => StartChars::Unknown(Unknown::Syntax(err)),
        }
    }

    /// The known start codes, or `None` if the token type is always tried.
    #[must_use]
    pub fn codes(&self) -> Option<&[u32]> {
        match self {
            StartChars::Hinted(codes) | StartChars::Computed(codes) => Some(codes),
            StartChars::Unknown(_) => None,
        }
    }
}

/// Maps a leading code point to the token types worth trying there.
///
/// Token types are identified by their index in the slice the table was built
/// from, which is also their priority order. Every bucket keeps that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchTable {
    buckets: BTreeMap<u32, Vec<usize>>,
    sentinel: Option<Vec<usize>>,
    all: Vec<usize>,
}

impl DispatchTable {
    /// Builds the table. Token types with unknown start characters are added
    /// to every bucket and also make up the bucket for code points that no
    /// token type names.
    #[must_use]
    pub fn build(entries: &[StartChars]) -> Self {
        let unknown: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.codes().is_none())
            .map(|(index, _)| index)
            .collect();

        let mut buckets: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for &code in entry.codes().unwrap_or_default() {
                let bucket = buckets.entry(code).or_default();
                if bucket.last() != Some(&index) {
                    bucket.push(index);
                }
            }
        }

        if !unknown.is_empty() {
            for bucket in buckets.values_mut() {
                bucket.extend_from_slice(&unknown);
                bucket.sort_unstable();
            }
        }

        DispatchTable {
            buckets,
            sentinel: (!unknown.is_empty()).then_some(unknown),
            all: (0..entries.len()).collect(),
        }
    }

    /// The token types to try, in priority order, when the input continues
    /// with `code`.
    #[must_use]
    pub fn candidates(&self, code: u32) -> &[usize] {
        match (self.buckets.get(&code), &self.sentinel) {
            (Some(bucket), _) => bucket,
            (None, Some(sentinel)) => sentinel,
            (None, None) => &self.all,
        }
    }

    /// Code points with a bucket of their own.
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.buckets.keys().copied()
    }

    /// Returns `true` if no token type has unknown start characters.
    #[must_use]
    pub fn is_fully_optimized(&self) -> bool {
        self.sentinel.is_none()
    }
}
