use crate::{ast::Flags, case::chars_eq};

/// Lookaround nesting bound for the matcher. Exceeding it fails the match.
pub(super) const MAX_RECURSION_DEPTH: u32 = 500;

/// The first slot of capture group `group` (1-based). The group owns three
/// slots: start, end, and the start of the attempt in progress.
pub(super) const fn group_slot(group: usize) -> usize {
    (group - 1) * 3
}

/// Registers of a running match. Every write is logged so that a failed
/// alternative can be undone by rewinding the log.
pub(super) struct State<'a> {
    pub input: &'a [char],
    pub flags: Flags,
    slots: Vec<Option<usize>>,
    undo: Vec<(usize, Option<usize>)>,
}

impl<'a> State<'a> {
    pub fn new(input: &'a [char], slots: usize, flags: Flags) -> Self {
        Self {
            input,
            flags,
            slots: vec![None; slots],
            undo: Vec::new(),
        }
    }

    #[inline]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos).copied()
    }

    #[inline]
    pub fn char_before(&self, pos: usize) -> Option<char> {
        pos.checked_sub(1).and_then(|pos| self.char_at(pos))
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<usize> {
        self.slots[slot]
    }

    pub fn set(&mut self, slot: usize, value: Option<usize>) {
        self.undo.push((slot, self.slots[slot]));
        self.slots[slot] = value;
    }

    /// The iteration count held in `reg`.
    pub fn count(&self, reg: usize) -> u32 {
        self.get(reg)
            .map_or(0, |count| u32::try_from(count).unwrap_or(u32::MAX))
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Undoes every write made since the log was `len` entries long.
    pub fn rewind(&mut self, len: usize) {
        while self.undo.len() > len {
            if let Some((slot, old)) = self.undo.pop() {
                self.slots[slot] = old;
            }
        }
    }

    pub fn is_word_boundary(&self, pos: usize) -> bool {
        let before = self.char_before(pos).is_some_and(is_word_char);
        before != self.char_at(pos).is_some_and(is_word_char)
    }

    /// Matches the text captured by `group` at `pos`, returning the position
    /// after it. A group that has not participated matches the empty string.
    pub fn backreference(&self, group: usize, pos: usize) -> Option<usize> {
        let slot = group_slot(group);
        let (Some(start), Some(end)) = (self.get(slot), self.get(slot + 1)) else {
            return Some(pos);
        };
        let end_pos = pos + (end - start);
        let candidate = self.input.get(pos..end_pos)?;
        self.input[start..end]
            .iter()
            .zip(candidate)
            .all(|(&a, &b)| chars_eq(a, b, self.flags.ignore_case))
            .then_some(end_pos)
    }
}

pub(super) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(super) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
