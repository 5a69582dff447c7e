//! A backtracking matcher over compiled patterns.
//!
//! Only used to run token patterns; the analysis never executes a pattern.
//! Alternatives still to be tried are kept on an explicit stack, so the length
//! of the input does not limit what can be matched. Only lookarounds nest.

use super::{ast::Pattern, case::chars_eq};
use program::{Check, Inst};
use state::{MAX_RECURSION_DEPTH, State, group_slot, is_line_terminator};

mod program;
mod state;

pub use program::Program;

/// Matches `pattern` against `input` starting exactly at `start`.
///
/// Returns the end position of the first match found by leftmost,
/// first-alternative-wins backtracking, which may equal `start` for patterns
/// that match the empty string.
#[must_use]
pub fn match_at(pattern: &Pattern, input: &[char], start: usize) -> Option<usize> {
    Program::new(pattern).match_at(input, start)
}

/// An alternative to resume from if the current one fails.
struct Backtrack {
    pc: usize,
    pos: usize,
    undo: usize,
}

impl Program {
    /// Matches against `input` starting exactly at `start`. See [`match_at`].
    #[must_use]
    pub fn match_at(&self, input: &[char], start: usize) -> Option<usize> {
        if start > input.len() {
            return None;
        }
        let mut state = State::new(input, self.slots, self.flags);
        self.run(&mut state, 0, start, None, 0)
    }

    /// Runs from `pc` at `pos` until a `Match` instruction is reached and
    /// returns the end position. If `end` is given, only a match ending there
    /// counts. On failure every register write is undone.
    fn run(
        &self,
        state: &mut State<'_>,
        pc: usize,
        pos: usize,
        end: Option<usize>,
        depth: u32,
    ) -> Option<usize> {
        if depth > MAX_RECURSION_DEPTH {
            return None;
        }

        let base = state.undo_len();
        let mut stack = vec![Backtrack {
            pc,
            pos,
            undo: base,
        }];

        while let Some(Backtrack { mut pc, mut pos, undo }) = stack.pop() {
            state.rewind(undo);

            loop {
                let inst = &self.insts[pc];
                pc += 1;

                match inst {
                    Inst::Char(_) | Inst::Class(_) | Inst::AnyChar => {
                        let Some(c) = state.char_at(pos) else {
                            break;
                        };
                        if !consumes(inst, c, state) {
                            break;
                        }
                        pos += 1;
                    }
                    &Inst::Check(check) => {
                        if !holds(check, pos, state) {
                            break;
                        }
                    }
                    &Inst::Look {
                        behind,
                        negated,
                        body,
                        next,
                    } => {
                        let found = if behind {
                            (0..=pos).rev().any(|start| {
                                self.run(state, body, start, Some(pos), depth + 1)
                                    .is_some()
                            })
                        } else {
                            self.run(state, body, pos, None, depth + 1).is_some()
                        };
                        // Captures made inside a positive lookaround stay visible.
                        if found == negated {
                            break;
                        }
                        pc = next;
                    }
                    &Inst::Split(first, second) => {
                        stack.push(Backtrack {
                            pc: second,
                            pos,
                            undo: state.undo_len(),
                        });
                        pc = first;
                    }
                    &Inst::Jump(target) => pc = target,
                    &Inst::GroupStart(group) => state.set(group_slot(group) + 2, Some(pos)),
                    &Inst::GroupEnd(group) => {
                        let slot = group_slot(group);
                        let start = state.get(slot + 2);
                        state.set(slot, start);
                        state.set(slot + 1, Some(pos));
                    }
                    &Inst::Backreference(group) => match state.backreference(group, pos) {
                        Some(next) => pos = next,
                        None => break,
                    },
                    &Inst::RepeatInit(reg) => state.set(reg, Some(0)),
                    &Inst::Repeat {
                        reg,
                        quantifier,
                        exit,
                    } => {
                        let count = state.count(reg);
                        if count < quantifier.min {
                            continue;
                        }
                        if !quantifier.allows_more(count) {
                            pc = exit;
                            continue;
                        }
                        let undo = state.undo_len();
                        if quantifier.greedy {
                            stack.push(Backtrack { pc: exit, pos, undo });
                        } else {
                            stack.push(Backtrack { pc, pos, undo });
                            pc = exit;
                        }
                    }
                    &Inst::IterStart(reg) => state.set(reg + 1, Some(pos)),
                    &Inst::IterEnd { reg, min, head } => {
                        let count = state.count(reg);
                        // An iteration that consumed nothing cannot make progress.
                        if count >= min && state.get(reg + 1) == Some(pos) {
                            break;
                        }
                        state.set(reg, Some(count.saturating_add(1) as usize));
                        pc = head;
                    }
                    Inst::Match => {
                        if end.is_none_or(|end| end == pos) {
                            return Some(pos);
                        }
                        break;
                    }
                }
            }
        }

        state.rewind(base);
        None
    }
}

fn consumes(inst: &Inst, c: char, state: &State<'_>) -> bool {
    let flags = state.flags;
    match inst {
        Inst::Char(lit) => chars_eq(*lit, c, flags.ignore_case),
        Inst::Class(set) => set.matches_char(c, flags.ignore_case),
        Inst::AnyChar => flags.dot_all || !is_line_terminator(c),
        _ => false,
    }
}

fn holds(check: Check, pos: usize, state: &State<'_>) -> bool {
    let multiline = state.flags.multiline;
    match check {
        Check::Start => {
            pos == 0 || (multiline && state.char_before(pos).is_some_and(is_line_terminator))
        }
        Check::End => {
            pos == state.input.len()
                || (multiline && state.char_at(pos).is_some_and(is_line_terminator))
        }
        Check::WordBoundary => state.is_word_boundary(pos),
        Check::NonWordBoundary => !state.is_word_boundary(pos),
    }
}
