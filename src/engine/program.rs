//! Compiles the structural model into instructions for the matcher.

use super::state::group_slot;
use crate::{
    ast::{Assertion, Flags, Node, Pattern, Quantifier},
    charset::CharSet,
};

/// A zero-width test of the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Check {
    Start,
    End,
    WordBoundary,
    NonWordBoundary,
}

#[derive(Clone, Debug)]
pub(super) enum Inst {
    /// Consume this character.
    Char(char),
    /// Consume a member of the set.
    Class(CharSet),
    /// Consume anything but a line terminator, or anything with `s`.
    AnyChar,
    Check(Check),
    /// Match the instructions from `body` on their own at the current
    /// position, then continue at `next` if the outcome is the wanted one.
    Look {
        behind: bool,
        negated: bool,
        body: usize,
        next: usize,
    },
    /// Continue at the first target, falling back to the second.
    Split(usize, usize),
    Jump(usize),
    GroupStart(usize),
    GroupEnd(usize),
    Backreference(usize),
    /// Reset the iteration count in `reg`.
    RepeatInit(usize),
    /// Choose between another iteration, at the next instruction, and `exit`.
    Repeat {
        reg: usize,
        quantifier: Quantifier,
        exit: usize,
    },
    /// Record where the iteration counted in `reg` starts.
    IterStart(usize),
    /// Count a finished iteration and go back to `head`. Once `min`
    /// iterations are done, an iteration that consumed nothing fails.
    IterEnd {
        reg: usize,
        min: u32,
        head: usize,
    },
    Match,
}

/// A pattern compiled for matching.
#[derive(Clone, Debug)]
pub struct Program {
    pub(super) insts: Vec<Inst>,
    pub(super) slots: usize,
    pub(super) flags: Flags,
}

impl Program {
    #[must_use]
    pub fn new(pattern: &Pattern) -> Self {
        let mut compiler = Compiler {
            insts: Vec::new(),
            slots: group_slot(pattern.capture_count() + 1),
        };
        compiler.emit(pattern.root());
        compiler.insts.push(Inst::Match);

        Program {
            insts: compiler.insts,
            slots: compiler.slots,
            flags: pattern.flags(),
        }
    }
}

struct Compiler {
    insts: Vec<Inst>,
    slots: usize,
}

impl Compiler {
    fn pc(&self) -> usize {
        self.insts.len()
    }

    /// Pushes an instruction to be patched once its target is known.
    fn reserve(&mut self) -> usize {
        self.insts.push(Inst::Jump(usize::MAX));
        self.pc() - 1
    }

    fn emit(&mut self, node: &Node) {
        match node {
            Node::Literal(c) => self.insts.push(Inst::Char(*c)),
            Node::Class(set) => self.insts.push(Inst::Class(set.clone())),
            Node::AnyChar => self.insts.push(Inst::AnyChar),
            Node::Assertion(assertion) => self.emit_assertion(assertion),
            Node::Group {
                capture: Some(group),
                inner,
            } => {
                self.insts.push(Inst::GroupStart(*group));
                self.emit(inner);
                self.insts.push(Inst::GroupEnd(*group));
            }
            Node::Group { capture: None, inner } => self.emit(inner),
            Node::Concatenation(items) => {
                for item in items {
                    self.emit(item);
                }
            }
            Node::Alternation(branches) => self.emit_alternation(branches),
            Node::Repetition { inner, quantifier } => self.emit_repetition(inner, *quantifier),
            &Node::Backreference(group) => self.insts.push(Inst::Backreference(group)),
        }
    }

    fn emit_assertion(&mut self, assertion: &Assertion) {
        let check = match assertion {
            Assertion::Start => Check::Start,
            Assertion::End => Check::End,
            Assertion::WordBoundary => Check::WordBoundary,
            Assertion::NonWordBoundary => Check::NonWordBoundary,
            Assertion::Lookahead { negated, inner } => {
                return self.emit_look(false, *negated, inner);
            }
            Assertion::Lookbehind { negated, inner } => {
                return self.emit_look(true, *negated, inner);
            }
        };
        self.insts.push(Inst::Check(check));
    }

    fn emit_look(&mut self, behind: bool, negated: bool, inner: &Node) {
        let look = self.reserve();
        self.emit(inner);
        self.insts.push(Inst::Match);
        self.insts[look] = Inst::Look {
            behind,
            negated,
            body: look + 1,
            next: self.pc(),
        };
    }

    // a|b|c:
    //     split L1, L2
    // L1: <a>
    //     jump END
    // L2: split L3, L4
    // L3: <b>
    //     jump END
    // L4: <c>
    // END:
    fn emit_alternation(&mut self, branches: &[Node]) {
        let Some((last, rest)) = branches.split_last() else {
            return;
        };

        let mut jumps = Vec::with_capacity(rest.len());
        for branch in rest {
            let split = self.reserve();
            self.emit(branch);
            jumps.push(self.reserve());
            self.insts[split] = Inst::Split(split + 1, self.pc());
        }
        self.emit(last);

        let end = self.pc();
        for jump in jumps {
            self.insts[jump] = Inst::Jump(end);
        }
    }

    //       repeat_init R
    // HEAD: repeat R, EXIT
    //       iter_start R
    //       <inner>
    //       iter_end R, HEAD
    // EXIT:
    fn emit_repetition(&mut self, inner: &Node, quantifier: Quantifier) {
        let reg = self.slots;
        self.slots += 2;

        self.insts.push(Inst::RepeatInit(reg));
        let head = self.reserve();
        self.insts.push(Inst::IterStart(reg));
        self.emit(inner);
        self.insts.push(Inst::IterEnd {
            reg,
            min: quantifier.min,
            head,
        });
        self.insts[head] = Inst::Repeat {
            reg,
            quantifier,
            exit: self.pc(),
        };
    }
}
