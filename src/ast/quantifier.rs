/// Repetition bounds. `max` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub min: u32,
    pub max: Option<u32>,
    pub greedy: bool,
}

impl Quantifier {
    pub const STAR: Self = Self::new(0, None); // *
    pub const PLUS: Self = Self::new(1, None); // +
    pub const QUESTION: Self = Self::new(0, Some(1)); // ?

    #[must_use]
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self {
            min,
            max,
            greedy: true,
        }
    }

    /// The same bounds, matching as few repetitions as possible.
    #[must_use]
    pub const fn lazy(self) -> Self {
        Self {
            greedy: false,
            ..self
        }
    }

    #[must_use]
    pub const fn is_optional(self) -> bool {
        self.min == 0
    }

    /// Returns `true` if another repetition is allowed after `count`.
    #[must_use]
    pub fn allows_more(self, count: u32) -> bool {
        self.max.is_none_or(|max| count < max)
    }
}
