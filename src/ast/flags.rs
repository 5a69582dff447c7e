use crate::Error;
use std::str::FromStr;

/// Regular-expression flags that change what a pattern matches.
///
/// `g` and `y` are accepted for compatibility but only affect how a host
/// iterates matches, so they are recorded and otherwise ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub ignore_case: bool, // i
    pub multiline: bool,   // m
    pub dot_all: bool,     // s
    pub unicode: bool,     // u
    pub global: bool,      // g
    pub sticky: bool,      // y
}

impl Flags {
    #[must_use]
    pub fn ignore_case() -> Self {
        Self {
            ignore_case: true,
            ..Self::default()
        }
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for c in s.chars() {
            let slot = match c {
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multiline,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'g' => &mut flags.global,
                'y' => &mut flags.sticky,
                _ => return Err(Error::UnknownFlag(c)),
            };
            if *slot {
                return Err(Error::DuplicateFlag(c));
            }
            *slot = true;
        }
        Ok(flags)
    }
}
