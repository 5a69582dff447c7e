//! Case pairing used by case-insensitive patterns.

/// Returns the code point `code` pairs with under case-insensitive matching.
///
/// The uppercase mapping wins if it differs from the character itself,
/// otherwise the lowercase mapping is used. Mappings that expand to several
/// characters (`ß` uppercases to `SS`) contribute their first character.
/// Code points that are not scalar values have no variant.
#[must_use]
pub fn case_variant(code: u32) -> Option<u32> {
    let c = char::from_u32(code)?;
    changed(c, upper(c))
        .or_else(|| changed(c, lower(c)))
        .map(u32::from)
}

fn changed(c: char, mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    if first == c && mapping.next().is_none() {
        None
    } else {
        Some(first)
    }
}

#[cfg(feature = "unicode-case")]
fn upper(c: char) -> impl Iterator<Item = char> {
    c.to_uppercase()
}

#[cfg(feature = "unicode-case")]
fn lower(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase()
}

#[cfg(not(feature = "unicode-case"))]
fn upper(c: char) -> impl Iterator<Item = char> {
    std::iter::once(c.to_ascii_uppercase())
}

#[cfg(not(feature = "unicode-case"))]
fn lower(c: char) -> impl Iterator<Item = char> {
    std::iter::once(c.to_ascii_lowercase())
}

/// The character `c` is compared as when matching without regard to case.
///
/// This is the simple uppercase mapping, except that a character keeps itself
/// when it uppercases to several characters (`ß`) or when a non-ASCII
/// character would become ASCII (`ſ`). Unlike [`case_variant`] this never
/// pairs `ß` with `S`.
#[must_use]
pub fn canonicalize(c: char) -> char {
    let mut mapping = upper(c);
    match (mapping.next(), mapping.next()) {
        (Some(u), None) if c.is_ascii() || !u.is_ascii() => u,
        _ => c,
    }
}

/// The single-character lowercase mapping of `c`, or `c` itself.
pub(crate) fn simple_lower(c: char) -> char {
    let mut mapping = lower(c);
    match (mapping.next(), mapping.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Returns `true` if `a` and `b` are the same character, ignoring case when
/// `ignore_case` is set.
#[must_use]
pub fn chars_eq(a: char, b: char, ignore_case: bool) -> bool {
    a == b || (ignore_case && canonicalize(a) == canonicalize(b))
}
