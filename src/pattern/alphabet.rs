/// The ordered symbol set every pattern is written over
pub const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const ALPHABET_SIZE: usize = SYMBOLS.len();

pub fn is_symbol(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Symbols of the alphabet in order
pub fn symbols() -> impl Iterator<Item = char> {
    SYMBOLS.chars()
}

/// Every alphabet symbol not listed in `excluded`, in alphabet order
pub fn complement(excluded: &[char]) -> Vec<char> {
    symbols().filter(|c| !excluded.contains(c)).collect()
}

/// Number of distinct strings of `width` symbols, `None` if it overflows `u64`
pub fn wildcard_count(width: usize) -> Option<u64> {
    let width = u32::try_from(width).ok()?;
    (ALPHABET_SIZE as u64).checked_pow(width)
}

/// The `index`-th string of `width` symbols in odometer order.
///
/// The rightmost symbol advances fastest, so `wildcard_piece(2, 1)` is `"AB"`
/// and `wildcard_piece(2, 26)` is `"BA"`. Returns `None` once `index` runs past
/// the last string.
pub fn wildcard_piece(width: usize, index: u64) -> Option<String> {
    if let Some(total) = wildcard_count(width)
        && index >= total
    {
        return None;
    }

    let bytes = SYMBOLS.as_bytes();
    let base = ALPHABET_SIZE as u64;
    let mut remainder = index;
    let mut reversed = Vec::with_capacity(width);
    for _ in 0..width {
        let digit = usize::try_from(remainder % base).ok()?;
        reversed.push(char::from(*bytes.get(digit)?));
        remainder /= base;
    }

    Some(reversed.into_iter().rev().collect())
}
